mod app;
mod config;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tictactoe_engine::config::ConfigManager;
use tictactoe_engine::games::SessionRng;
use tictactoe_engine::{log, logger};

use app::TicTacToeApp;
use config::get_config_manager;

#[derive(Parser)]
#[command(name = "tictactoe_desktop")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Config file to use instead of the one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed seed for the bots' random choices.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = match args.config {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => get_config_manager(),
    };
    let config = config_manager.get_config()?;

    let prefix = if args.use_log_prefix {
        Some("Desktop".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.debug_logging);

    let rng = args.seed.map_or_else(SessionRng::from_random, SessionRng::new);
    log!("Starting with RNG seed {}", rng.seed());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 560.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |_cc| Ok(Box::new(TicTacToeApp::new(config, config_manager, rng)))),
    )?;

    Ok(())
}
