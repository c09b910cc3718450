use std::time::{Duration, Instant};

use eframe::egui;
use tictactoe_engine::games::SessionRng;
use tictactoe_engine::games::tictactoe::{
    Difficulty, FirstPlayer, GameMode, Outcome, TicTacToeGameState,
};
use tictactoe_engine::log;

use crate::config::{ClientConfig, ClientConfigManager};
use crate::ui::TicTacToeBoardUi;

pub struct TicTacToeApp {
    state: TicTacToeGameState,
    rng: SessionRng,
    config: ClientConfig,
    config_manager: ClientConfigManager,
    board_ui: TicTacToeBoardUi,
    bot_due_at: Option<Instant>,
}

impl TicTacToeApp {
    pub fn new(config: ClientConfig, config_manager: ClientConfigManager, rng: SessionRng) -> Self {
        Self {
            state: TicTacToeGameState::new(config.game),
            rng,
            config,
            config_manager,
            board_ui: TicTacToeBoardUi::new(),
            bot_due_at: None,
        }
    }

    fn restart(&mut self) {
        self.state.restart();
        self.bot_due_at = None;
        log!("New game: {:?}", self.state.settings);
    }

    fn save_settings(&mut self) {
        self.config.game = self.state.settings;
        if let Err(e) = self.config_manager.set_config(&self.config) {
            log!("Failed to save config: {}", e);
        }
    }

    /// Plays the bot's move once its delay has passed, otherwise schedules a repaint.
    fn drive_bot(&mut self, ctx: &egui::Context) {
        if !self.state.is_bot_turn() {
            self.bot_due_at = None;
            return;
        }

        let delay = Duration::from_millis(self.config.bot_delay_ms);
        let due_at = *self.bot_due_at.get_or_insert_with(|| Instant::now() + delay);
        let now = Instant::now();
        if now < due_at {
            ctx.request_repaint_after(due_at - now);
            return;
        }

        self.bot_due_at = None;
        if let Err(e) = self.state.bot_move(&mut self.rng) {
            log!("Bot failed to move: {}", e);
        }
        self.log_outcome();
    }

    fn log_outcome(&self) {
        match self.state.outcome {
            Outcome::Won { mark, line } => log!("{} wins on line {:?}", mark, line),
            Outcome::Draw => log!("Game drawn"),
            Outcome::InProgress => {}
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        let mut mode = self.state.settings.mode;
        let mut difficulty = self.state.settings.difficulty;
        let mut first_player = self.state.settings.first_player;

        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Mode")
                .selected_text(mode.label())
                .show_ui(ui, |ui| {
                    for option in GameMode::ALL {
                        ui.selectable_value(&mut mode, option, option.label());
                    }
                });

            ui.add_enabled_ui(mode == GameMode::VersusBot, |ui| {
                egui::ComboBox::from_label("Difficulty")
                    .selected_text(difficulty.label())
                    .show_ui(ui, |ui| {
                        for option in Difficulty::ALL {
                            ui.selectable_value(&mut difficulty, option, option.label());
                        }
                    });

                egui::ComboBox::from_label("First move")
                    .selected_text(first_player.label())
                    .show_ui(ui, |ui| {
                        for option in FirstPlayer::ALL {
                            ui.selectable_value(&mut first_player, option, option.label());
                        }
                    });
            });
        });

        let mut changed = false;
        if mode != self.state.settings.mode {
            self.state.set_mode(mode);
            self.bot_due_at = None;
            changed = true;
        }
        if difficulty != self.state.settings.difficulty {
            self.state.set_difficulty(difficulty);
            changed = true;
        }
        if first_player != self.state.settings.first_player {
            self.state.set_first_player(first_player);
            self.bot_due_at = None;
            changed = true;
        }
        if changed {
            log!("Settings changed: {:?}", self.state.settings);
            self.save_settings();
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_bot(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_controls(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = self.state.status_text();
                match self.state.outcome {
                    Outcome::Won { .. } => ui.colored_label(egui::Color32::GREEN, status),
                    _ => ui.label(status),
                };
                if ui.button("Restart").clicked() {
                    self.restart();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let accepts_input = !self.state.is_over() && !self.state.is_bot_turn();
                let clicked = self.board_ui.render(
                    ui,
                    &self.state.board,
                    self.state.winning_line(),
                    accepts_input,
                );
                if let Some(index) = clicked {
                    match self.state.player_move(index) {
                        Ok(()) => self.log_outcome(),
                        Err(e) => log!("Rejected move at cell {}: {}", index, e),
                    }
                }
            });
        });

        if self.state.is_bot_turn() && self.bot_due_at.is_none() {
            ctx.request_repaint();
        }
    }
}
