use chrono::Local;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    debug: bool,
}

impl Logger {
    fn new(prefix: Option<String>, debug: bool) -> Self {
        Self { prefix, debug }
    }

    fn format_line(&self, level: &str, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}] {}", timestamp, prefix, level, message),
            None => format!("[{}][{}] {}", timestamp, level, message),
        }
    }

    pub fn debug(&self, message: &str) {
        if self.debug {
            println!("{}", self.format_line("DEBUG", message));
        }
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug
    }
}

/// Only the first call has an effect.
pub fn init_logger(prefix: Option<String>, debug: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, debug));
}

const NOT_INITIALIZED: &str = "Logger not initialized! Call init_logger() first.";

/// The line to print on stdout, or the warning for stderr when no logger is set.
fn info_line(logger: Option<&Logger>, message: &str) -> Result<String, &'static str> {
    logger
        .map(|logger| logger.format_line("INFO", message))
        .ok_or(NOT_INITIALIZED)
}

pub fn log(message: &str) {
    match info_line(LOGGER.get(), message) {
        Ok(line) => println!("{}", line),
        Err(warning) => eprintln!("{}", warning),
    }
}

/// Silent before `init_logger`: debug output is opt-in.
pub fn debug(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.debug(message);
    }
}

pub fn is_debug_enabled() -> bool {
    LOGGER.get().is_some_and(Logger::is_debug_enabled)
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

/// Skips formatting entirely when debug output is off.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
            $crate::logger::debug(&format!($($arg)*))
        }
    };
}
