//! Глобальный logger симуляции
//!
//! Host (движок, тесты, headless binary) регистрирует свой `LogPrinter`.
//! Если printer не задан - сообщения молча отбрасываются.
//! Timestamp добавляется здесь, не в printer.

use once_cell::sync::Lazy;
use std::sync::Mutex;

struct LoggerState {
    printer: Option<Box<dyn LogPrinter>>,
    min_level: LogLevel,
}

impl LoggerState {
    fn emit(&self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }

        if let Some(printer) = self.printer.as_ref() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            printer.log(level, &format!("[{}] {}", timestamp, message));
        }
    }
}

static LOGGER: Lazy<Mutex<LoggerState>> = Lazy::new(|| {
    Mutex::new(LoggerState {
        printer: None,
        min_level: LogLevel::Debug,
    })
});

/// Уровень сообщения (порядок = важность)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Sink для сообщений (console, движковый output, test capture)
pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(printer: Box<dyn LogPrinter>) {
    if let Ok(mut state) = LOGGER.lock() {
        state.printer = Some(printer);
    }
}

pub fn set_logger_if_needed(printer: Box<dyn LogPrinter>) {
    if let Ok(mut state) = LOGGER.lock() {
        if state.printer.is_none() {
            state.printer = Some(printer);
        }
    }
}

/// Сообщения ниже `level` отбрасываются
pub fn set_log_level(level: LogLevel) {
    if let Ok(mut state) = LOGGER.lock() {
        state.min_level = level;
    }
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    // Poisoned mutex = кто-то паниковал внутри printer'а; логирование не должно валить симуляцию
    if let Ok(state) = LOGGER.lock() {
        state.emit(level, message);
    }
}

/// stdout printer для headless прогонов
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
