//! Logging capability handed to readers and writers at construction.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Severity of a catalog log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogLevel {
    /// Detail only interesting while debugging a catalog.
    Verbose,
    /// Something the user asked to see.
    User,
    /// A line or entry was skipped.
    Warning,
    /// An operation failed.
    Error,
}

/// Sink for the messages the codecs produce.
pub trait CatalogLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }

    fn user(&self, message: &str) {
        self.log(LogLevel::User, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Forwards to the `log` facade; the application picks the backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl CatalogLogger for LogFacade {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Verbose => log::debug!("{message}"),
            LogLevel::User => log::info!("{message}"),
            LogLevel::Warning => log::warn!("{message}"),
            LogLevel::Error => log::error!("{message}"),
        }
    }
}

/// A recorded log message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every message so the caller can enumerate them after a parse or write.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every message logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl CatalogLogger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                message: message.to_string(),
            });
    }
}
