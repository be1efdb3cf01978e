//! QUIZBIRD - terminal quiz game
//!
//! A cross-platform TUI quiz game with timed questions, per-level
//! progression, one-shot continue/help mechanics, and persisted results.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod content;
pub mod models;
pub mod nav;
pub mod session;
pub mod store;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Question content failed to load or validate
    ContentError(String),
    /// Requested grade is not present in the content set
    GradeNotFound(u32),
    /// Progress/results persistence error
    PersistenceError(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::ContentError(msg) => write!(f, "Content error: {}", msg),
            QuizError::GradeNotFound(grade) => write!(f, "Grade {} not found", grade),
            QuizError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for quizbird operations
pub type Result<T> = std::result::Result<T, QuizError>;

// Common types and constants
pub const APP_NAME: &str = "quizbird";
pub const CONFIG_FILE: &str = "quizbird.toml";
pub const RESULTS_FILE: &str = "results.json";
pub const PROGRESS_FILE: &str = "progress.json";
pub const MAX_RESULTS_HISTORY: usize = 100;
