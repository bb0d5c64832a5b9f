//! Error handling module for archselect
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Operator cancellation is never an error: interrupts, skips and resets are
//! reported through [`crate::menu::SelectionResult`].

use thiserror::Error;

/// Main error type for menu construction and execution
#[derive(Error, Debug)]
pub enum SelectError {
    /// The menu cannot be shown with the given options or settings.
    /// Callers must not retry with the same input.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors (terminal, config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectError>;

impl SelectError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// True for errors caused by the menu definition rather than the environment
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
