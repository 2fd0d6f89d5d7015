//! Error types for the promptline application

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("API key not found. Please set OPENAI_API_KEY environment variable")]
    ApiKeyNotFound,

    #[error("Authentication rejected by API: {0}")]
    AuthRejected(String),

    #[error("Failed to read configuration: {0}")]
    ConfigError(String),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API error: {message}")]
    ApiError { message: String },
}

impl AppError {
    /// Whether this error means the program could not even reach the
    /// capture/request cycle and should exit non-zero.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::TerminalError(_))
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
