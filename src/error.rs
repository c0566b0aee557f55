//! Error types for ticklist
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (empty task, unknown todo, bad args or config)
//! - 4: Operation failed (io, serialization)

use std::path::PathBuf;
use thiserror::Error;

use crate::todo::TodoId;

/// Exit codes for the ticklist CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for ticklist operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task cannot be empty")]
    EmptyTask,

    #[error("Todo not found: {0}")]
    TodoNotFound(TodoId),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid script line {line}: {message}")]
    InvalidScript { line: usize, message: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::EmptyTask
            | Error::TodoNotFound(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::ConfigNotFound(_)
            | Error::InvalidScript { .. } => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TodoNotFound(id) => Some(serde_json::json!({ "id": id.get() })),
            Error::InvalidScript { line, message } => Some(serde_json::json!({
                "line": line,
                "message": message,
            })),
            Error::ConfigNotFound(path) => Some(serde_json::json!({
                "path": path.to_string_lossy(),
            })),
            Error::InvalidArgument(message) | Error::InvalidConfig(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for ticklist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
