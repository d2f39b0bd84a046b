//! Error taxonomy for date resolution
//!
//! Every fatal condition maps to a stable process exit code so that calling
//! scripts can branch on the failure class without parsing text.

use std::path::PathBuf;

/// Result type for resolution operations
pub type EvalDateResult<T> = Result<T, EvalDateError>;

/// Errors that abort an invocation
#[derive(Debug, thiserror::Error)]
pub enum EvalDateError {
    #[error("JSON file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid JSON: {0}")]
    MalformedInput(String),

    #[error("--date must be YYYYMMDD, got '{0}'")]
    InvalidDateFormat(String),

    #[error("Env var '{0}' is not set")]
    MissingConfiguration(String),

    #[error("No mapping for today's date: {0}")]
    NoMappingForDate(String),

    #[error("Failed to persist '{name}' (exit code {exit_code}): {message}")]
    Persistence {
        name: String,
        exit_code: i32,
        message: String,
    },
}

impl EvalDateError {
    /// Process exit status for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            EvalDateError::FileNotFound(_)
            | EvalDateError::MalformedInput(_)
            | EvalDateError::MissingConfiguration(_) => 1,
            EvalDateError::InvalidDateFormat(_) => 2,
            EvalDateError::NoMappingForDate(_) => 3,
            // A zero status would report success for a failed write
            EvalDateError::Persistence { exit_code, .. } if *exit_code == 0 => 1,
            EvalDateError::Persistence { exit_code, .. } => *exit_code,
        }
    }

    pub(crate) fn persistence(
        name: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        EvalDateError::Persistence {
            name: name.into(),
            exit_code,
            message: message.into().trim().to_string(),
        }
    }
}
