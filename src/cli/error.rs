//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{level} not found: {code}")]
    NotFound { level: String, code: String },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::NotFound { .. } => crate::exitcode::NOINPUT,
            CliError::Application(e) => match e {
                ApplicationError::UnsupportedLanguage { .. } => crate::exitcode::USAGE,
                ApplicationError::DatasetUnavailable { .. } => crate::exitcode::UNAVAILABLE,
                ApplicationError::InvalidDataset { .. } | ApplicationError::Domain(_) => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}
