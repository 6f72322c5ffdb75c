//! Application-level errors (wraps domain errors)

use std::collections::BTreeSet;
use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add configuration and dataset context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error(
        "invalid language specified: '{language}'. Supported languages: {}",
        .supported.iter().join(", ")
    )]
    UnsupportedLanguage {
        language: String,
        supported: BTreeSet<String>,
    },

    #[error("dataset for language '{language}' is unavailable: {}", .path.display())]
    DatasetUnavailable {
        language: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset for language '{language}': {message}")]
    InvalidDataset { language: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn unsupported_language(language: impl Into<String>, supported: BTreeSet<String>) -> Self {
        Self::UnsupportedLanguage {
            language: language.into(),
            supported,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
