//! Error conversion helpers for dataset I/O
//!
//! Provides an extension trait for attaching language and path context to I/O errors.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Report an I/O failure as the dataset for `language` being unavailable.
    ///
    /// # Example
    /// ```ignore
    /// std::fs::read_to_string(&path)
    ///     .with_dataset_context("en", &path)?;
    /// ```
    fn with_dataset_context(self, language: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_dataset_context(self, language: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::DatasetUnavailable {
            language: language.to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}
