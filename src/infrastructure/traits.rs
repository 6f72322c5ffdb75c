//! I/O boundary traits for testability
//!
//! The classifier only sees datasets through [`DataProvider`], so it can be
//! tested against in-memory trees and pointed at other storage.

use std::collections::BTreeSet;

use crate::application::ApplicationResult;
use crate::domain::Section;

/// Source of fully populated section trees, one per language.
pub trait DataProvider: Send + Sync {
    /// Lowercase identifiers of every language this provider can serve.
    fn supported_languages(&self) -> BTreeSet<String>;

    /// Load the sections for `language` in dataset order.
    ///
    /// `language` is lowercase. Fails with `UnsupportedLanguage` for unknown
    /// languages and `DatasetUnavailable` when a known language's data
    /// cannot be read.
    fn load(&self, language: &str) -> ApplicationResult<Vec<Section>>;
}
