//! Classifier: configured entry point for lookup and search
//!
//! Holds one [`Taxonomy`] snapshot for the active language. Changing the
//! language or the case policy builds a complete new snapshot first and
//! only then replaces the old one, so a failed reconfiguration leaves the
//! classifier exactly as it was.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::index::Taxonomy;
use crate::application::search::{search, SearchResult, SearchResults};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{Class, Division, Group, Level, Section};
use crate::infrastructure::dataset::{BundledDataset, DirectoryDataset};
use crate::infrastructure::traits::DataProvider;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Lookup and search over one language's taxonomy.
pub struct Classifier {
    provider: Arc<dyn DataProvider>,
    taxonomy: Taxonomy,
    case_sensitive: bool,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("language", &self.language())
            .field("case_sensitive", &self.case_sensitive)
            .field("sections", &self.taxonomy.sections().len())
            .finish()
    }
}

impl Classifier {
    /// Bundled datasets, [`DEFAULT_LANGUAGE`], case-insensitive search.
    pub fn with_defaults() -> ApplicationResult<Self> {
        Self::new(DEFAULT_LANGUAGE, false)
    }

    /// Create a classifier backed by the bundled datasets.
    ///
    /// `language` is case-insensitive. See [`Classifier::with_defaults`] for
    /// the default configuration.
    pub fn new(language: &str, case_sensitive: bool) -> ApplicationResult<Self> {
        Self::with_provider(Arc::new(BundledDataset), language, case_sensitive)
    }

    /// Create a classifier with a custom data provider.
    pub fn with_provider(
        provider: Arc<dyn DataProvider>,
        language: &str,
        case_sensitive: bool,
    ) -> ApplicationResult<Self> {
        let taxonomy = load_taxonomy(provider.as_ref(), language)?;
        Ok(Self {
            provider,
            taxonomy,
            case_sensitive,
        })
    }

    /// Create a classifier from layered settings.
    ///
    /// Uses the datasets in `data_dir` when set, the bundled ones otherwise.
    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        let provider = Self::provider_for(settings)?;
        Self::with_provider(provider, &settings.language, settings.case_sensitive)
    }

    /// Data provider selected by `settings`, without loading any language.
    pub fn provider_for(settings: &Settings) -> ApplicationResult<Arc<dyn DataProvider>> {
        Ok(match &settings.data_dir {
            Some(dir) => Arc::new(DirectoryDataset::new(dir)?),
            None => Arc::new(BundledDataset),
        })
    }

    /// Active language, always lowercase.
    pub fn language(&self) -> &str {
        self.taxonomy.language()
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Languages the data provider can serve.
    pub fn supported_languages(&self) -> BTreeSet<String> {
        self.provider.supported_languages()
    }

    /// Loaded sections in dataset order.
    pub fn sections(&self) -> &[Section] {
        self.taxonomy.sections()
    }

    /// Switch language. On error the previous language and index stay active.
    pub fn set_language(&mut self, language: &str) -> ApplicationResult<()> {
        self.reconfigure(language, self.case_sensitive)
    }

    /// Switch case policy. Rebuilds the index for the current language.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) -> ApplicationResult<()> {
        let language = self.language().to_string();
        self.reconfigure(&language, case_sensitive)
    }

    /// Reload and re-index, replacing the active state only on success.
    #[instrument(level = "debug", skip(self), fields(current = %self.language()))]
    pub fn reconfigure(&mut self, language: &str, case_sensitive: bool) -> ApplicationResult<()> {
        let taxonomy = load_taxonomy(self.provider.as_ref(), language)?;
        self.taxonomy = taxonomy;
        self.case_sensitive = case_sensitive;
        debug!(
            "reconfigured: language={}, case_sensitive={}",
            self.language(),
            self.case_sensitive
        );
        Ok(())
    }

    pub fn get_section(&self, code: &str) -> Option<&Section> {
        self.taxonomy.section(code)
    }

    pub fn get_division(&self, code: &str) -> Option<&Division> {
        self.taxonomy.division(code)
    }

    pub fn get_group(&self, code: &str) -> Option<&Group> {
        self.taxonomy.group(code)
    }

    pub fn get_class(&self, code: &str) -> Option<&Class> {
        self.taxonomy.class(code)
    }

    /// Look up a code of any level, inferring the level from its shape.
    ///
    /// Returns the node together with its ancestry.
    pub fn lookup(&self, code: &str) -> Option<SearchResult<'_>> {
        let level = Level::of_code(code)?;
        let path = self.taxonomy.path(level, code)?;
        let result = match (path.division, path.group, path.class) {
            (Some(d), Some(g), Some(c)) => SearchResult::class(path.section, d, g, c),
            (Some(d), Some(g), None) => SearchResult::group(path.section, d, g),
            (Some(d), None, _) => SearchResult::division(path.section, d),
            _ => SearchResult::section(path.section),
        };
        Some(result)
    }

    /// Find every node whose description or code contains `query`.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        search(self.taxonomy.sections(), query, self.case_sensitive)
    }
}

/// Resolve the language against the provider, load it and build a snapshot.
///
/// The language is checked before anything is loaded.
#[instrument(level = "debug", skip(provider))]
fn load_taxonomy(provider: &dyn DataProvider, language: &str) -> ApplicationResult<Taxonomy> {
    let language = language.to_lowercase();
    let supported = provider.supported_languages();
    if !supported.contains(&language) {
        return Err(ApplicationError::unsupported_language(language, supported));
    }
    let sections = provider.load(&language)?;
    Taxonomy::build(language, sections)
}
