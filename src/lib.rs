//! ISIC Rev.4 taxonomy: code lookup and free-text search.
//!
//! ```
//! use isic4::Classifier;
//!
//! let classifier = Classifier::new("en", false).unwrap();
//! let class = classifier.get_class("0111").unwrap();
//! assert!(class.description.starts_with("Growing of cereals"));
//!
//! let hits = classifier.search("mining");
//! assert!(!hits.is_empty());
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    ApplicationError, ApplicationResult, Classifier, Hierarchy, SearchResult, SearchResults,
};
pub use config::Settings;
pub use domain::{Class, Division, DomainError, Group, Level, Section, TaxonomyNode};
pub use infrastructure::{BundledDataset, DataProvider, DirectoryDataset, InMemoryDataset};
