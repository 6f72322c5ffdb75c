//! Application layer: indexing, navigation and search
//!
//! This layer orchestrates domain logic and depends on the data provider boundary trait.

pub mod classifier;
pub mod error;
pub mod error_ext;
pub mod index;
pub mod search;

pub use classifier::{Classifier, DEFAULT_LANGUAGE};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use index::{normalize_code, CodeIndex, Taxonomy};
pub use search::{Hierarchy, Matcher, SearchResult, SearchResults};
