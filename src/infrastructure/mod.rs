//! Infrastructure layer: dataset providers
//!
//! This layer implements the data provider boundary trait over bundled,
//! on-disk and in-memory datasets.

pub mod dataset;
pub mod traits;

pub use dataset::{parse_dataset, BundledDataset, DirectoryDataset, InMemoryDataset};
pub use traits::DataProvider;
