//! Dataset providers and the JSON dataset format
//!
//! A dataset is one JSON document per language:
//!
//! ```json
//! {"sections": [{"section": "A", "description": "...", "divisions": [
//!     {"division": "01", "description": "...", "groups": [
//!         {"group": "011", "description": "...", "classes": [
//!             {"class": "0111", "description": "..."}]}]}]}]}
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Class, Division, Group, Section};
use crate::infrastructure::traits::DataProvider;

const BUNDLED: &[(&str, &str)] = &[
    ("ar", include_str!("../../data/ar.json")),
    ("en", include_str!("../../data/en.json")),
];

const DATASET_EXTENSION: &str = "json";

#[derive(Debug, Deserialize)]
struct RawDataset {
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    section: String,
    description: String,
    #[serde(default)]
    divisions: Vec<RawDivision>,
}

#[derive(Debug, Deserialize)]
struct RawDivision {
    division: String,
    description: String,
    #[serde(default)]
    groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    group: String,
    description: String,
    #[serde(default)]
    classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    class: String,
    description: String,
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        Section::new(
            raw.section,
            raw.description,
            raw.divisions.into_iter().map(Division::from).collect(),
        )
    }
}

impl From<RawDivision> for Division {
    fn from(raw: RawDivision) -> Self {
        Division::new(
            raw.division,
            raw.description,
            raw.groups.into_iter().map(Group::from).collect(),
        )
    }
}

impl From<RawGroup> for Group {
    fn from(raw: RawGroup) -> Self {
        Group::new(
            raw.group,
            raw.description,
            raw.classes.into_iter().map(Class::from).collect(),
        )
    }
}

impl From<RawClass> for Class {
    fn from(raw: RawClass) -> Self {
        Class::new(raw.class, raw.description)
    }
}

/// Parse a JSON dataset document into sections.
pub fn parse_dataset(language: &str, content: &str) -> ApplicationResult<Vec<Section>> {
    let raw: RawDataset =
        serde_json::from_str(content).map_err(|e| ApplicationError::InvalidDataset {
            language: language.to_string(),
            message: e.to_string(),
        })?;
    Ok(raw.sections.into_iter().map(Section::from).collect())
}

/// English and Arabic datasets compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledDataset;

impl DataProvider for BundledDataset {
    fn supported_languages(&self) -> BTreeSet<String> {
        BUNDLED.iter().map(|(lang, _)| lang.to_string()).collect()
    }

    #[instrument(level = "debug", skip(self))]
    fn load(&self, language: &str) -> ApplicationResult<Vec<Section>> {
        let (_, content) = BUNDLED
            .iter()
            .find(|(lang, _)| *lang == language)
            .ok_or_else(|| {
                ApplicationError::unsupported_language(language, self.supported_languages())
            })?;
        parse_dataset(language, content)
    }
}

/// Datasets stored as `<language>.json` files in one directory.
///
/// Languages are discovered once, at construction. Files are read on
/// every load. Symlinked files are followed; two files whose stems differ
/// only in case are rejected.
#[derive(Debug, Clone)]
pub struct DirectoryDataset {
    dir: PathBuf,
    files: BTreeMap<String, PathBuf>,
}

impl DirectoryDataset {
    pub fn new(dir: impl AsRef<Path>) -> ApplicationResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut files = BTreeMap::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| ApplicationError::Config {
                message: format!("scan data dir {}: {}", dir.display(), e),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(DATASET_EXTENSION)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(previous) = files.insert(stem.to_lowercase(), path.to_path_buf()) {
                return Err(ApplicationError::Config {
                    message: format!(
                        "ambiguous datasets for language '{}': {} and {}",
                        stem.to_lowercase(),
                        previous.display(),
                        path.display()
                    ),
                });
            }
        }

        debug!(
            "discovered {} dataset(s) in {}: {:?}",
            files.len(),
            dir.display(),
            files.keys().collect::<Vec<_>>()
        );
        Ok(Self { dir, files })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DataProvider for DirectoryDataset {
    fn supported_languages(&self) -> BTreeSet<String> {
        self.files.keys().cloned().collect()
    }

    #[instrument(level = "debug", skip(self))]
    fn load(&self, language: &str) -> ApplicationResult<Vec<Section>> {
        let path = self.files.get(language).ok_or_else(|| {
            ApplicationError::unsupported_language(language, self.supported_languages())
        })?;
        let content = std::fs::read_to_string(path).with_dataset_context(language, path)?;
        parse_dataset(language, &content)
    }
}

/// Pre-built section trees keyed by language.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDataset {
    languages: BTreeMap<String, Vec<Section>>,
}

impl InMemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: &str, sections: Vec<Section>) -> Self {
        self.languages.insert(language.to_lowercase(), sections);
        self
    }
}

impl DataProvider for InMemoryDataset {
    fn supported_languages(&self) -> BTreeSet<String> {
        self.languages.keys().cloned().collect()
    }

    fn load(&self, language: &str) -> ApplicationResult<Vec<Section>> {
        self.languages.get(language).cloned().ok_or_else(|| {
            ApplicationError::unsupported_language(language, self.supported_languages())
        })
    }
}
