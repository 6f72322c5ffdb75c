//! Code index over a loaded taxonomy
//!
//! One map per level from normalized code to the node's position in the
//! section forest. Positions are resolved against the owning [`Taxonomy`]
//! on lookup, so the index never borrows the tree it describes.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::application::ApplicationResult;
use crate::domain::{validate_sections, Class, Division, Group, Level, Section};

/// Normalize a code for indexing and lookup.
///
/// Letters are uppercased; digits are kept verbatim, so `"01"` and `"1"`
/// stay distinct.
pub fn normalize_code(code: &str) -> String {
    code.to_ascii_uppercase()
}

/// Per-level code maps. Values are index paths into the section list.
#[derive(Debug, Default, Clone)]
pub struct CodeIndex {
    sections: HashMap<String, usize>,
    divisions: HashMap<String, [usize; 2]>,
    groups: HashMap<String, [usize; 3]>,
    classes: HashMap<String, [usize; 4]>,
}

impl CodeIndex {
    /// Index every node of `sections`.
    pub fn build(sections: &[Section]) -> Self {
        let mut index = Self::default();

        for (s, section) in sections.iter().enumerate() {
            index.sections.insert(normalize_code(&section.code), s);

            for (d, division) in section.divisions.iter().enumerate() {
                index.divisions.insert(normalize_code(&division.code), [s, d]);

                for (g, group) in division.groups.iter().enumerate() {
                    index.groups.insert(normalize_code(&group.code), [s, d, g]);

                    for (c, class) in group.classes.iter().enumerate() {
                        index.classes.insert(normalize_code(&class.code), [s, d, g, c]);
                    }
                }
            }
        }
        index
    }

    /// Number of indexed codes at `level`.
    pub fn len(&self, level: Level) -> usize {
        match level {
            Level::Section => self.sections.len(),
            Level::Division => self.divisions.len(),
            Level::Group => self.groups.len(),
            Level::Class => self.classes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Immutable snapshot: one language's sections plus their index.
///
/// A classifier swaps whole snapshots on reconfiguration; a snapshot is
/// never modified after [`Taxonomy::build`] returns.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    language: String,
    sections: Vec<Section>,
    index: CodeIndex,
}

impl Taxonomy {
    /// Validate the tree invariants and index the sections.
    pub fn build(language: impl Into<String>, sections: Vec<Section>) -> ApplicationResult<Self> {
        let language = language.into();
        validate_sections(&sections)?;
        let index = CodeIndex::build(&sections);
        debug!(
            "indexed '{}': {} sections, {} divisions, {} groups, {} classes",
            language,
            index.len(Level::Section),
            index.len(Level::Division),
            index.len(Level::Group),
            index.len(Level::Class),
        );
        Ok(Self {
            language,
            sections,
            index,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn index(&self) -> &CodeIndex {
        &self.index
    }

    pub fn section(&self, code: &str) -> Option<&Section> {
        let found = self
            .index
            .sections
            .get(&normalize_code(code))
            .and_then(|&s| self.sections.get(s));
        log_miss(Level::Section, code, found.is_none());
        found
    }

    pub fn division(&self, code: &str) -> Option<&Division> {
        let found = self
            .index
            .divisions
            .get(&normalize_code(code))
            .and_then(|&[s, d]| self.sections.get(s)?.divisions.get(d));
        log_miss(Level::Division, code, found.is_none());
        found
    }

    pub fn group(&self, code: &str) -> Option<&Group> {
        let found = self
            .index
            .groups
            .get(&normalize_code(code))
            .and_then(|&[s, d, g]| self.sections.get(s)?.divisions.get(d)?.groups.get(g));
        log_miss(Level::Group, code, found.is_none());
        found
    }

    pub fn class(&self, code: &str) -> Option<&Class> {
        let found = self
            .index
            .classes
            .get(&normalize_code(code))
            .and_then(|&[s, d, g, c]| {
                self.sections
                    .get(s)?
                    .divisions
                    .get(d)?
                    .groups
                    .get(g)?
                    .classes
                    .get(c)
            });
        log_miss(Level::Class, code, found.is_none());
        found
    }

    /// Ancestor chain of the node with `code` at `level`, the node included.
    pub(crate) fn path(&self, level: Level, code: &str) -> Option<NodePath<'_>> {
        let key = normalize_code(code);
        let positions: Vec<usize> = match level {
            Level::Section => vec![*self.index.sections.get(&key)?],
            Level::Division => self.index.divisions.get(&key)?.to_vec(),
            Level::Group => self.index.groups.get(&key)?.to_vec(),
            Level::Class => self.index.classes.get(&key)?.to_vec(),
        };

        let section = self.sections.get(positions[0])?;
        let division = match positions.get(1) {
            Some(&d) => Some(section.divisions.get(d)?),
            None => None,
        };
        let group = match (division, positions.get(2)) {
            (Some(division), Some(&g)) => Some(division.groups.get(g)?),
            _ => None,
        };
        let class = match (group, positions.get(3)) {
            (Some(group), Some(&c)) => Some(group.classes.get(c)?),
            _ => None,
        };
        Some(NodePath {
            section,
            division,
            group,
            class,
        })
    }
}

/// Borrowed ancestor chain resolved from the index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodePath<'a> {
    pub section: &'a Section,
    pub division: Option<&'a Division>,
    pub group: Option<&'a Group>,
    pub class: Option<&'a Class>,
}

fn log_miss(level: Level, code: &str, missed: bool) {
    if missed {
        trace!("{} '{}' not found", level, code);
    }
}
