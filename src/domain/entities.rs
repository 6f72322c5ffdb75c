//! Domain entities: the four levels of the ISIC taxonomy
//!
//! Sections own divisions, divisions own groups, groups own classes.
//! Nodes carry no back references; ancestry is reconstructed by callers
//! walking down from a section.

use std::fmt;

use termtree::Tree;

/// Level of a node in the taxonomy, broadest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Section,
    Division,
    Group,
    Class,
}

impl Level {
    /// All levels in tree order.
    pub const ALL: [Level; 4] = [Level::Section, Level::Division, Level::Group, Level::Class];

    /// Lowercase name used in output and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Section => "section",
            Level::Division => "division",
            Level::Group => "group",
            Level::Class => "class",
        }
    }

    /// Length of a well-formed code at this level.
    pub fn code_len(&self) -> usize {
        match self {
            Level::Section => 1,
            Level::Division => 2,
            Level::Group => 3,
            Level::Class => 4,
        }
    }

    /// Whether `code` has the shape of a code at this level.
    ///
    /// Sections are a single ASCII letter (either case), the other levels
    /// are fixed-width ASCII digit strings.
    pub fn accepts(&self, code: &str) -> bool {
        if code.len() != self.code_len() {
            return false;
        }
        match self {
            Level::Section => code.chars().all(|c| c.is_ascii_alphabetic()),
            _ => code.chars().all(|c| c.is_ascii_digit()),
        }
    }

    /// Infer the level from the shape of a code.
    ///
    /// ```
    /// use isic4::domain::Level;
    /// assert_eq!(Level::of_code("a"), Some(Level::Section));
    /// assert_eq!(Level::of_code("0111"), Some(Level::Class));
    /// assert_eq!(Level::of_code("01a"), None);
    /// ```
    pub fn of_code(code: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.accepts(code))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities shared by every taxonomy node.
pub trait TaxonomyNode {
    fn level(&self) -> Level;
    fn code(&self) -> &str;
    fn description(&self) -> &str;
    fn child_count(&self) -> usize;

    /// Render the node and all of its descendants as a tree.
    fn to_tree(&self) -> Tree<String>;

    /// Single-line label used as tree node text.
    fn label(&self) -> String {
        format!("{}: {}", self.code(), self.description())
    }
}

/// Broadest level, identified by a single letter (A-U).
#[derive(Debug, Clone)]
pub struct Section {
    pub code: String,
    pub description: String,
    pub divisions: Vec<Division>,
}

/// Two-digit division within a section.
#[derive(Debug, Clone)]
pub struct Division {
    pub code: String,
    pub description: String,
    pub groups: Vec<Group>,
}

/// Three-digit group; its first two digits are the parent division code.
#[derive(Debug, Clone)]
pub struct Group {
    pub code: String,
    pub description: String,
    pub classes: Vec<Class>,
}

/// Four-digit leaf; its first three digits are the parent group code.
#[derive(Debug, Clone)]
pub struct Class {
    pub code: String,
    pub description: String,
}

impl Section {
    pub fn new(code: impl Into<String>, description: impl Into<String>, divisions: Vec<Division>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            divisions,
        }
    }
}

impl Division {
    pub fn new(code: impl Into<String>, description: impl Into<String>, groups: Vec<Group>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            groups,
        }
    }
}

impl Group {
    pub fn new(code: impl Into<String>, description: impl Into<String>, classes: Vec<Class>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            classes,
        }
    }
}

impl Class {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

// Identity is code + description. Children are deliberately not compared.
macro_rules! impl_node {
    ($ty:ty, $level:expr, $children:ident) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.code == other.code && self.description == other.description
            }
        }

        impl Eq for $ty {}

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}: {}", $level, self.code, self.description)
            }
        }

        impl TaxonomyNode for $ty {
            fn level(&self) -> Level {
                $level
            }

            fn code(&self) -> &str {
                &self.code
            }

            fn description(&self) -> &str {
                &self.description
            }

            fn child_count(&self) -> usize {
                self.$children.len()
            }

            fn to_tree(&self) -> Tree<String> {
                let leaves: Vec<_> = self.$children.iter().map(|c| c.to_tree()).collect();
                Tree::new(self.label()).with_leaves(leaves)
            }
        }
    };
}

impl_node!(Section, Level::Section, divisions);
impl_node!(Division, Level::Division, groups);
impl_node!(Group, Level::Group, classes);

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.description == other.description
    }
}

impl Eq for Class {}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", Level::Class, self.code, self.description)
    }
}

impl TaxonomyNode for Class {
    fn level(&self) -> Level {
        Level::Class
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn child_count(&self) -> usize {
        0
    }

    fn to_tree(&self) -> Tree<String> {
        Tree::new(self.label())
    }
}
