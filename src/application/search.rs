//! Substring search across all taxonomy levels
//!
//! The forest is walked depth-first in dataset order and every node is
//! tested, so results come out in pre-order: a section before its
//! divisions, a division before its groups, and so on. The ancestry of
//! the current node is threaded through the walk as plain arguments.

use std::fmt;

use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::{Class, Division, Group, Level, Section, TaxonomyNode};

/// Ancestor chain of a search hit, borrowed from the classifier's tree.
///
/// `section` is always present; deeper levels are present down to the
/// level of the hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hierarchy<'a> {
    pub section: &'a Section,
    pub division: Option<&'a Division>,
    pub group: Option<&'a Group>,
    pub class: Option<&'a Class>,
}

impl<'a> Hierarchy<'a> {
    /// Codes from the section down to the deepest present level.
    pub fn path(&self) -> Vec<&'a str> {
        let mut path = vec![self.section.code.as_str()];
        path.extend(self.division.map(|d| d.code.as_str()));
        path.extend(self.group.map(|g| g.code.as_str()));
        path.extend(self.class.map(|c| c.code.as_str()));
        path
    }

    /// The deepest present level.
    pub fn level(&self) -> Level {
        match (self.division, self.group, self.class) {
            (_, _, Some(_)) => Level::Class,
            (_, Some(_), None) => Level::Group,
            (Some(_), None, None) => Level::Division,
            (None, None, None) => Level::Section,
        }
    }

    /// Ancestry as a single chain: section -> division -> group -> class.
    pub fn to_tree(&self) -> Tree<String> {
        let mut labels = vec![self.section.label()];
        labels.extend(self.division.map(|d| d.label()));
        labels.extend(self.group.map(|g| g.label()));
        labels.extend(self.class.map(|c| c.label()));

        let mut tree: Option<Tree<String>> = None;
        for label in labels.into_iter().rev() {
            tree = Some(match tree {
                Some(child) => Tree::new(label).with_leaves([child]),
                None => Tree::new(label),
            });
        }
        tree.unwrap_or_else(|| Tree::new(String::new()))
    }
}

impl fmt::Display for Hierarchy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path().join(" > "))
    }
}

/// One matching node with its ancestry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub level: Level,
    pub code: &'a str,
    pub description: &'a str,
    pub hierarchy: Hierarchy<'a>,
}

impl<'a> SearchResult<'a> {
    fn from_node(node: &'a impl TaxonomyNode, hierarchy: Hierarchy<'a>) -> Self {
        Self {
            level: node.level(),
            code: node.code(),
            description: node.description(),
            hierarchy,
        }
    }

    pub(crate) fn section(section: &'a Section) -> Self {
        Self::from_node(
            section,
            Hierarchy {
                section,
                division: None,
                group: None,
                class: None,
            },
        )
    }

    pub(crate) fn division(section: &'a Section, division: &'a Division) -> Self {
        Self::from_node(
            division,
            Hierarchy {
                section,
                division: Some(division),
                group: None,
                class: None,
            },
        )
    }

    pub(crate) fn group(section: &'a Section, division: &'a Division, group: &'a Group) -> Self {
        Self::from_node(
            group,
            Hierarchy {
                section,
                division: Some(division),
                group: Some(group),
                class: None,
            },
        )
    }

    pub(crate) fn class(
        section: &'a Section,
        division: &'a Division,
        group: &'a Group,
        class: &'a Class,
    ) -> Self {
        Self::from_node(
            class,
            Hierarchy {
                section,
                division: Some(division),
                group: Some(group),
                class: Some(class),
            },
        )
    }
}

impl fmt::Display for SearchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} [{}]",
            self.level, self.code, self.description, self.hierarchy
        )
    }
}

/// Fully materialized, ordered search results.
///
/// Two collections are equal iff their ordered result lists are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults<'a> {
    results: Vec<SearchResult<'a>>,
}

impl<'a> SearchResults<'a> {
    pub fn new(results: Vec<SearchResult<'a>>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult<'a>> {
        self.results.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult<'a>> {
        self.results.iter()
    }

    pub fn results(&self) -> &[SearchResult<'a>] {
        &self.results
    }

    /// One ancestry chain per result under a common root.
    pub fn to_tree(&self) -> Tree<String> {
        let root = format!("{} result(s)", self.len());
        Tree::new(root).with_leaves(self.results.iter().map(|r| r.hierarchy.to_tree()))
    }
}

impl<'a> IntoIterator for SearchResults<'a> {
    type Item = SearchResult<'a>;
    type IntoIter = std::vec::IntoIter<SearchResult<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'r, 'a> IntoIterator for &'r SearchResults<'a> {
    type Item = &'r SearchResult<'a>;
    type IntoIter = std::slice::Iter<'r, SearchResult<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl fmt::Display for SearchResults<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.is_empty() {
            return write!(f, "SearchResults(<empty>)");
        }
        writeln!(f, "SearchResults({}):", self.results.len())?;
        for result in &self.results {
            writeln!(f, "  {}", result)?;
        }
        Ok(())
    }
}

/// Substring matcher with the query folded once up front.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: String,
    case_sensitive: bool,
}

impl Matcher {
    pub fn new(query: &str, case_sensitive: bool) -> Self {
        let query = if case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        Self {
            query,
            case_sensitive,
        }
    }

    /// True if the query occurs in the node's description or code.
    ///
    /// An empty query matches every node.
    pub fn matches(&self, node: &impl TaxonomyNode) -> bool {
        self.contains(node.description()) || self.contains(node.code())
    }

    fn contains(&self, haystack: &str) -> bool {
        if self.case_sensitive {
            haystack.contains(&self.query)
        } else {
            haystack.to_lowercase().contains(&self.query)
        }
    }
}

/// Search every node of `sections` in pre-order.
#[instrument(level = "debug", skip(sections))]
pub fn search<'a>(sections: &'a [Section], query: &str, case_sensitive: bool) -> SearchResults<'a> {
    let matcher = Matcher::new(query, case_sensitive);
    let mut results = Vec::new();

    for section in sections {
        visit_section(&matcher, section, &mut results);
    }

    debug!("search '{}': {} result(s)", query, results.len());
    SearchResults::new(results)
}

fn visit_section<'a>(matcher: &Matcher, section: &'a Section, out: &mut Vec<SearchResult<'a>>) {
    if matcher.matches(section) {
        out.push(SearchResult::section(section));
    }
    for division in &section.divisions {
        visit_division(matcher, section, division, out);
    }
}

fn visit_division<'a>(
    matcher: &Matcher,
    section: &'a Section,
    division: &'a Division,
    out: &mut Vec<SearchResult<'a>>,
) {
    if matcher.matches(division) {
        out.push(SearchResult::division(section, division));
    }
    for group in &division.groups {
        visit_group(matcher, section, division, group, out);
    }
}

fn visit_group<'a>(
    matcher: &Matcher,
    section: &'a Section,
    division: &'a Division,
    group: &'a Group,
    out: &mut Vec<SearchResult<'a>>,
) {
    if matcher.matches(group) {
        out.push(SearchResult::group(section, division, group));
    }
    for class in &group.classes {
        if matcher.matches(class) {
            out.push(SearchResult::class(section, division, group, class));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sections() -> Vec<Section> {
        vec![
            Section::new(
                "A",
                "Agriculture",
                vec![Division::new(
                    "01",
                    "Crop production",
                    vec![Group::new(
                        "011",
                        "Growing of crops",
                        vec![Class::new("0111", "Growing of cereals")],
                    )],
                )],
            ),
            Section::new(
                "B",
                "Mining and quarrying",
                vec![Division::new(
                    "05",
                    "Mining of coal",
                    vec![Group::new("051", "Hard coal", vec![Class::new("0510", "Hard coal")])],
                )],
            ),
            Section::new(
                "C",
                "Manufacturing",
                vec![Division::new(
                    "28",
                    "Machinery",
                    vec![Group::new(
                        "282",
                        "Special-purpose machinery",
                        vec![Class::new("2824", "Machinery for mining")],
                    )],
                )],
            ),
        ]
    }

    fn codes<'a>(results: &SearchResults<'a>) -> Vec<&'a str> {
        results.iter().map(|r| r.code).collect()
    }

    #[rstest]
    fn test_results_follow_preorder(sections: Vec<Section>) {
        let results = search(&sections, "mining", false);
        assert_eq!(codes(&results), vec!["B", "05", "2824"]);
        assert_eq!(results.get(0).unwrap().level, Level::Section);
        assert_eq!(results.get(2).unwrap().level, Level::Class);
    }

    #[rstest]
    fn test_case_sensitive_search_respects_case(sections: Vec<Section>) {
        let results = search(&sections, "Mining", true);
        assert_eq!(codes(&results), vec!["B", "05"]);
        assert!(search(&sections, "MINING", true).is_empty());
    }

    #[rstest]
    fn test_code_substring_matches(sections: Vec<Section>) {
        let results = search(&sections, "051", false);
        assert_eq!(codes(&results), vec!["051", "0510"]);
    }

    #[rstest]
    fn test_empty_query_matches_everything(sections: Vec<Section>) {
        assert_eq!(search(&sections, "", false).len(), 12);
    }

    #[rstest]
    fn test_hierarchy_of_class_hit(sections: Vec<Section>) {
        let results = search(&sections, "2824", false);
        let hit = results.get(0).unwrap();
        assert_eq!(hit.hierarchy.path(), vec!["C", "28", "282", "2824"]);
        assert_eq!(hit.hierarchy.level(), Level::Class);
        assert_eq!(hit.hierarchy.section, &sections[2]);
        assert_eq!(hit.hierarchy.to_string(), "C > 28 > 282 > 2824");
    }

    #[rstest]
    fn test_hierarchy_of_section_hit_has_only_section(sections: Vec<Section>) {
        let results = search(&sections, "Agriculture", false);
        let hit = results.get(0).unwrap();
        assert_eq!(hit.hierarchy.level(), Level::Section);
        assert!(hit.hierarchy.division.is_none());
    }

    #[rstest]
    fn test_display_lists_results(sections: Vec<Section>) {
        let rendered = search(&sections, "coal", false).to_string();
        assert!(rendered.starts_with("SearchResults(3):"));
        assert!(rendered.contains("division 05: Mining of coal [B > 05]"));
    }

    #[rstest]
    fn test_empty_results_render_marker(sections: Vec<Section>) {
        let results = search(&sections, "nothing-here", false);
        assert!(results.is_empty());
        assert_eq!(results.to_string(), "SearchResults(<empty>)");
    }

    #[rstest]
    fn test_tree_has_one_chain_per_result(sections: Vec<Section>) {
        let tree = search(&sections, "mining", false).to_tree();
        assert_eq!(tree.leaves.len(), 3);
        assert!(tree.to_string().contains("2824: Machinery for mining"));
    }

    #[test]
    fn test_matcher_folds_unicode() {
        let matcher = Matcher::new("ÉLEVAGE", false);
        assert!(matcher.matches(&Class::new("0141", "Élevage de bovins")));
    }
}
