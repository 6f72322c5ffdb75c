//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::{SearchResult, SearchResults};
use crate::domain::TaxonomyNode;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a node and everything below it.
pub fn node_tree(node: &impl TaxonomyNode) {
    print!("{}", node.to_tree());
}

/// One search hit: colored code, description, dimmed hierarchy path.
pub fn search_hit(hit: &SearchResult<'_>) {
    println!(
        "{:<8} {:<5} {}  {}",
        hit.level.to_string().dimmed(),
        hit.code.green().bold(),
        hit.description,
        format!("[{}]", hit.hierarchy).dimmed()
    );
}

/// All hits, either one per line or as hierarchy trees.
pub fn search_results(results: &SearchResults<'_>, as_tree: bool) {
    if as_tree {
        for hit in results {
            print!("{}", hit.hierarchy.to_tree());
        }
    } else {
        for hit in results {
            search_hit(hit);
        }
    }
}
