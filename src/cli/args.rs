//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// ISIC Rev.4 industrial activity classification: code lookup and free-text search
#[derive(Parser, Debug)]
#[command(name = "isic4")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dataset language (e.g. en, ar)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Match search queries with exact case
    #[arg(short, long, global = true)]
    pub case_sensitive: bool,

    /// Directory with <language>.json datasets
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Config file, applied on top of the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Turn debugging information on (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a section and its subtree
    Section {
        /// Section letter (A-U)
        code: String,
    },

    /// Show a division and its subtree
    Division {
        /// Two-digit division code
        code: String,
    },

    /// Show a group and its classes
    Group {
        /// Three-digit group code
        code: String,
    },

    /// Show a class
    Class {
        /// Four-digit class code
        code: String,
    },

    /// Look up a code of any level and show its ancestry
    Get {
        /// Section letter or 2-4 digit code
        code: String,
    },

    /// Search descriptions and codes
    Search {
        /// Text to look for
        query: String,
        /// Show each hit as a hierarchy tree
        #[arg(short, long)]
        tree: bool,
    },

    /// List supported languages
    Languages,

    /// Show effective settings
    Config {
        /// Print a commented template instead
        #[arg(long)]
        template: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
