// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described by Rust structs
// and attributes, and clap generates the parsing code from them. Doc
// comments on the fields become the --help text.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fixer::DOC_EXTENSION;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "link-mender",
    version = "0.1.0",
    about = "A CLI tool to find and fix broken links in markdown documentation trees",
    long_about = "link-mender scans a documentation tree for [text](target) links, classifies \
                  the broken ones, and fixes them: missing targets get stub documents, dead \
                  research links become inline TODO markers, and sample-project references get \
                  placeholder decision records."
)]
pub struct Cli {
    /// Enable debug-level logging (the LINK_MENDER_LOG env var overrides this)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (check, fix)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a documentation tree for broken links without changing it
    ///
    /// Example: link-mender check ./docs
    Check {
        /// Root directory of the documentation tree
        docs_dir: PathBuf,

        /// Output the report in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// File extension of the documents to scan
        #[arg(long, default_value = DOC_EXTENSION)]
        extension: String,
    },

    /// Fix broken links: stub documents, inline markers, sample records
    ///
    /// Example: link-mender fix ./docs --dry-run
    Fix {
        /// Root directory of the documentation tree
        docs_dir: PathBuf,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output the summary in JSON format instead of text
        #[arg(long)]
        json: bool,

        /// Write the JSON summary report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// File extension of the documents to scan
        #[arg(long, default_value = DOC_EXTENSION)]
        extension: String,
    },
}
