// src/fixer/scan.rs
// =============================================================================
// This module extracts links from a documentation tree.
//
// Link syntax is the markdown inline form [display text](target), matched
// with a single regex pass over the raw text:
// - display text is anything up to the closing bracket
// - target is anything up to the closing parenthesis
// - unbalanced brackets simply produce no match, never an error
//
// The tree walk uses the `ignore` crate with its standard filters disabled,
// so hidden and gitignored documents are scanned like everything else.
//
// Error isolation is per file: a document that cannot be read is logged and
// contributes zero links. Only a root directory that cannot be enumerated
// at all is a hard error.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use ignore::WalkBuilder;
use regex::Regex;
use tracing::warn;

// The link pattern shared by extraction and tests.
// Display text excludes ']', the target excludes ')'.
const LINK_PATTERN: &str = r"\[([^\]]*)\]\(([^)]+)\)";

// One link occurrence inside a document. Ephemeral: created during a scan,
// discarded after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// Absolute path of the document containing the link
    pub file: PathBuf,
    /// The display text between the brackets
    pub text: String,
    /// The target exactly as written between the parentheses
    pub url: String,
}

// Compiles the link pattern. The pattern is a constant and known to be
// valid.
pub fn link_pattern() -> Regex {
    Regex::new(LINK_PATTERN).expect("link pattern is valid")
}

// Extracts all (text, target) pairs from a document's content, in order of
// first appearance. Pure - no filesystem access.
pub fn extract_links(pattern: &Regex, content: &str) -> Vec<(String, String)> {
    pattern
        .captures_iter(content)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

// Walks the tree under `root` and yields one LinkOccurrence per link in
// every document whose extension matches `extension`.
//
// The sequence is lazy: documents are opened one at a time as the caller
// iterates. Order across documents follows filesystem traversal order and
// is not guaranteed stable across platforms; order within one document is
// order of appearance.
pub fn scan_links(
    root: &Path,
    extension: &str,
) -> Result<impl Iterator<Item = LinkOccurrence>> {
    if !root.is_dir() {
        bail!("documentation root {} is not a directory", root.display());
    }

    let pattern = link_pattern();
    let extension = extension.to_string();

    // Raw walk: no gitignore handling, no hidden-file filtering. We want
    // every document in the tree.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .build();

    Ok(walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(move |entry| {
            entry.file_type().is_some_and(|ft| ft.is_file())
                && entry.path().extension().and_then(|ext| ext.to_str())
                    == Some(extension.as_str())
        })
        .flat_map(move |entry| read_document_links(entry.path(), &pattern)))
}

// Reads one document and extracts its links. A read failure (I/O error or
// non-UTF-8 content) skips the document; the scan continues.
fn read_document_links(path: &Path, pattern: &Regex) -> Vec<LinkOccurrence> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("skipping {}: {e}", path.display());
            return Vec::new();
        }
    };

    extract_links(pattern, &content)
        .into_iter()
        .map(|(text, url)| LinkOccurrence {
            file: path.to_path_buf(),
            text,
            url,
        })
        .collect()
}

// Recovers the source line where a target appears, by substring search.
// Used to attach human-readable context to broken-link records.
//
// Returns "Context not found" when no line contains the target, and
// "Error reading context" when the document cannot be re-read.
pub fn line_context(path: &Path, url: &str) -> String {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return "Error reading context".to_string(),
    };

    for (index, line) in content.lines().enumerate() {
        if line.contains(url) {
            return format!("Line {}: {}", index + 1, line.trim());
        }
    }

    "Context not found".to_string()
}
