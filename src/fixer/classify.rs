// src/fixer/classify.rs
// =============================================================================
// This module decides whether a link is broken and which category it
// belongs to.
//
// The rules run in fixed priority order, first match wins:
// 1. External URLs, mail references and same-page anchors are out of scope
// 2. Targets from the broken research-link generator -> research_link
// 3. Targets into the sample project three levels up -> sample_project_link
// 4. Everything else is an existence check on the resolved path
//
// Two categories (broken_anchor, malformed_link) are reserved: the current
// rules never produce them, but report consumers expect their buckets.
// =============================================================================

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::resolve::resolve_link_path;
use super::scan::{line_context, scan_links};

/// Canonical extension of a documentation file
pub const DOC_EXTENSION: &str = "md";

/// Substring that marks output of the broken research-link generator
pub const RESEARCH_LINK_MARKER: &str = "perform_research_research_";

/// Substring that marks a reference into the sample project
pub const SAMPLE_PROJECT_MARKER: &str = "../../../sample-project/";

/// Recorded as the resolved path when resolution itself fails
pub const UNRESOLVABLE: &str = "unresolvable";

// Targets starting with any of these are valid by definition: external,
// mail, or same-page - none of them name a file we could check.
const OK_PREFIXES: [&str; 4] = ["http", "https", "mailto:", "#"];

// The remediation class assigned to a broken link.
//
// Category is a pure function of (target string, resolved-path existence)
// and never changes after assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Relative target that resolves to a path that does not exist
    MissingFile,
    /// Reserved: anchor targets are not validated yet
    BrokenAnchor,
    /// Target produced by the broken research-link generator
    ResearchLink,
    /// Target referencing the sample project
    SampleProjectLink,
    /// Reserved: the extractor drops malformed syntax before it gets here
    MalformedLink,
}

impl Category {
    /// The report bucket this category fills
    pub fn bucket_name(self) -> &'static str {
        match self {
            Category::MissingFile => "missing_files",
            Category::BrokenAnchor => "broken_anchors",
            Category::ResearchLink => "research_links",
            Category::SampleProjectLink => "sample_project_links",
            Category::MalformedLink => "malformed_links",
        }
    }
}

// The tagged result of classifying one link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    /// The link needs no remediation
    Ok,
    /// The link is broken and belongs to exactly one category
    Broken {
        category: Category,
        /// Resolved candidate path for missing files ("unresolvable" when
        /// resolution fails); None for marker-based categories
        resolved_path: Option<String>,
    },
}

// One broken-link record, as it appears in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    /// Source document, relative to the documentation root
    pub file: String,
    /// The display text between the brackets
    pub link_text: String,
    /// The target exactly as written
    pub url: String,
    /// Resolved candidate path, present for missing-file records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
    /// First source line containing the target, for human readers
    pub line_context: String,
}

// All broken links found in one scan, bucketed by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokenLinkReport {
    pub missing_files: Vec<BrokenLink>,
    pub broken_anchors: Vec<BrokenLink>,
    pub research_links: Vec<BrokenLink>,
    pub sample_project_links: Vec<BrokenLink>,
    pub malformed_links: Vec<BrokenLink>,
}

impl BrokenLinkReport {
    pub fn push(&mut self, category: Category, record: BrokenLink) {
        self.bucket_mut(category).push(record);
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<BrokenLink> {
        match category {
            Category::MissingFile => &mut self.missing_files,
            Category::BrokenAnchor => &mut self.broken_anchors,
            Category::ResearchLink => &mut self.research_links,
            Category::SampleProjectLink => &mut self.sample_project_links,
            Category::MalformedLink => &mut self.malformed_links,
        }
    }

    /// All buckets with their report names, in report order
    pub fn buckets(&self) -> [(&'static str, &[BrokenLink]); 5] {
        [
            ("missing_files", &self.missing_files),
            ("broken_anchors", &self.broken_anchors),
            ("research_links", &self.research_links),
            ("sample_project_links", &self.sample_project_links),
            ("malformed_links", &self.malformed_links),
        ]
    }

    pub fn total(&self) -> usize {
        self.buckets().iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Per-category counts; every bucket is present even when empty
    pub fn counts_by_category(&self) -> BTreeMap<String, usize> {
        self.buckets()
            .iter()
            .map(|(name, records)| (name.to_string(), records.len()))
            .collect()
    }
}

// Classifies one link target. First matching rule wins.
pub fn classify_target(source: &Path, url: &str, extension: &str) -> LinkVerdict {
    // Rule 1: external, mail and anchor targets are out of scope
    if OK_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
        return LinkVerdict::Ok;
    }

    // Rule 2: research-link generator output is broken wherever it points
    if url.contains(RESEARCH_LINK_MARKER) {
        return LinkVerdict::Broken {
            category: Category::ResearchLink,
            resolved_path: None,
        };
    }

    // Rule 3: sample-project references get scaffolding, not stubs
    if url.contains(SAMPLE_PROJECT_MARKER) {
        return LinkVerdict::Broken {
            category: Category::SampleProjectLink,
            resolved_path: None,
        };
    }

    // Rule 4: existence check on the resolved candidate path
    let resolved = match resolve_link_path(source, url) {
        Some(path) => path,
        None => {
            return LinkVerdict::Broken {
                category: Category::MissingFile,
                resolved_path: Some(UNRESOLVABLE.to_string()),
            }
        }
    };

    if resolved.exists() {
        return LinkVerdict::Ok;
    }

    // An extension-less reference to a sibling document with the canonical
    // extension counts as valid: "./guide" satisfied by "./guide.md".
    let suffix = format!(".{extension}");
    let with_extension = append_extension(&resolved, extension);
    if !url.ends_with(&suffix) && with_extension.exists() {
        return LinkVerdict::Ok;
    }

    // Record the extension-normalized candidate so the stub generator and
    // the report agree on where the file should be.
    let reported = if url.ends_with(&suffix) {
        resolved
    } else {
        with_extension
    };

    LinkVerdict::Broken {
        category: Category::MissingFile,
        resolved_path: Some(reported.display().to_string()),
    }
}

// Appends ".{extension}" to a path without replacing an existing suffix:
// "data.csv" becomes "data.csv.md", not "data.md".
pub(super) fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(".");
    os.push(extension);
    PathBuf::from(os)
}

// Runs extraction and classification over the whole tree and builds the
// bucketed report. Fails only when the root cannot be enumerated.
pub fn analyze_tree(root: &Path, extension: &str) -> Result<BrokenLinkReport> {
    info!("analyzing links under {}", root.display());

    let mut report = BrokenLinkReport::default();
    for occurrence in scan_links(root, extension)? {
        let verdict = classify_target(&occurrence.file, &occurrence.url, extension);
        if let LinkVerdict::Broken {
            category,
            resolved_path,
        } = verdict
        {
            let file = occurrence
                .file
                .strip_prefix(root)
                .unwrap_or(&occurrence.file)
                .display()
                .to_string();
            let line_context = line_context(&occurrence.file, &occurrence.url);
            debug!("{} in {file}: {}", category.bucket_name(), occurrence.url);
            report.push(
                category,
                BrokenLink {
                    file,
                    link_text: occurrence.text,
                    url: occurrence.url,
                    resolved_path,
                    line_context,
                },
            );
        }
    }

    info!("found {} potentially broken links", report.total());
    for (name, records) in report.buckets() {
        debug!("  {name}: {}", records.len());
    }

    Ok(report)
}
