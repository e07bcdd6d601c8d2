// src/fixer/report.rs
// =============================================================================
// This module defines the report types the fix pipeline returns.
//
// Their JSON shape is a contract: the CLI prints them, persists them with
// --report, and derives the process exit code from
// validation.remaining_issues. Downstream consumers key off these exact
// field names, so they stay as they are.
// =============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// Per-category fix counts for one comprehensive run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixCounts {
    /// Stub documents created for missing link targets
    pub missing_files: usize,
    /// Research links rewritten to inline markers
    pub research_links: usize,
    /// Sample decision records scaffolded
    pub sample_links: usize,
}

impl FixCounts {
    pub fn total(&self) -> usize {
        self.missing_files + self.research_links + self.sample_links
    }
}

// The post-remediation validation pass: what this run wrote and what is
// still broken afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub files_created: usize,
    pub files_updated: usize,
    /// Issues left after remediation; non-zero makes the process exit 1
    pub remaining_issues: usize,
    /// Remaining issue counts, one entry per category bucket
    pub remaining_by_category: BTreeMap<String, usize>,
    pub created_files: Vec<String>,
    pub updated_files: Vec<String>,
}

// The aggregate summary of one comprehensive fix run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub initial_issues: usize,
    pub fixes_applied: FixCounts,
    pub total_fixes: usize,
    pub validation: ValidationReport,
    pub dry_run: bool,
}
