// src/fixer/sample.rs
// =============================================================================
// This module scaffolds the sample project's decision records.
//
// Links into ../../../sample-project/ point at a demonstration project that
// lives next to the documentation tree. Once any such link exists anywhere
// in the tree, the scaffolder ensures the sibling directory exists and
// drops in three fixed decision records. It never inspects individual link
// targets and never overwrites a record that is already there.
//
// A write failure on one record is logged and the remaining records
// proceed.
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use super::templates::render_sample_decision;

// The decision records the scaffolder maintains, filename and title.
// The number in the filename prefix becomes the record's ADR number.
const SAMPLE_DECISIONS: [(&str, &str); 3] = [
    ("001-database-architecture.md", "Database Architecture Decision"),
    ("002-api-authentication.md", "API Authentication Strategy"),
    ("003-legacy-data-migration.md", "Legacy Data Migration Approach"),
];

/// Directory of the sample decision records, relative to the parent of the
/// documentation root
const SAMPLE_DIR: &str = "sample-project/docs/adrs";

// Ensures the sample decision records exist next to the documentation tree.
// Returns the number of records created (or would-create in dry-run mode).
pub fn scaffold_sample_project(docs_dir: &Path, dry_run: bool) -> usize {
    info!("scaffolding sample project decision records");

    let Some(parent) = docs_dir.parent() else {
        warn!("documentation root has no parent directory, skipping scaffold");
        return 0;
    };
    let sample_dir = parent.join(SAMPLE_DIR);

    let mut files_created = 0;
    for (filename, title) in SAMPLE_DECISIONS {
        let path = sample_dir.join(filename);
        if path.exists() {
            continue;
        }

        if dry_run {
            info!("dry run: would create sample record {}", path.display());
            files_created += 1;
            continue;
        }

        match write_record(&path, title, filename) {
            Ok(()) => {
                info!("created sample record {}", path.display());
                files_created += 1;
            }
            Err(e) => error!("failed to create {}: {e:#}", path.display()),
        }
    }

    info!("created {files_created} sample records");
    files_created
}

fn write_record(path: &Path, title: &str, filename: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, render_sample_decision(title, filename))
        .with_context(|| format!("writing {}", path.display()))
}
