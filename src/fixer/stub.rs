// src/fixer/stub.rs
// =============================================================================
// This module creates stub documents for missing link targets.
//
// Per record:
// 1. Take the classifier's resolved path; recompute from the source
//    document if resolution failed there
// 2. Force the document extension when the path has none
// 3. Skip targets already created this run (two links can point at the
//    same missing file)
// 4. Pick a template by the section the target points into, create parent
//    directories, write
//
// A write failure skips that target and the loop continues. In dry-run
// mode nothing touches the filesystem, but the target still counts as
// created so dry and real runs report the same numbers.
// =============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::classify::{append_extension, BrokenLink, UNRESOLVABLE};
use super::resolve::resolve_link_path;
use super::templates::{self, StubKind};

// Creates stub documents for all missing-file records. Returns the number
// of files created (or that would be created in dry-run mode).
pub fn create_missing_stubs(
    docs_dir: &Path,
    dry_run: bool,
    records: &[BrokenLink],
    created: &mut BTreeSet<PathBuf>,
    extension: &str,
) -> usize {
    info!(
        "creating stub documents for {} missing link targets",
        records.len()
    );

    let mut files_created = 0;
    for record in records {
        match create_stub(docs_dir, dry_run, record, created, extension) {
            Ok(true) => files_created += 1,
            Ok(false) => {}
            Err(e) => error!("failed to create stub for {}: {e:#}", record.url),
        }
    }

    info!("created {files_created} stub documents");
    files_created
}

fn create_stub(
    docs_dir: &Path,
    dry_run: bool,
    record: &BrokenLink,
    created: &mut BTreeSet<PathBuf>,
    extension: &str,
) -> Result<bool> {
    let target = match stub_target_path(docs_dir, record) {
        Some(path) => path,
        None => {
            debug!("no usable target path for {}, skipping", record.url);
            return Ok(false);
        }
    };

    // "guide" becomes "guide.md"; "data.csv" keeps its suffix
    let target = if target.extension().is_none() {
        append_extension(&target, extension)
    } else {
        target
    };

    // At most one stub per target path per run
    if created.contains(&target) {
        debug!("already created this run, skipping {}", target.display());
        return Ok(false);
    }

    let stem = target
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("untitled");
    let content = templates::render_stub(StubKind::for_target(&record.url), stem);

    if dry_run {
        info!("dry run: would create {}", target.display());
        created.insert(target);
        return Ok(true);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(&target, content).with_context(|| format!("writing {}", target.display()))?;

    info!("created {}", target.display());
    created.insert(target);
    Ok(true)
}

// Final target path for a record: the classifier's resolved path when it
// has one, otherwise re-resolved from the source document and raw target.
fn stub_target_path(docs_dir: &Path, record: &BrokenLink) -> Option<PathBuf> {
    match record.resolved_path.as_deref() {
        Some(path) if path != UNRESOLVABLE => Some(PathBuf::from(path)),
        _ => resolve_link_path(&docs_dir.join(&record.file), &record.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixer::classify::DOC_EXTENSION;

    fn record(file: &str, url: &str, resolved_path: Option<String>) -> BrokenLink {
        BrokenLink {
            file: file.to_string(),
            link_text: "text".to_string(),
            url: url.to_string(),
            resolved_path,
            line_context: "Line 1: test".to_string(),
        }
    }

    #[test]
    fn test_creates_stub_with_intermediate_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("reference/deep/api.md");
        let rec = record(
            "index.md",
            "reference/deep/api.md",
            Some(target.display().to_string()),
        );
        let mut created = BTreeSet::new();

        let count =
            create_missing_stubs(tmp.path(), false, &[rec], &mut created, DOC_EXTENSION);

        assert_eq!(count, 1);
        let content = fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("# Api Reference\n"));
        assert!(created.contains(&target));
    }

    #[test]
    fn test_forces_document_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let bare = tmp.path().join("missing-page");
        let rec = record("index.md", "./missing-page", Some(bare.display().to_string()));
        let mut created = BTreeSet::new();

        create_missing_stubs(tmp.path(), false, &[rec], &mut created, DOC_EXTENSION);

        let target = tmp.path().join("missing-page.md");
        assert!(target.exists());
        assert!(!bare.exists());
        let content = fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("# Missing Page\n"));
    }

    #[test]
    fn test_duplicate_targets_are_created_once() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("shared.md");
        let records = [
            record("a.md", "./shared", Some(target.display().to_string())),
            record("b.md", "./shared", Some(target.display().to_string())),
        ];
        let mut created = BTreeSet::new();

        let count =
            create_missing_stubs(tmp.path(), false, &records, &mut created, DOC_EXTENSION);

        assert_eq!(count, 1);
        assert_eq!(created.len(), 1);
        assert!(target.exists());
    }

    #[test]
    fn test_unresolvable_record_recomputes_from_source() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("guides")).unwrap();
        let rec = record(
            "guides/index.md",
            "./lost-page",
            Some(UNRESOLVABLE.to_string()),
        );
        let mut created = BTreeSet::new();

        let count =
            create_missing_stubs(tmp.path(), false, &[rec], &mut created, DOC_EXTENSION);

        assert_eq!(count, 1);
        assert!(tmp.path().join("guides/lost-page.md").exists());
    }

    #[test]
    fn test_dry_run_counts_but_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("reference/api.md");
        let rec = record(
            "index.md",
            "reference/api.md",
            Some(target.display().to_string()),
        );
        let mut created = BTreeSet::new();

        let count =
            create_missing_stubs(tmp.path(), true, &[rec], &mut created, DOC_EXTENSION);

        assert_eq!(count, 1);
        assert!(!target.exists());
        assert!(!tmp.path().join("reference").exists());
        // The would-create path is still tracked for reporting
        assert!(created.contains(&target));
    }

    #[test]
    fn test_empty_url_without_resolved_path_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let rec = record("index.md", "", Some(UNRESOLVABLE.to_string()));
        let mut created = BTreeSet::new();

        let count =
            create_missing_stubs(tmp.path(), false, &[rec], &mut created, DOC_EXTENSION);

        assert_eq!(count, 0);
        assert!(created.is_empty());
    }
}
