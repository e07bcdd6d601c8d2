// src/fixer/rewrite.rs
// =============================================================================
// This module rewrites broken research links into inline markers.
//
// The research-link generator left targets that can never resolve, so the
// whole link construct is replaced with an HTML comment that keeps the
// original target visible to a human editor:
//
//   [notes](perform_research_research_x.md)
//     becomes
//   <!-- TODO: Fix research link: perform_research_research_x.md -->
//
// Matching is exact: the flagged target is escaped before it goes into the
// pattern, so only links whose target is byte-identical to a classified one
// are rewritten. Records are grouped by source document; each document is
// written back at most once, and only if a substitution changed it.
//
// A read or write failure on one document is logged and the remaining
// documents proceed.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use tracing::{error, info};

use super::classify::BrokenLink;

// Rewrites all research-link records in place. Returns the number of link
// records belonging to documents that actually changed.
pub fn rewrite_research_links(
    docs_dir: &Path,
    dry_run: bool,
    records: &[BrokenLink],
    updated: &mut BTreeSet<PathBuf>,
) -> usize {
    info!("rewriting {} research links", records.len());

    // Group records by source document so each file is read and written once
    let mut by_document: BTreeMap<&str, Vec<&BrokenLink>> = BTreeMap::new();
    for record in records {
        by_document
            .entry(record.file.as_str())
            .or_default()
            .push(record);
    }

    let mut links_rewritten = 0;
    for (file, links) in &by_document {
        match rewrite_document(docs_dir, dry_run, file, links, updated) {
            Ok(true) => links_rewritten += links.len(),
            Ok(false) => {}
            Err(e) => error!("failed to rewrite research links in {file}: {e:#}"),
        }
    }

    info!("rewrote {links_rewritten} research links");
    links_rewritten
}

fn rewrite_document(
    docs_dir: &Path,
    dry_run: bool,
    file: &str,
    links: &[&BrokenLink],
    updated: &mut BTreeSet<PathBuf>,
) -> Result<bool> {
    let path = docs_dir.join(file);
    let original =
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;

    let mut content = original.clone();
    for link in links {
        // The target is escaped so it matches byte-for-byte, never as a
        // pattern; NoExpand keeps the replacement literal as well.
        let pattern = Regex::new(&format!(r"\[([^\]]*)\]\({}\)", regex::escape(&link.url)))
            .context("building rewrite pattern")?;
        let marker = format!("<!-- TODO: Fix research link: {} -->", link.url);
        content = pattern.replace_all(&content, NoExpand(&marker)).into_owned();
    }

    if content == original {
        return Ok(false);
    }

    if dry_run {
        info!("dry run: would update {}", path.display());
        updated.insert(path);
        return Ok(true);
    }

    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    info!("updated research links in {}", path.display());
    updated.insert(path);
    Ok(true)
}
