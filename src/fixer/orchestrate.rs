// src/fixer/orchestrate.rs
// =============================================================================
// This module runs the full fix pipeline over one documentation tree.
//
// LinkFixer owns the configuration and the run-scoped bookkeeping: the sets
// of paths created and updated so far. The remediators receive that state
// explicitly; nothing lives in process-wide globals, so two fixers over two
// trees never interfere.
//
// One comprehensive run is: analyze -> remediate per category -> re-analyze.
// The three remediators touch disjoint categories and run in a fixed order;
// each finishes (with per-item failures logged) before the validation
// re-scan starts.
//
// Concurrent runs over the same tree are unsupported and may race on file
// creation.
// =============================================================================

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use super::classify::{analyze_tree, BrokenLinkReport, DOC_EXTENSION};
use super::report::{FixCounts, FixSummary, ValidationReport};
use super::rewrite::rewrite_research_links;
use super::sample::scaffold_sample_project;
use super::stub::create_missing_stubs;

// Drives one fix run over one documentation tree.
pub struct LinkFixer {
    docs_dir: PathBuf,
    extension: String,
    dry_run: bool,
    // Paths written this run; ordered so the report lists are deterministic
    created_files: BTreeSet<PathBuf>,
    updated_files: BTreeSet<PathBuf>,
}

impl LinkFixer {
    pub fn new(docs_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        let docs_dir = docs_dir.into();
        info!(
            "initialized link fixer for {} (dry run: {dry_run})",
            docs_dir.display()
        );
        LinkFixer {
            docs_dir,
            extension: DOC_EXTENSION.to_string(),
            dry_run,
            created_files: BTreeSet::new(),
            updated_files: BTreeSet::new(),
        }
    }

    /// Overrides the document extension the scan filters on.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Classification only: scans the tree and buckets every broken link.
    pub fn analyze(&self) -> Result<BrokenLinkReport> {
        analyze_tree(&self.docs_dir, &self.extension)
    }

    /// The full pipeline: analyze, remediate each category, validate.
    pub fn run_comprehensive_fix(&mut self) -> Result<FixSummary> {
        info!("starting comprehensive documentation link fix");

        let broken = self.analyze()?;
        let initial_issues = broken.total();

        let fixes_applied = FixCounts {
            missing_files: create_missing_stubs(
                &self.docs_dir,
                self.dry_run,
                &broken.missing_files,
                &mut self.created_files,
                &self.extension,
            ),
            research_links: rewrite_research_links(
                &self.docs_dir,
                self.dry_run,
                &broken.research_links,
                &mut self.updated_files,
            ),
            // The scaffolder's action is unconditional, so it only runs when
            // at least one sample link exists somewhere in the tree
            sample_links: if broken.sample_project_links.is_empty() {
                0
            } else {
                scaffold_sample_project(&self.docs_dir, self.dry_run)
            },
        };

        let validation = self.validate()?;
        let total_fixes = fixes_applied.total();
        info!("comprehensive fix complete: fixed {total_fixes} issues");

        Ok(FixSummary {
            initial_issues,
            fixes_applied,
            total_fixes,
            validation,
            dry_run: self.dry_run,
        })
    }

    /// Re-scans the tree and pairs the result with this run's bookkeeping.
    pub fn validate(&self) -> Result<ValidationReport> {
        info!("validating applied fixes");

        let remaining = self.analyze()?;
        let report = ValidationReport {
            files_created: self.created_files.len(),
            files_updated: self.updated_files.len(),
            remaining_issues: remaining.total(),
            remaining_by_category: remaining.counts_by_category(),
            created_files: self
                .created_files
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            updated_files: self
                .updated_files
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        };

        info!(
            "validation: {} files created, {} files updated, {} issues remaining",
            report.files_created, report.files_updated, report.remaining_issues
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_page_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let docs_dir = tmp.path().join("docs");
        write(&docs_dir.join("index.md"), "[x](./missing-page)\n");

        let mut fixer = LinkFixer::new(&docs_dir, false);
        let summary = fixer.run_comprehensive_fix().unwrap();

        assert_eq!(summary.initial_issues, 1);
        assert_eq!(summary.fixes_applied.missing_files, 1);
        assert_eq!(summary.total_fixes, 1);
        assert!(!summary.dry_run);

        let stub = docs_dir.join("missing-page.md");
        let content = fs::read_to_string(&stub).unwrap();
        assert!(content.starts_with("# Missing Page\n"));

        assert_eq!(summary.validation.files_created, 1);
        assert_eq!(summary.validation.remaining_issues, 0);
        assert_eq!(
            summary.validation.created_files,
            vec![stub.display().to_string()]
        );
    }

    #[test]
    fn test_clean_tree_is_left_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let docs_dir = tmp.path().join("docs");
        write(&docs_dir.join("guide.md"), "target doc\n");
        let index = docs_dir.join("index.md");
        let content = concat!(
            "[external](https://example.com)\n",
            "[mail](mailto:docs@example.com)\n",
            "[anchor](#section)\n",
            "[sibling](./guide.md)\n",
            "[extension-less](./guide)\n",
        );
        write(&index, content);

        let mut fixer = LinkFixer::new(&docs_dir, false);
        let summary = fixer.run_comprehensive_fix().unwrap();

        assert_eq!(summary.initial_issues, 0);
        assert_eq!(summary.total_fixes, 0);
        assert_eq!(summary.validation.files_created, 0);
        assert_eq!(summary.validation.files_updated, 0);
        assert_eq!(summary.validation.remaining_issues, 0);
        assert_eq!(fs::read_to_string(&index).unwrap(), content);
        assert!(!tmp.path().join("sample-project").exists());
    }

    #[test]
    fn test_research_link_rewritten_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let docs_dir = tmp.path().join("docs");
        let doc = docs_dir.join("notes.md");
        write(&doc, "See [findings](perform_research_research_2024.md).\n");

        let mut fixer = LinkFixer::new(&docs_dir, false);
        let summary = fixer.run_comprehensive_fix().unwrap();

        assert_eq!(summary.fixes_applied.research_links, 1);
        let content = fs::read_to_string(&doc).unwrap();
        assert!(!content.contains("[findings]"));
        assert!(content
            .contains("<!-- TODO: Fix research link: perform_research_research_2024.md -->"));
        assert_eq!(summary.validation.files_updated, 1);
        assert_eq!(summary.validation.remaining_issues, 0);
    }

    #[test]
    fn test_sample_links_trigger_the_scaffold() {
        let tmp = tempfile::tempdir().unwrap();
        let docs_dir = tmp.path().join("docs");
        write(
            &docs_dir.join("overview.md"),
            "[adr](../../../sample-project/docs/adrs/001-database-architecture.md)\n",
        );

        let mut fixer = LinkFixer::new(&docs_dir, false);
        let summary = fixer.run_comprehensive_fix().unwrap();

        assert_eq!(summary.fixes_applied.sample_links, 3);
        let adrs = tmp.path().join("sample-project/docs/adrs");
        for filename in [
            "001-database-architecture.md",
            "002-api-authentication.md",
            "003-legacy-data-migration.md",
        ] {
            assert!(adrs.join(filename).exists(), "{filename} should exist");
        }
    }

    #[test]
    fn test_fix_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let docs_dir = tmp.path().join("docs");
        write(
            &docs_dir.join("index.md"),
            "[a](./one)\n[b](reference/two.md)\n[c](perform_research_research_x.md)\n",
        );

        let mut first = LinkFixer::new(&docs_dir, false);
        let first_summary = first.run_comprehensive_fix().unwrap();
        assert_eq!(first_summary.initial_issues, 3);
        assert_eq!(first_summary.validation.remaining_issues, 0);

        let mut second = LinkFixer::new(&docs_dir, false);
        let second_summary = second.run_comprehensive_fix().unwrap();
        assert_eq!(second_summary.initial_issues, 0);
        assert_eq!(second_summary.total_fixes, 0);
        assert_eq!(second_summary.validation.files_created, 0);
        assert_eq!(second_summary.validation.remaining_issues, 0);
    }

    #[test]
    fn test_dry_run_reports_the_same_counts_and_touches_nothing() {
        let layout = |root: &Path| {
            write(
                &root.join("index.md"),
                "[a](./one)\n[b](perform_research_research_x.md)\n",
            );
        };

        let dry_tmp = tempfile::tempdir().unwrap();
        let dry_docs = dry_tmp.path().join("docs");
        layout(&dry_docs);
        let real_tmp = tempfile::tempdir().unwrap();
        let real_docs = real_tmp.path().join("docs");
        layout(&real_docs);

        let mut dry = LinkFixer::new(&dry_docs, true);
        let dry_summary = dry.run_comprehensive_fix().unwrap();
        let mut real = LinkFixer::new(&real_docs, false);
        let real_summary = real.run_comprehensive_fix().unwrap();

        assert!(dry_summary.dry_run);
        assert_eq!(
            dry_summary.fixes_applied.missing_files,
            real_summary.fixes_applied.missing_files
        );
        assert_eq!(
            dry_summary.validation.files_created,
            real_summary.validation.files_created
        );
        assert_eq!(
            dry_summary.validation.files_updated,
            real_summary.validation.files_updated
        );

        // Nothing in the dry tree changed
        assert!(!dry_docs.join("one.md").exists());
        assert_eq!(
            fs::read_to_string(dry_docs.join("index.md")).unwrap(),
            "[a](./one)\n[b](perform_research_research_x.md)\n"
        );
        // The dry re-scan still sees every original issue
        assert_eq!(dry_summary.validation.remaining_issues, 2);
        assert_eq!(real_summary.validation.remaining_issues, 0);
    }

    #[test]
    fn test_two_links_to_one_missing_target_create_one_stub() {
        let tmp = tempfile::tempdir().unwrap();
        let docs_dir = tmp.path().join("docs");
        write(&docs_dir.join("a.md"), "[x](./shared-page)\n");
        write(&docs_dir.join("b.md"), "[y](./shared-page.md)\n");

        let mut fixer = LinkFixer::new(&docs_dir, false);
        let summary = fixer.run_comprehensive_fix().unwrap();

        assert_eq!(summary.initial_issues, 2);
        assert_eq!(summary.fixes_applied.missing_files, 1);
        assert_eq!(summary.validation.files_created, 1);
        assert_eq!(summary.validation.remaining_issues, 0);
    }

    #[test]
    fn test_analyze_fails_for_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let fixer = LinkFixer::new(tmp.path().join("absent"), false);
        assert!(fixer.analyze().is_err());
    }
}
