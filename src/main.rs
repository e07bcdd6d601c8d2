// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Initialize tracing (LINK_MENDER_LOG overrides the default level)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results as a table/text or JSON, optionally persist the report
// 5. Exit with proper code (0 = clean, 1 = issues remain, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod fixer; // src/fixer/ - link classification and remediation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use fixer::{BrokenLinkReport, FixSummary, LinkFixer};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Run our application logic and capture the exit code
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {e:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

// Log filtering comes from the LINK_MENDER_LOG env var when set, otherwise
// from the --verbose flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("LINK_MENDER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = no broken links / nothing left to fix
//   Ok(1) = broken links found / issues remain after fixing
//   Err = unexpected error (becomes exit code 2)
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            docs_dir,
            json,
            extension,
        } => handle_check(&docs_dir, json, &extension),
        Commands::Fix {
            docs_dir,
            dry_run,
            json,
            report,
            extension,
        } => handle_fix(&docs_dir, dry_run, json, report.as_deref(), &extension),
    }
}

// Handles the 'check' subcommand: analysis only, no writes.
fn handle_check(docs_dir: &Path, json: bool, extension: &str) -> Result<i32> {
    println!("🔍 Checking documentation tree: {}", docs_dir.display());

    let fixer = LinkFixer::new(docs_dir, false).with_extension(extension);
    let report = fixer.analyze()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.is_empty() { 0 } else { 1 })
}

// Handles the 'fix' subcommand: the full analyze -> remediate -> validate run.
fn handle_fix(
    docs_dir: &Path,
    dry_run: bool,
    json: bool,
    report_path: Option<&Path>,
    extension: &str,
) -> Result<i32> {
    println!("🔧 Fixing documentation tree: {}", docs_dir.display());

    let mut fixer = LinkFixer::new(docs_dir, dry_run).with_extension(extension);
    let summary = fixer.run_comprehensive_fix()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if let Some(path) = report_path {
        save_report(path, &summary)?;
    }

    Ok(if summary.validation.remaining_issues > 0 {
        1
    } else {
        0
    })
}

// Persists the summary as pretty-printed JSON for downstream tooling.
fn save_report(path: &Path, summary: &FixSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;

    info!("summary report saved: {}", path.display());
    Ok(())
}

// Prints the broken-link report as a human-readable table in the terminal
fn print_report(report: &BrokenLinkReport) {
    println!("{:<40} {:<22} {:<40}", "FILE", "CATEGORY", "TARGET");
    println!("{}", "=".repeat(104));

    for (category, records) in report.buckets() {
        for record in records {
            println!(
                "{:<40} {:<22} {:<40}",
                truncate(&record.file, 37),
                category,
                truncate(&record.url, 37),
            );
        }
    }

    println!();
    println!("📊 Summary:");
    for (category, records) in report.buckets() {
        println!("   {category}: {}", records.len());
    }
    println!("   📋 Total: {}", report.total());
}

// Prints the fix summary as human-readable text
fn print_summary(summary: &FixSummary) {
    let mode = if summary.dry_run { " (dry run)" } else { "" };

    println!();
    println!("📊 Fix Summary{mode}:");
    println!("   Initial issues: {}", summary.initial_issues);
    println!("   Stubs created: {}", summary.fixes_applied.missing_files);
    println!(
        "   Research links rewritten: {}",
        summary.fixes_applied.research_links
    );
    println!(
        "   Sample records scaffolded: {}",
        summary.fixes_applied.sample_links
    );
    println!("   Total fixes: {}", summary.total_fixes);
    println!();
    println!("   Files created: {}", summary.validation.files_created);
    println!("   Files updated: {}", summary.validation.files_updated);
    println!(
        "   Remaining issues: {}",
        summary.validation.remaining_issues
    );

    if summary.validation.remaining_issues > 0 {
        println!("\n⚠️  Some issues remain after fixing");
    } else {
        println!("\n✅ All fixable issues resolved!");
    }
}

// Truncates a value so it fits in its table column
fn truncate(value: &str, max: usize) -> String {
    if value.len() > max {
        format!("{}...", &value[..max])
    } else {
        value.to_string()
    }
}
