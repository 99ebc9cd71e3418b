// src/output.rs
// =============================================================================
// This module turns a finished crawl into something a person can use.
//
// Two outputs:
// - The emails file: a header line, a blank line, then one address per line
// - A terminal summary (or the full report as JSON with --json)
//
// The file is always created fresh, so rerunning never appends to old results.
// =============================================================================

use crate::crawl::CrawlReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: &str = "Collected Emails:";

// Writes the sorted email list to `path`, replacing any existing file
pub fn write_report(path: &Path, emails: &[String]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER)?;
    writeln!(writer)?;
    for email in emails {
        writeln!(writer, "{}", email)?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

// Prints the report either as a summary or JSON
pub fn print_report(report: &CrawlReport, output: &Path, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_summary(report, output);
    }
    Ok(())
}

fn print_summary(report: &CrawlReport, output: &Path) {
    println!();
    if report.emails.is_empty() {
        println!("📭 No emails found");
    } else {
        println!("📧 Emails:");
        for email in &report.emails {
            println!("   {}", email);
        }
    }
    println!();

    println!("📊 Summary:");
    println!("   🌐 Pages visited: {}", report.visited.len());
    println!("   ✅ Fetched: {}", report.stats.pages_fetched);
    println!("   ⏭️  Skipped: {}", report.stats.pages_skipped);
    println!("   📧 Emails: {}", report.emails.len());
    println!("   💾 Saved to: {}", output.display());
    if report.deadline_hit {
        println!("   ⏱️  Stopped early: deadline reached");
    }
}
