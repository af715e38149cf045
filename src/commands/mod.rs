//! Command handlers for the Sessmig CLI

use crate::error::Result;
use crate::migrate::MigrationReport;
use colored::Colorize;
use prettytable::{format, Table};

pub mod migrate;
pub mod scan;

/// Render a migration report to stdout.
///
/// `dry_run` switches the labels from what happened to what would
/// happen; the counts mean the same thing either way.
pub(crate) fn print_report(report: &MigrationReport, json: bool, dry_run: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let migrated_label = if dry_run { "Would migrate" } else { "Migrated" };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Keys found".bold(), report.total]);
    table.add_row(prettytable::row![
        migrated_label.bold(),
        report.migrated.to_string().green()
    ]);
    table.add_row(prettytable::row![
        "Skipped (missing)".bold(),
        report.skipped_missing
    ]);
    table.add_row(prettytable::row![
        "Skipped (duplicate)".bold(),
        report.skipped_duplicate
    ]);
    table.add_row(prettytable::row![
        "Failed".bold(),
        if report.failed.is_empty() {
            "0".to_string()
        } else {
            report.failed.len().to_string().red().to_string()
        }
    ]);
    table.add_row(prettytable::row!["Elapsed (ms)".bold(), report.elapsed_ms]);

    let title = if dry_run {
        "Migration dry run:"
    } else {
        "Migration report:"
    };
    println!("\n{}", title);
    table.printstd();

    if !report.failed.is_empty() {
        println!("\n{}", "Failed keys:".red().bold());
        let mut failures = Table::new();
        failures.set_format(*format::consts::FORMAT_BORDERS_ONLY);
        failures.add_row(prettytable::row!["Key".bold(), "Reason".bold()]);
        for failure in &report.failed {
            failures.add_row(prettytable::row![failure.key.yellow(), failure.reason]);
        }
        failures.printstd();
    }
    println!();

    Ok(())
}
