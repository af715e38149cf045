//! The `migrate` command: run the one-shot migration

use crate::commands::print_report;
use crate::config::Config;
use crate::error::Result;
use crate::migrate::MigrationRunner;
use crate::store::{SledCache, SqliteDestination};

/// Run the migration and print the report.
///
/// A non-empty failure list makes the command exit non-zero unless
/// `allow_failures` is set, so a surrounding deployment step can gate
/// on a clean run.
pub fn run_migrate(
    config: Config,
    prefix: Option<String>,
    json: bool,
    allow_failures: bool,
) -> Result<()> {
    let prefix = prefix.unwrap_or_else(|| config.source.prefix.clone());

    let source = SledCache::open(&config.source.cache_path)?;
    let dest = open_destination(&config)?;

    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.run(&prefix)?;

    print_report(&report, json, false)?;

    if !report.is_clean() && !allow_failures {
        anyhow::bail!(
            "{} of {} keys failed to migrate (pass --allow-failures to ignore)",
            report.failed.len(),
            report.total
        );
    }

    Ok(())
}

pub(crate) fn open_destination(config: &Config) -> Result<SqliteDestination> {
    match &config.destination.db_path {
        Some(path) => SqliteDestination::new_with_path(path),
        None => SqliteDestination::new(),
    }
}
