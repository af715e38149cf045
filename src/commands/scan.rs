//! The `scan` command: dry run over the source cache

use crate::commands::migrate::open_destination;
use crate::commands::print_report;
use crate::config::Config;
use crate::error::Result;
use crate::migrate::MigrationRunner;
use crate::store::SledCache;

/// Enumerate and read every key under the prefix and report what a
/// migration would do. Writes nothing.
pub fn run_scan(config: Config, prefix: Option<String>, json: bool) -> Result<()> {
    let prefix = prefix.unwrap_or_else(|| config.source.prefix.clone());

    let source = SledCache::open(&config.source.cache_path)?;
    let dest = open_destination(&config)?;

    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.scan(&prefix)?;

    print_report(&report, json, true)?;

    Ok(())
}
