use std::path::{Path, PathBuf};
use tempfile::TempDir;

use sessmig::store::SqliteDestination;

/// Seed a sled cache at `path` with raw string payloads, then release
/// the lock so the migration can open it.
#[allow(dead_code)]
pub fn seed_cache(path: &Path, entries: &[(&str, &str)]) {
    let db = sled::open(path).expect("failed to open cache for seeding");
    for (key, payload) in entries {
        db.insert(key.as_bytes(), payload.as_bytes())
            .expect("failed to seed cache entry");
    }
    db.flush().expect("failed to flush cache");
}

#[allow(dead_code)]
pub fn temp_stores() -> (TempDir, PathBuf, SqliteDestination) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let cache_path = tmp.path().join("cache");
    let dest = SqliteDestination::new_with_path(tmp.path().join("sessions.db"))
        .expect("failed to create sqlite destination");
    (tmp, cache_path, dest)
}
