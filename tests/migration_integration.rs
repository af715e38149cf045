//! End-to-end migration tests against real sled and SQLite stores

mod common;

use common::{seed_cache, temp_stores};
use sessmig::migrate::MigrationRunner;
use sessmig::store::{DestinationStore, SessionRecord, SledCache, UpsertOutcome};
use sessmig::SessmigError;

#[test]
fn migrates_live_sessions_into_sqlite() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[
            ("session:abc123", r#"{"theme":"dark","user_id":42}"#),
            ("session:xyz789", r#"{}"#),
        ],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.run("session:").expect("run failed");

    assert_eq!(report.total, 2);
    assert_eq!(report.migrated, 2);
    assert_eq!(report.skipped_missing, 0);
    assert_eq!(report.skipped_duplicate, 0);
    assert!(report.is_clean());

    let abc = dest
        .get("abc123")
        .expect("get failed")
        .expect("abc123 row missing");
    assert_eq!(abc.data.get("theme"), Some(&serde_json::json!("dark")));
    assert_eq!(abc.data.get("user_id"), Some(&serde_json::json!(42)));
    assert!(abc.created_at.is_some());

    let xyz = dest
        .get("xyz789")
        .expect("get failed")
        .expect("xyz789 row missing");
    assert!(xyz.data.is_empty());
}

#[test]
fn existing_destination_row_is_never_overwritten() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[
            ("session:abc123", r#"{"theme":"dark"}"#),
            ("session:xyz789", r#"{}"#),
        ],
    );

    // abc123 was already migrated (or written by live traffic).
    let mut data = serde_json::Map::new();
    data.insert("theme".to_string(), serde_json::json!("light"));
    let existing = SessionRecord {
        session_id: "abc123".to_string(),
        data,
        created_at: None,
        updated_at: None,
    };
    assert_eq!(
        dest.upsert_if_absent(&existing).expect("seed upsert failed"),
        UpsertOutcome::Inserted
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.run("session:").expect("run failed");

    assert_eq!(report.migrated, 1);
    assert_eq!(report.skipped_duplicate, 1);
    assert!(report.is_clean());

    let abc = dest
        .get("abc123")
        .expect("get failed")
        .expect("abc123 row missing");
    assert_eq!(abc.data.get("theme"), Some(&serde_json::json!("light")));
}

#[test]
fn rerun_after_success_is_idempotent() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[
            ("session:abc123", r#"{"theme":"dark"}"#),
            ("session:xyz789", r#"{}"#),
        ],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);

    let first = runner.run("session:").expect("first run failed");
    assert_eq!(first.migrated, 2);

    let second = runner.run("session:").expect("second run failed");
    assert_eq!(second.migrated, 0);
    assert_eq!(second.skipped_duplicate, 2);
    assert!(second.is_clean());
}

#[test]
fn corrupt_payload_does_not_abort_the_run() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[
            ("session:good1", r#"{"user_id":1}"#),
            ("session:mangled", "{not-json"),
            ("session:good2", r#"{"user_id":2}"#),
        ],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.run("session:").expect("run failed");

    assert_eq!(report.total, 3);
    assert_eq!(report.migrated, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].key, "session:mangled");

    assert!(dest.get("good1").expect("get failed").is_some());
    assert!(dest.get("good2").expect("get failed").is_some());
    assert!(dest.get("mangled").expect("get failed").is_none());
}

#[test]
fn embedded_identity_field_is_stripped() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[(
            "session:abc123",
            r#"{"session_id":"abc123","theme":"dark"}"#,
        )],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    runner.run("session:").expect("run failed");

    let abc = dest
        .get("abc123")
        .expect("get failed")
        .expect("abc123 row missing");
    assert!(abc.data.get("session_id").is_none());
    assert_eq!(abc.data.get("theme"), Some(&serde_json::json!("dark")));
}

#[test]
fn only_the_configured_namespace_is_migrated() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[
            ("session:abc123", r#"{}"#),
            ("token:abc123", r#"{}"#),
            ("ratelimit:1.2.3.4", r#"{}"#),
        ],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.run("session:").expect("run failed");

    assert_eq!(report.total, 1);
    assert_eq!(report.migrated, 1);
}

#[test]
fn locked_cache_aborts_before_any_write() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(&cache_path, &[("session:abc123", r#"{}"#)]);

    // Another process still holds the cache.
    let _holder = sled::open(&cache_path).expect("open holder failed");

    let err = SledCache::open(&cache_path).expect_err("expected lock error");
    let err = err.downcast::<SessmigError>().expect("wrong error type");
    assert!(matches!(err, SessmigError::StoreUnavailable(_)));

    assert!(dest.get("abc123").expect("get failed").is_none());
}

#[test]
fn scan_reports_without_writing() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[
            ("session:abc123", r#"{"theme":"dark"}"#),
            ("session:xyz789", r#"{}"#),
        ],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    let report = runner.scan("session:").expect("scan failed");

    assert_eq!(report.total, 2);
    assert_eq!(report.migrated, 2);
    assert!(dest.get("abc123").expect("get failed").is_none());
    assert!(dest.get("xyz789").expect("get failed").is_none());
}

#[test]
fn source_timestamps_survive_into_destination_rows() {
    let (_tmp, cache_path, dest) = temp_stores();
    seed_cache(
        &cache_path,
        &[(
            "session:stamped",
            r#"{"created_at":"2024-03-01T10:00:00+00:00","updated_at":"2024-03-02T11:30:00+00:00"}"#,
        )],
    );

    let source = SledCache::open(&cache_path).expect("open cache failed");
    let runner = MigrationRunner::new(&source, &dest);
    runner.run("session:").expect("run failed");

    let row = dest
        .get("stamped")
        .expect("get failed")
        .expect("stamped row missing");
    assert_eq!(
        row.created_at.map(|dt| dt.to_rfc3339()),
        Some("2024-03-01T10:00:00+00:00".to_string())
    );
    assert_eq!(
        row.updated_at.map(|dt| dt.to_rfc3339()),
        Some("2024-03-02T11:30:00+00:00".to_string())
    );
}
