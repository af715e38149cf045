//! Pure transformation from cache entries to canonical session records
//!
//! No I/O and no mutation of inputs: the same `(key, value)` pair always
//! yields the same record, which is what makes re-runs idempotent and
//! lets the transform be tested without a live store.

use crate::error::SessmigError;
use crate::store::types::{RawSessionValue, SessionKey, SessionRecord};
use chrono::{DateTime, Utc};

/// Field of the raw value that embeds the key identity, removed from
/// `data` because the destination carries it in its own column.
const IDENTITY_FIELD: &str = "session_id";

/// Convert a `(key, value)` pair into a canonical session record.
///
/// Derives `session_id` by stripping `prefix` from the key and builds
/// `data` from every field of `value` except the embedded identity
/// field. Timestamps are lifted from RFC-3339 `created_at` /
/// `updated_at` string fields when the payload carries them.
///
/// # Errors
///
/// Returns `SessmigError::Decode` when the key does not start with
/// `prefix` or the stripped identifier is empty; such a record has no
/// valid destination identity.
pub fn transform(
    prefix: &str,
    key: &SessionKey,
    value: &RawSessionValue,
) -> Result<SessionRecord, SessmigError> {
    let session_id = key.as_str().strip_prefix(prefix).ok_or_else(|| {
        SessmigError::Decode(format!(
            "Key {} does not carry namespace prefix {:?}",
            key, prefix
        ))
    })?;

    if session_id.is_empty() {
        return Err(SessmigError::Decode(format!(
            "Key {} has an empty identifier after the namespace prefix",
            key
        )));
    }

    let mut data = value.clone();
    data.remove(IDENTITY_FIELD);

    Ok(SessionRecord {
        session_id: session_id.to_string(),
        data,
        created_at: lift_timestamp(value, "created_at"),
        updated_at: lift_timestamp(value, "updated_at"),
    })
}

fn lift_timestamp(value: &RawSessionValue, field: &str) -> Option<DateTime<Utc>> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fields: &[(&str, serde_json::Value)]) -> RawSessionValue {
        let mut map = RawSessionValue::new();
        for (name, value) in fields {
            map.insert(name.to_string(), value.clone());
        }
        map
    }

    #[test]
    fn test_transform_strips_namespace_prefix() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[("theme", serde_json::json!("dark"))]);

        let record = transform("session:", &key, &value).expect("transform failed");
        assert_eq!(record.session_id, "abc123");
        assert!(!record.session_id.contains("session:"));
    }

    #[test]
    fn test_transform_removes_identity_field_from_data() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[
            ("session_id", serde_json::json!("abc123")),
            ("theme", serde_json::json!("dark")),
        ]);

        let record = transform("session:", &key, &value).expect("transform failed");
        assert!(record.data.get("session_id").is_none());
        assert_eq!(record.data.get("theme"), Some(&serde_json::json!("dark")));
    }

    #[test]
    fn test_transform_keeps_all_other_fields() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[
            ("theme", serde_json::json!("dark")),
            ("user_id", serde_json::json!(42)),
            ("flags", serde_json::json!({"beta": true})),
        ]);

        let record = transform("session:", &key, &value).expect("transform failed");
        assert_eq!(record.data.len(), 3);
        assert_eq!(record.data.get("user_id"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_transform_empty_value_yields_empty_data() {
        let key = SessionKey::from("session:xyz789");
        let record = transform("session:", &key, &raw(&[])).expect("transform failed");
        assert_eq!(record.session_id, "xyz789");
        assert!(record.data.is_empty());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[
            ("theme", serde_json::json!("dark")),
            ("created_at", serde_json::json!("2024-03-01T10:00:00+00:00")),
        ]);

        let first = transform("session:", &key, &value).expect("first transform failed");
        let second = transform("session:", &key, &value).expect("second transform failed");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).expect("serialize first"),
            serde_json::to_vec(&second).expect("serialize second")
        );
    }

    #[test]
    fn test_transform_does_not_mutate_input() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[("session_id", serde_json::json!("abc123"))]);
        let before = value.clone();

        transform("session:", &key, &value).expect("transform failed");
        assert_eq!(value, before);
    }

    #[test]
    fn test_transform_lifts_rfc3339_timestamps() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[
            ("created_at", serde_json::json!("2024-03-01T10:00:00+00:00")),
            ("updated_at", serde_json::json!("2024-03-02T11:30:00+00:00")),
        ]);

        let record = transform("session:", &key, &value).expect("transform failed");
        assert_eq!(
            record.created_at.map(|dt| dt.to_rfc3339()),
            Some("2024-03-01T10:00:00+00:00".to_string())
        );
        assert!(record.updated_at.is_some());
        // Timestamp fields stay in data; only the identity field is dropped.
        assert!(record.data.get("created_at").is_some());
    }

    #[test]
    fn test_transform_ignores_unparseable_timestamps() {
        let key = SessionKey::from("session:abc123");
        let value = raw(&[("created_at", serde_json::json!("last tuesday"))]);

        let record = transform("session:", &key, &value).expect("transform failed");
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_transform_rejects_key_without_prefix() {
        let key = SessionKey::from("token:abc123");
        let err = transform("session:", &key, &raw(&[])).expect_err("expected error");
        assert!(matches!(err, SessmigError::Decode(_)));
    }

    #[test]
    fn test_transform_rejects_empty_identifier() {
        let key = SessionKey::from("session:");
        let err = transform("session:", &key, &raw(&[])).expect_err("expected error");
        assert!(matches!(err, SessmigError::Decode(_)));
    }
}
