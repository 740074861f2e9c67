//! Audit logging constants and utility functions (PRD-33).
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future CLI tooling. Entries are
//! chained with a SHA-256 integrity hash and sensitive detail fields are
//! redacted before storage.

use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit log entries.
pub mod action_types {
    pub const STAFF_CREATED: &str = "staff_created";
    pub const STAFF_UPDATED: &str = "staff_updated";
    pub const STAFF_DEACTIVATED: &str = "staff_deactivated";
    pub const ITEM_CREATED: &str = "item_created";
    pub const ITEM_UPDATED: &str = "item_updated";
    pub const ITEM_DELETED: &str = "item_deleted";
    pub const DOCUMENT_SUBMITTED: &str = "document_submitted";
    pub const DOCUMENT_APPROVED: &str = "document_approved";
    pub const DOCUMENT_ACKNOWLEDGED: &str = "document_acknowledged";
    pub const TRAINING_STARTED: &str = "training_started";
    pub const TRAINING_COMPLETED: &str = "training_completed";
}

// ---------------------------------------------------------------------------
// Integrity hash computation
// ---------------------------------------------------------------------------

/// Known seed value for the first entry in the hash chain.
const CHAIN_SEED: &str = "STAFFHUB_AUDIT_CHAIN_SEED_V1";

/// Compute a SHA-256 hex digest of the given bytes.
fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Compute the SHA-256 integrity hash for an audit log entry.
///
/// `prev_hash` is the `integrity_hash` of the previous entry, or `None` for
/// the first entry in the chain (which uses a known seed value).
///
/// `entry_data` is a canonical string representation of the entry's content.
pub fn compute_integrity_hash(prev_hash: Option<&str>, entry_data: &str) -> String {
    let prev = prev_hash.unwrap_or(CHAIN_SEED);
    let combined = format!("{prev}|{entry_data}");
    sha256_hex(combined.as_bytes())
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Fields that should be redacted from audit log details before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "ssn",
    "national_id",
    "bank_account",
    "salary",
    "credential",
];

/// Redact sensitive fields from a JSON value.
///
/// Replaces the value of any key matching [`SENSITIVE_FIELDS`] with
/// `"[REDACTED]"`, recursing into nested objects and arrays. Returns a new
/// `serde_json::Value` with redactions applied.
pub fn redact_sensitive_fields(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            serde_json::Value::Object(redacted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(redact_sensitive_fields).collect())
        }
        other => other.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Integrity hash computation -----------------------------------------

    #[test]
    fn first_entry_uses_seed() {
        let hash = compute_integrity_hash(None, "staff_created|staff|1");
        // SHA-256 hex digest is always 64 characters.
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn chained_entry_uses_previous_hash() {
        let first = compute_integrity_hash(None, "entry_1");
        let second = compute_integrity_hash(Some(&first), "entry_2");
        assert_ne!(first, second);
        assert_eq!(second.len(), 64);
    }

    #[test]
    fn same_input_produces_same_hash() {
        let a = compute_integrity_hash(None, "same_data");
        let b = compute_integrity_hash(None, "same_data");
        assert_eq!(a, b);
    }

    #[test]
    fn different_prev_hash_produces_different_result() {
        let a = compute_integrity_hash(Some("hash_a"), "same_data");
        let b = compute_integrity_hash(Some("hash_b"), "same_data");
        assert_ne!(a, b);
    }

    // -- Sensitive field redaction ------------------------------------------

    #[test]
    fn redacts_salary_field() {
        let input = serde_json::json!({"full_name": "Alice Osei", "salary": 82000});
        let result = redact_sensitive_fields(&input);
        assert_eq!(result["full_name"], "Alice Osei");
        assert_eq!(result["salary"], "[REDACTED]");
    }

    #[test]
    fn redacts_key_containing_sensitive_word() {
        let input = serde_json::json!({"bank_account_number": "12345", "department": "People"});
        let result = redact_sensitive_fields(&input);
        assert_eq!(result["bank_account_number"], "[REDACTED]");
        assert_eq!(result["department"], "People");
    }

    #[test]
    fn handles_nested_objects() {
        let input = serde_json::json!({"hr_record": {"ssn": "000-00-0000", "role": "Engineer"}});
        let result = redact_sensitive_fields(&input);
        assert_eq!(result["hr_record"]["ssn"], "[REDACTED]");
        assert_eq!(result["hr_record"]["role"], "Engineer");
    }

    #[test]
    fn handles_arrays() {
        let input = serde_json::json!([{"token": "hidden"}, {"note": "visible"}]);
        let result = redact_sensitive_fields(&input);
        assert_eq!(result[0]["token"], "[REDACTED]");
        assert_eq!(result[1]["note"], "visible");
    }

    #[test]
    fn non_object_values_unchanged() {
        let input = serde_json::json!("plain_string");
        assert_eq!(redact_sensitive_fields(&input), "plain_string");
    }
}
