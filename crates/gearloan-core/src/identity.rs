// Rust guideline compliant 2026-10-19

//! Hash-based borrow record identifiers.
//!
//! Record IDs look like `br-1a2b3c4d`: a fixed prefix followed by the first
//! eight hex characters of a SHA-256 digest over the loan's identifying fields.

use crate::{Error, ItemId, RecordId, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Prefix shared by every record ID.
pub const RECORD_ID_PREFIX: &str = "br-";

const HASH_LEN: usize = 8;

/// Generates a candidate record ID.
///
/// Callers bump `nonce` until the ID is unused.
pub fn generate_record_id(
    item_id: &ItemId,
    borrower_id: &str,
    borrow_time: DateTime<Utc>,
    nonce: u32,
) -> RecordId {
    let mut hasher = Sha256::new();
    hasher.update(item_id.as_str().as_bytes());
    hasher.update(borrower_id.as_bytes());
    hasher.update(borrow_time.timestamp_micros().to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hash = hasher.finalize();
    let hex = format!("{:x}", hash);
    RecordId::new(format!("{}{}", RECORD_ID_PREFIX, &hex[..HASH_LEN]))
}

/// Validates that a string looks like a full record ID.
///
/// # Errors
///
/// Returns `InvalidRequest` if the prefix, length or hex digits are wrong.
/// Uppercase hex is rejected since lookups lowercase their input.
pub fn validate_record_id_format(id: &str) -> Result<()> {
    let Some(hash) = id.strip_prefix(RECORD_ID_PREFIX) else {
        return Err(Error::InvalidRequest(format!(
            "Record ID must start with '{}': {}",
            RECORD_ID_PREFIX, id
        )));
    };

    if hash.len() != HASH_LEN || !hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(Error::InvalidRequest(format!(
            "Record ID must be '{}' followed by {} lowercase hex characters: {}",
            RECORD_ID_PREFIX, HASH_LEN, id
        )));
    }

    Ok(())
}

/// Resolves a partial record ID against a set of known IDs.
///
/// The prefix is optional: `1a2b` and `br-1a2b` both match `br-1a2b3c4d`.
/// An exact match wins even when it is also a prefix of other IDs.
///
/// # Errors
///
/// Returns an error if:
/// - The partial ID is empty
/// - Nothing matches (`NotFound`)
/// - More than one ID matches (`AmbiguousId`)
pub fn resolve_partial_id<'a, I>(partial: &str, known: I) -> Result<RecordId>
where
    I: IntoIterator<Item = &'a RecordId>,
{
    let partial = partial.trim().to_lowercase();
    if partial.is_empty() {
        return Err(Error::InvalidRequest("Record ID cannot be empty".to_string()));
    }

    let needle = if partial.starts_with(RECORD_ID_PREFIX) {
        partial
    } else {
        format!("{}{}", RECORD_ID_PREFIX, partial)
    };

    let mut matches: Vec<&RecordId> = Vec::new();
    for id in known {
        if id.as_str() == needle {
            return Ok(id.clone());
        }
        if id.as_str().starts_with(&needle) {
            matches.push(id);
        }
    }

    match matches.len() {
        0 => Err(Error::NotFound(needle)),
        1 => Ok(matches[0].clone()),
        _ => {
            let mut ids: Vec<String> = matches.iter().map(|id| id.to_string()).collect();
            ids.sort();
            Err(Error::AmbiguousId(needle, ids))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_ids_are_well_formed_and_nonce_sensitive() {
        let at = Utc.with_ymd_and_hms(2024, 11, 18, 10, 4, 0).unwrap();
        let item = ItemId::from("EQ001");
        let first = generate_record_id(&item, "411596453", at, 0);
        let second = generate_record_id(&item, "411596453", at, 1);

        validate_record_id_format(first.as_str()).unwrap();
        validate_record_id_format(second.as_str()).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, generate_record_id(&item, "411596453", at, 0));
    }

    #[test]
    fn test_validate_rejects_bad_ids() {
        assert!(validate_record_id_format("rec-12345678").is_err());
        assert!(validate_record_id_format("br-123").is_err());
        assert!(validate_record_id_format("br-zzzzzzzz").is_err());
        assert!(validate_record_id_format("br-ABCDEF12").is_err());
        assert!(validate_record_id_format("BR-abcdef12").is_err());
    }

    #[test]
    fn test_resolve_partial_id() {
        let ids = vec![
            RecordId::from("br-abc12345"),
            RecordId::from("br-abd99999"),
            RecordId::from("br-ffff0000"),
        ];

        assert_eq!(
            resolve_partial_id("ff", &ids).unwrap(),
            RecordId::from("br-ffff0000")
        );
        assert_eq!(
            resolve_partial_id("br-abc", &ids).unwrap(),
            RecordId::from("br-abc12345")
        );
        assert!(matches!(
            resolve_partial_id("ab", &ids),
            Err(Error::AmbiguousId(_, matches)) if matches.len() == 2
        ));
        assert!(matches!(resolve_partial_id("0000", &ids), Err(Error::NotFound(_))));
        assert!(matches!(resolve_partial_id("  ", &ids), Err(Error::InvalidRequest(_))));
    }
}
