//! Checksum computation and verification over a document.
//!
//! The checksum is a SHA-256 digest of the canonical JSON encoding with
//! `integrity.checksum` forced empty. Recomputing without an intervening
//! mutation always yields the same digest, and a save/reload round trip
//! never changes it: canonicalization, not in-memory layout, governs the
//! hash.

use crate::canonical::canonical_document_bytes;
use crate::document::Savepoint;
use crate::error::CoreError;
use crate::types::Digest;

/// Compute the digest of a document without touching it.
pub fn checksum_of(doc: &Savepoint) -> Result<Digest, CoreError> {
    let value = serde_json::to_value(doc)?;
    let bytes = canonical_document_bytes(&value)?;
    Ok(Digest::sha256(&bytes))
}

/// Compute the document checksum, write it into `integrity.checksum`, and
/// return it as lowercase hex.
pub fn compute_checksum(doc: &mut Savepoint) -> Result<String, CoreError> {
    let digest = checksum_of(doc)?;
    doc.integrity.checksum = digest.to_hex();
    Ok(doc.integrity.checksum.clone())
}

/// Outcome of comparing a stored checksum against recomputed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumState {
    /// No checksum stored; the document has not been sealed since its last
    /// mutation.
    Unsealed,
    /// Stored checksum matches the content.
    Valid,
    /// Stored checksum does not match the content.
    Mismatch { stored: String, computed: String },
}

/// Check whether the stored checksum still describes the document content.
pub fn verify_checksum(doc: &Savepoint) -> Result<ChecksumState, CoreError> {
    if doc.integrity.checksum.is_empty() {
        return Ok(ChecksumState::Unsealed);
    }
    let computed = checksum_of(doc)?.to_hex();
    if computed == doc.integrity.checksum {
        Ok(ChecksumState::Valid)
    } else {
        Ok(ChecksumState::Mismatch {
            stored: doc.integrity.checksum.clone(),
            computed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;

    fn sample() -> Savepoint {
        let mut doc = Savepoint::new("App", "1.0", "engine-x");
        doc.append_message("user", vec![ContentBlock::text("hi")]);
        doc
    }

    #[test]
    fn test_checksum_is_64_hex() {
        let mut doc = Savepoint::new("App", "1.0", "engine-x");
        let digest = compute_checksum(&mut doc).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(doc.integrity.checksum, digest);
    }

    #[test]
    fn test_checksum_idempotent() {
        let mut doc = sample();
        let first = compute_checksum(&mut doc).unwrap();
        let second = compute_checksum(&mut doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_checksum_excludes_itself() {
        let mut doc = sample();
        let before = compute_checksum(&mut doc).unwrap();
        // Recompute with the digest now stored; must not feed back.
        let after = compute_checksum(&mut doc).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_checksum_survives_serde_roundtrip() {
        let mut doc = sample();
        let digest = compute_checksum(&mut doc).unwrap();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let mut reloaded: Savepoint = serde_json::from_str(&json).unwrap();
        assert_eq!(compute_checksum(&mut reloaded).unwrap(), digest);
    }

    #[test]
    fn test_checksum_changes_with_content() {
        let mut doc = sample();
        let before = compute_checksum(&mut doc).unwrap();
        doc.append_message("assistant", "reply");
        let after = compute_checksum(&mut doc).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_verify_states() {
        let mut doc = sample();
        assert_eq!(verify_checksum(&doc).unwrap(), ChecksumState::Unsealed);

        compute_checksum(&mut doc).unwrap();
        assert_eq!(verify_checksum(&doc).unwrap(), ChecksumState::Valid);

        doc.conversation_state[0].role = "system".to_owned();
        assert!(matches!(
            verify_checksum(&doc).unwrap(),
            ChecksumState::Mismatch { .. }
        ));
    }
}
