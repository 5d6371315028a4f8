//! Record identifiers and the ownership rule shared by all submission kinds.
//!
//! Identifiers are 24 lowercase hex characters generated by the store at insert time.
//! Anything else supplied by a caller is treated as an unknown record, never as an
//! internal fault.

use crate::errors::{Error, Result};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Length of a well-formed record identifier.
pub const RECORD_ID_LEN: usize = 24;

/// The five kinds of records kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Catalog vehicle
    Vehicle,
    /// Purchase request
    Order,
    /// Price offer
    Offer,
    /// Test-drive appointment
    Appointment,
    /// Customer review
    Review,
}

impl RecordKind {
    /// Wording used in confirmation pages and messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "car",
            Self::Order => "purchase request",
            Self::Offer => "offer",
            Self::Appointment => "test-drive appointment",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh identifier: creation seconds followed by 16 random hex digits.
    #[must_use]
    pub fn generate() -> Self {
        let seconds = chrono::Utc::now().timestamp().clamp(0, i64::from(u32::MAX));
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{seconds:08x}{}", &random[..16]))
    }

    /// Validates a caller-supplied identifier.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] for `kind` when `raw` is not 24 hex characters.
    pub fn parse(kind: RecordKind, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == RECORD_ID_LEN && trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            warn!("Rejected malformed {} id {:?}", kind, raw);
            Err(Error::NotFound {
                kind,
                id: raw.to_string(),
            })
        }
    }

    /// The identifier as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the stored string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that `requester` may edit or delete a record owned by `owner`.
///
/// Unowned records (anonymous submissions, or owners that were removed) may be changed
/// by anyone; owned records only by the same identity.
///
/// # Errors
/// Returns [`Error::Forbidden`] when the record has a different owner.
pub fn ensure_can_mutate(
    kind: RecordKind,
    id: &str,
    owner: Option<&str>,
    requester: &str,
) -> Result<()> {
    match owner {
        Some(owner) if owner != requester => {
            warn!(
                "User {} attempted to modify {} {} belonging to {}. Denied.",
                requester, kind, id, owner
            );
            Err(Error::Forbidden {
                kind,
                id: id.to_string(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_generated_ids_are_well_formed() {
        let id = RecordId::generate();
        assert_eq!(id.as_str().len(), RECORD_ID_LEN);
        let reparsed = RecordId::parse(RecordKind::Order, id.as_str()).unwrap();
        assert_eq!(reparsed, id);
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn test_parse_rejects_malformed_ids_as_not_found() {
        for raw in ["not-a-valid-id", "", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "65a1b2c3d4e5f60718293a4b5"] {
            let err = RecordId::parse(RecordKind::Review, raw).unwrap_err();
            assert!(matches!(
                err,
                Error::NotFound {
                    kind: RecordKind::Review,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = RecordId::parse(RecordKind::Offer, "65A1B2C3D4E5F60718293A4B").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_unowned_records_are_mutable_by_anyone() {
        assert!(ensure_can_mutate(RecordKind::Review, "x", None, "alice").is_ok());
        assert!(ensure_can_mutate(RecordKind::Review, "x", Some("alice"), "alice").is_ok());
    }

    #[test]
    fn test_owned_records_reject_other_requesters() {
        let err = ensure_can_mutate(RecordKind::Order, "x", Some("alice"), "bob").unwrap_err();
        assert!(matches!(
            err,
            Error::Forbidden {
                kind: RecordKind::Order,
                ..
            }
        ));
    }
}
