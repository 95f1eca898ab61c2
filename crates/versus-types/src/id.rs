//! Identifier types.
//!
//! Internal records (users, items, choices) are keyed by UUID v7 newtypes.
//! Catalog items additionally carry an [`ExternalId`]: the numeric id the
//! remote content catalog uses, which is also the id space of `related_ids`,
//! exclusions and wishlists.
//!
//! # External id normalization
//!
//! Upstream data mixes numeric and string forms of the same catalog id
//! (`1074` vs `"1074"`). Every external id is normalized exactly once, at the
//! point it enters the system, into a positive integer that fits in an `i64`
//! (so it can be stored as a SQLite INTEGER):
//!
//! - JSON numbers and decimal strings are both accepted on input.
//! - Strings must consist of ASCII digits only (no sign, no whitespace).
//!   Leading zeros are allowed and dropped (`"007"` == `7`).
//! - Zero, negative numbers, floats and anything unparseable are rejected
//!   with [`IdError::InvalidExternalId`].
//! - Output is always a JSON number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new id using UUID v7 (time-sortable).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| IdError::InvalidUuid {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a user.
    UserId,
    "user"
);

uuid_id!(
    /// Internal identifier for a catalog item.
    ItemId,
    "item"
);

uuid_id!(
    /// Unique identifier for a single choice record.
    ChoiceId,
    "choice"
);

/// Canonical catalog identifier shared with the remote content provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawExternalId", into = "u64")]
pub struct ExternalId(u64);

impl ExternalId {
    /// Largest accepted id (must round-trip through a SQLite INTEGER).
    pub const MAX: u64 = i64::MAX as u64;

    /// Validate and wrap a numeric id.
    pub fn new(value: u64) -> Result<Self, IdError> {
        if value == 0 || value > Self::MAX {
            return Err(IdError::InvalidExternalId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Build from a stored SQLite integer.
    pub fn from_i64(value: i64) -> Result<Self, IdError> {
        u64::try_from(value)
            .map_err(|_| IdError::InvalidExternalId(value.to_string()))
            .and_then(Self::new)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Value as stored in SQLite. Always lossless (see [`ExternalId::MAX`]).
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExternalId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::InvalidExternalId(s.to_string()));
        }
        let value: u64 = s
            .parse()
            .map_err(|_| IdError::InvalidExternalId(s.to_string()))?;
        Self::new(value)
    }
}

impl From<ExternalId> for u64 {
    fn from(id: ExternalId) -> Self {
        id.0
    }
}

/// Wire forms accepted for an external id before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExternalId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl TryFrom<RawExternalId> for ExternalId {
    type Error = IdError;

    fn try_from(raw: RawExternalId) -> Result<Self, Self::Error> {
        match raw {
            RawExternalId::Unsigned(n) => ExternalId::new(n),
            RawExternalId::Signed(n) => Err(IdError::InvalidExternalId(n.to_string())),
            RawExternalId::Text(s) => s.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display_parse() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_uuid_id_rejects_garbage() {
        let err = "not-a-uuid".parse::<ItemId>().unwrap_err();
        assert!(err.to_string().contains("item"));
    }

    #[test]
    fn test_external_id_from_number_and_string_agree() {
        let from_number: ExternalId = serde_json::from_str("1074").unwrap();
        let from_string: ExternalId = serde_json::from_str("\"1074\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.get(), 1074);
    }

    #[test]
    fn test_external_id_serializes_as_number() {
        let id: ExternalId = "007".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn test_external_id_rejects_malformed() {
        for bad in ["", "abc", "-5", "+5", " 12", "1.5", "0"] {
            assert!(bad.parse::<ExternalId>().is_err(), "accepted {bad:?}");
        }
        assert!(serde_json::from_str::<ExternalId>("-3").is_err());
        assert!(serde_json::from_str::<ExternalId>("2.5").is_err());
        assert!(serde_json::from_str::<ExternalId>("0").is_err());
    }

    #[test]
    fn test_external_id_upper_bound() {
        assert!(ExternalId::new(ExternalId::MAX).is_ok());
        assert!(ExternalId::new(ExternalId::MAX + 1).is_err());
        assert!(ExternalId::from_i64(-1).is_err());
    }
}
