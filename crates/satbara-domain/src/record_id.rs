//! Record identifiers assigned by the store

use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Identity of a saved record
///
/// Generated as a UUIDv7, so ids sort in the order records were saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Fresh id for a record being appended
    ///
    /// ```
    /// use satbara_domain::RecordId;
    ///
    /// let first = RecordId::generate();
    /// assert!(first <= RecordId::generate());
    /// ```
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Rebuild an id from the 16 bytes the store keeps
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Big-endian byte form, as persisted
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_bytes_round_trip(bytes: [u8; 16]) {
            let id = RecordId::from_bytes(bytes);
            prop_assert_eq!(id.as_bytes(), &bytes);
        }

        /// Byte order is creation order for the store's blob column
        #[test]
        fn test_ordering_matches_bytes(a: [u8; 16], b: [u8; 16]) {
            prop_assert_eq!(RecordId::from_bytes(a) < RecordId::from_bytes(b), a < b);
        }
    }
}
