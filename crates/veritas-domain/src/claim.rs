//! Claim module - the unit of comparison

use crate::ClaimDate;
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Namespace for name-based claim identifiers
const CLAIM_NAMESPACE: Uuid = Uuid::from_u128(0x5e1f_4c1a_9b2d_4e7a_8c3f_0d6b_2a91_7e45);

/// Stable identifier for a claim
///
/// Assigned at load time as a name-based UUID (v5) over the claim's origin
/// fields. Identity never depends on sentence text alone: two outlets
/// printing the same sentence yield two distinct claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Derive a ClaimId from the claim's origin
    ///
    /// `occurrence` disambiguates records whose origin fields are identical
    /// (0 for the first such record, 1 for the second, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use veritas_domain::ClaimId;
    ///
    /// let a = ClaimId::derive("X", "Title", "The law was signed.", "2024-01-01", 0);
    /// let b = ClaimId::derive("X", "Title", "The law was signed.", "2024-01-01", 0);
    /// let c = ClaimId::derive("Y", "Title", "The law was signed.", "2024-01-01", 0);
    /// assert_eq!(a, b);
    /// assert_ne!(a, c);
    /// ```
    pub fn derive(source: &str, title: &str, sentence: &str, date: &str, occurrence: usize) -> Self {
        let mut name = Vec::with_capacity(source.len() + title.len() + sentence.len() + date.len() + 24);
        for field in [source, title, sentence, date] {
            name.extend_from_slice(field.as_bytes());
            name.push(0);
        }
        name.extend_from_slice(occurrence.to_string().as_bytes());
        Self(Uuid::new_v5(&CLAIM_NAMESPACE, &name).as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from its hyphenated UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid claim id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_u128(self.0))
    }
}

/// Normalize an entity name for overlap tests (trimmed, lower-cased)
///
/// Returns `None` for names that are empty after trimming.
pub fn normalize_entity(entity: &str) -> Option<String> {
    let trimmed = entity.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// A factual claim extracted upstream from a news article
///
/// Claims are immutable for the comparison engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Stable identifier
    pub id: ClaimId,

    /// Outlet identifier
    pub source: String,

    /// Title of the originating article (may be empty)
    pub title: String,

    /// The factual statement text
    pub sentence: String,

    /// Entities as supplied upstream
    pub entities: Vec<String>,

    /// Publication date
    pub date: ClaimDate,

    normalized: BTreeSet<String>,
}

impl Claim {
    /// Create a new claim
    pub fn new(
        id: ClaimId,
        source: impl Into<String>,
        title: impl Into<String>,
        sentence: impl Into<String>,
        entities: Vec<String>,
        date: ClaimDate,
    ) -> Self {
        let normalized = entities.iter().filter_map(|e| normalize_entity(e)).collect();
        Self {
            id,
            source: source.into(),
            title: title.into(),
            sentence: sentence.into(),
            entities,
            date,
            normalized,
        }
    }

    /// Normalized entity set
    pub fn entity_keys(&self) -> &BTreeSet<String> {
        &self.normalized
    }

    /// Whether the two claims mention at least one common entity
    pub fn shares_entity(&self, other: &Claim) -> bool {
        // Iterate the smaller set
        let (small, large) = if self.normalized.len() <= other.normalized.len() {
            (&self.normalized, &other.normalized)
        } else {
            (&other.normalized, &self.normalized)
        };
        small.iter().any(|e| large.contains(e))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ordering matches u128 ordering
        #[test]
        fn test_id_ordering_property(a: u128, b: u128) {
            let id_a = ClaimId::from_value(a);
            let id_b = ClaimId::from_value(b);
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: round-trip through string representation preserves ID
        #[test]
        fn test_id_string_roundtrip(value: u128) {
            let id = ClaimId::from_value(value);
            match ClaimId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }

        /// Property: entity overlap is symmetric
        #[test]
        fn test_overlap_symmetric(
            a in proptest::collection::vec("[A-Za-z]{1,4}", 0..5),
            b in proptest::collection::vec("[A-Za-z]{1,4}", 0..5),
        ) {
            let ca = Claim::new(ClaimId::from_value(1), "X", "", "s", a, ClaimDate::Absent);
            let cb = Claim::new(ClaimId::from_value(2), "Y", "", "s", b, ClaimDate::Absent);
            prop_assert_eq!(ca.shares_entity(&cb), cb.shares_entity(&ca));
        }
    }
}
