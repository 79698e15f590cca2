//! Inverted entity index
//!
//! Maps each normalized entity to the load positions of the claims that
//! mention it, so candidate generation only ever visits pairs that share at
//! least one entity.

use std::collections::{BTreeSet, HashMap};
use veritas_domain::Claim;

/// Normalized entity -> ascending claim positions
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    postings: HashMap<String, Vec<usize>>,
}

impl EntityIndex {
    /// Build the index over claims in load order
    pub fn build(claims: &[Claim]) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, claim) in claims.iter().enumerate() {
            for key in claim.entity_keys() {
                postings.entry(key.clone()).or_default().push(position);
            }
        }
        Self { postings }
    }

    /// Positions of claims mentioning the normalized entity
    pub fn positions(&self, entity: &str) -> &[usize] {
        self.postings.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions after `position` that share an entity with the claim there
    ///
    /// Ascending and without duplicates.
    pub fn later_neighbors(&self, claims: &[Claim], position: usize) -> Vec<usize> {
        let Some(claim) = claims.get(position) else {
            return Vec::new();
        };

        let mut neighbors = BTreeSet::new();
        for key in claim.entity_keys() {
            let postings = self.positions(key);
            let start = postings.partition_point(|&p| p <= position);
            neighbors.extend(&postings[start..]);
        }
        neighbors.into_iter().collect()
    }

    /// Number of distinct entities
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Whether no claim carries an entity
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritas_domain::{ClaimDate, ClaimId};

    fn claim(n: u128, entities: &[&str]) -> Claim {
        Claim::new(
            ClaimId::from_value(n),
            "S",
            "",
            "sentence",
            entities.iter().map(|e| e.to_string()).collect(),
            ClaimDate::Absent,
        )
    }

    #[test]
    fn test_postings_are_normalized_and_ordered() {
        let claims = vec![
            claim(1, &["Paris", "Macron"]),
            claim(2, &["paris "]),
            claim(3, &["Berlin"]),
        ];
        let index = EntityIndex::build(&claims);

        assert_eq!(index.len(), 3);
        assert_eq!(index.positions("paris"), &[0, 1]);
        assert_eq!(index.positions("Paris"), &[] as &[usize]);
    }

    #[test]
    fn test_later_neighbors_dedupes_and_skips_earlier() {
        let claims = vec![
            claim(1, &["a", "b"]),
            claim(2, &["a", "b"]),
            claim(3, &["b"]),
            claim(4, &["c"]),
        ];
        let index = EntityIndex::build(&claims);

        assert_eq!(index.later_neighbors(&claims, 0), vec![1, 2]);
        assert_eq!(index.later_neighbors(&claims, 1), vec![2]);
        assert!(index.later_neighbors(&claims, 2).is_empty());
        assert!(index.later_neighbors(&claims, 3).is_empty());
        assert!(index.later_neighbors(&claims, 9).is_empty());
    }

    #[test]
    fn test_claims_without_entities() {
        let claims = vec![claim(1, &[]), claim(2, &["", "  "])];
        let index = EntityIndex::build(&claims);
        assert!(index.is_empty());
        assert!(index.later_neighbors(&claims, 0).is_empty());
    }
}
