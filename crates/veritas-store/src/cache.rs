//! Per-claim result cache
//!
//! Every claim takes part in many candidate pairs, but its embedding and its
//! polarity only need computing once. `ClaimCache` is shared by reference
//! across scoring threads: reads are concurrent, and the first write for a
//! key wins.

use dashmap::DashMap;
use veritas_domain::ClaimId;

/// Concurrent compute-once cache keyed by `ClaimId`
#[derive(Debug)]
pub struct ClaimCache<T> {
    entries: DashMap<ClaimId, T>,
}

impl<T: Clone> ClaimCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Get a copy of the cached value
    pub fn get(&self, id: ClaimId) -> Option<T> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    /// Whether a value is cached for the claim
    pub fn contains(&self, id: ClaimId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Store a value unless one is already present
    ///
    /// Returns `true` if this call stored the value.
    pub fn insert_once(&self, id: ClaimId, value: T) -> bool {
        let mut inserted = false;
        self.entries.entry(id).or_insert_with(|| {
            inserted = true;
            value
        });
        inserted
    }

    /// Number of cached values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for ClaimCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_insert_once_keeps_first_value() {
        let cache = ClaimCache::new();
        let id = ClaimId::from_value(7);
        assert!(cache.insert_once(id, 1));
        assert!(!cache.insert_once(id, 2));
        assert_eq!(cache.get(id), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_contains_and_get() {
        let cache = ClaimCache::new();
        let a = ClaimId::from_value(1);
        let b = ClaimId::from_value(2);
        cache.insert_once(b, "cached");

        assert!(!cache.contains(a));
        assert!(cache.contains(b));
        assert_eq!(cache.get(a), None);
        assert_eq!(cache.get(b), Some("cached"));
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_concurrent_writers_single_winner() {
        let cache: Arc<ClaimCache<usize>> = Arc::new(ClaimCache::new());
        let id = ClaimId::from_value(42);

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.insert_once(id, n))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(winners, 1);
        assert!(cache.get(id).is_some());
    }
}
