//! Candidate Filter
//!
//! Decides which cross-source pairs are worth scoring. A pair must come from
//! two different outlets, share at least one normalized entity, and, when both
//! publication dates parsed, fall within the configured day window. Pairs with
//! an absent or unparseable date on either side are let through.

use crate::index::EntityIndex;
use rayon::prelude::*;
use veritas_domain::Claim;

/// Why a pair was or was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The pair should be scored
    Accepted,

    /// Both claims come from the same outlet
    SameSource,

    /// The claims have no entity in common
    NoSharedEntity,

    /// Both dates parsed and are too far apart
    OutsideWindow,
}

/// Cheap pre-scoring tests on claim pairs
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter {
    time_window_days: i64,
}

impl CandidateFilter {
    /// Create a filter with the given day window
    pub fn new(time_window_days: i64) -> Self {
        Self { time_window_days }
    }

    /// Run every test on a pair
    pub fn evaluate(&self, a: &Claim, b: &Claim) -> FilterOutcome {
        if a.source == b.source {
            return FilterOutcome::SameSource;
        }
        if !a.shares_entity(b) {
            return FilterOutcome::NoSharedEntity;
        }
        if !self.within_window(a, b) {
            return FilterOutcome::OutsideWindow;
        }
        FilterOutcome::Accepted
    }

    /// Whether the pair should be scored
    pub fn accepts(&self, a: &Claim, b: &Claim) -> bool {
        self.evaluate(a, b) == FilterOutcome::Accepted
    }

    /// Time window test; undated pairs pass
    pub fn within_window(&self, a: &Claim, b: &Claim) -> bool {
        match a.date.days_between(&b.date) {
            Some(days) => days <= self.time_window_days,
            None => true,
        }
    }

    /// Every accepted pair `(i, j)`, `i < j`, in ascending order
    ///
    /// Only pairs found through the entity index are visited. Runs on the
    /// current rayon pool.
    pub fn candidates(&self, claims: &[Claim], index: &EntityIndex) -> Vec<(usize, usize)> {
        (0..claims.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                index
                    .later_neighbors(claims, i)
                    .into_iter()
                    .filter(move |&j| self.accepts(&claims[i], &claims[j]))
                    .map(move |j| (i, j))
            })
            .collect()
    }
}
