//! Match scoring: weighted agreement between the focal couple and peers.
//!
//! Two measures live here:
//!
//! - [`MatchScorer`] scores one candidate place against the peers' places
//!   for the same year and holiday. The weighted sum of matching peers is
//!   multiplied (not divided) by the total configured weight, so the
//!   magnitude grows with the number of peers. Only the ordering of
//!   candidates is consumed downstream.
//! - [`count_agreement`] counts equal positions between two whole
//!   schedules, used by the search allocator and the KPI report.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Couple, Holiday, Place};

/// Importance of matching each peer.
pub type PeerWeights = BTreeMap<Couple, f64>;

/// Scores a candidate place against peers' places.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScorer {
    weights: PeerWeights,
}

impl MatchScorer {
    pub fn new(weights: PeerWeights) -> Self {
        Self { weights }
    }

    /// Configured weights.
    pub fn weights(&self) -> &PeerWeights {
        &self.weights
    }

    /// Sum of all configured weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Weight of a peer; unweighted peers count zero.
    pub fn weight(&self, couple: Couple) -> f64 {
        self.weights.get(&couple).copied().unwrap_or(0.0)
    }

    /// Match score of `candidate`.
    ///
    /// Every peer place at the candidate's year and holiday with the same
    /// family adds that peer's weight; the sum is then scaled by the total
    /// weight. Places of the candidate's own couple and of other slots are
    /// ignored. Returns `0.0` when nothing matches or the total weight is
    /// zero.
    pub fn score<'a, I>(&self, candidate: &Place, places: I) -> f64
    where
        I: IntoIterator<Item = &'a Place>,
    {
        let total = self.total_weight();
        if total == 0.0 {
            return 0.0;
        }
        let matched: f64 = places
            .into_iter()
            .filter(|p| p.couple != candidate.couple && p.same_place(candidate))
            .map(|p| self.weight(p.couple))
            .sum();
        matched * total
    }
}

/// Why two schedules could not be compared position by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Misalignment {
    /// The schedules hold a different number of places.
    Length { ours: usize, theirs: usize },
    /// Position `index` refers to different `(year, holiday)` slots.
    Slot {
        index: usize,
        ours: (i32, Holiday),
        theirs: (i32, Holiday),
    },
}

/// Result of a schedule-to-schedule comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    /// Positions with the same family.
    pub matches: usize,
    /// Set when the schedules were not comparable; `matches` is then zero.
    pub misaligned: Option<Misalignment>,
}

impl Agreement {
    /// Whether the comparison was performed.
    pub fn is_aligned(&self) -> bool {
        self.misaligned.is_none()
    }
}

/// Counts the `(year, holiday)` positions where two schedules agree.
///
/// Both inputs are sorted first. `excluded` skips one holiday entirely.
/// Schedules of different length or with differing slots yield zero
/// matches plus a [`Misalignment`]; the caller decides whether that is an
/// error.
pub fn count_agreement(ours: &[Place], theirs: &[Place], excluded: Option<Holiday>) -> Agreement {
    if ours.len() != theirs.len() {
        let misalignment = Misalignment::Length {
            ours: ours.len(),
            theirs: theirs.len(),
        };
        warn!("schedules out of alignment, cannot count matches: {misalignment:?}");
        return Agreement {
            matches: 0,
            misaligned: Some(misalignment),
        };
    }

    let mut ours = ours.to_vec();
    let mut theirs = theirs.to_vec();
    ours.sort();
    theirs.sort();

    let mut matches = 0;
    for (index, (a, b)) in ours.iter().zip(&theirs).enumerate() {
        if a.year != b.year || a.holiday != b.holiday {
            let misalignment = Misalignment::Slot {
                index,
                ours: (a.year, a.holiday),
                theirs: (b.year, b.holiday),
            };
            warn!("schedules out of alignment, cannot count matches: {misalignment:?}");
            return Agreement {
                matches: 0,
                misaligned: Some(misalignment),
            };
        }
        if Some(a.holiday) != excluded && a.family == b.family {
            matches += 1;
        }
    }

    Agreement {
        matches,
        misaligned: None,
    }
}
