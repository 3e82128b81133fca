//! Distribution scoring: closeness of a couple's visit shares to a target.
//!
//! # Formula
//!
//! For the couple's present places (absent tag excluded), let `n_f` be the
//! count for family `f` and `N` the total. For every family with `n_f > 0`
//! and a configured target `t_f`:
//!
//! ```text
//! score = Σ (1 - |t_f - n_f / N| / t_f)
//! ```
//!
//! The maximum equals the number of distinct families observed. The sum is
//! not averaged; the greedy allocator adds the whole-history score and the
//! mean of the per-holiday scores directly. A contribution may go
//! negative when a share overshoots its target by more than the target
//! itself. With no present places the score is [`EMPTY_SCORE`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Couple, Family, Holiday, Place};

/// Score returned when there is no evidence of imbalance yet.
pub const EMPTY_SCORE: f64 = 1.0;

/// Target share per present family.
pub type TargetDistribution = BTreeMap<Family, f64>;

/// Scores family spread against a target distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionScorer {
    target: TargetDistribution,
}

impl DistributionScorer {
    /// Creates a scorer. Shares are used independently; they need not sum
    /// to one.
    pub fn new(target: TargetDistribution) -> Self {
        Self { target }
    }

    /// Target shares.
    pub fn target(&self) -> &TargetDistribution {
        &self.target
    }

    /// Distribution score of `couple` over `places`, optionally restricted
    /// to one holiday.
    pub fn score<'a, I>(&self, places: I, couple: Couple, holiday: Option<Holiday>) -> f64
    where
        I: IntoIterator<Item = &'a Place>,
    {
        let counts = family_counts(places, couple, holiday);
        self.score_counts(&counts)
    }

    /// Score from precomputed present-family counts.
    pub fn score_counts(&self, counts: &BTreeMap<Family, usize>) -> f64 {
        let total: usize = counts
            .iter()
            .filter(|(f, _)| !f.is_absent())
            .map(|(_, &n)| n)
            .sum();
        if total == 0 {
            return EMPTY_SCORE;
        }

        counts
            .iter()
            .filter(|(f, &n)| !f.is_absent() && n > 0)
            .filter_map(|(f, &n)| {
                let target = *self.target.get(f)?;
                if target <= 0.0 {
                    return None;
                }
                let actual = n as f64 / total as f64;
                Some(1.0 - (target - actual).abs() / target)
            })
            .sum()
    }

    /// Whole-history score plus the mean of the per-holiday scores.
    ///
    /// This is the balance objective the greedy allocator maximizes.
    pub fn balance_score<'a, I>(&self, places: I, couple: Couple) -> f64
    where
        I: IntoIterator<Item = &'a Place> + Clone,
    {
        let overall = self.score(places.clone(), couple, None);
        let per_holiday: f64 = Holiday::ALL
            .into_iter()
            .map(|h| self.score(places.clone(), couple, Some(h)))
            .sum();
        overall + per_holiday / Holiday::COUNT as f64
    }
}

/// Present-family counts of `couple`, optionally for one holiday.
pub fn family_counts<'a, I>(places: I, couple: Couple, holiday: Option<Holiday>) -> BTreeMap<Family, usize>
where
    I: IntoIterator<Item = &'a Place>,
{
    let mut counts = BTreeMap::new();
    for p in places {
        if p.couple != couple || p.family.is_absent() {
            continue;
        }
        if holiday.is_some_and(|h| h != p.holiday) {
            continue;
        }
        *counts.entry(p.family).or_insert(0) += 1;
    }
    counts
}
