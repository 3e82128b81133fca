//! Greedy mode: year-by-holiday construction.
//!
//! # Algorithm
//!
//! For each year in increasing order and each holiday in canonical order:
//!
//! 1. Project every peer's place for the slot and insert it in the ledger.
//! 2. For every present family, score a hypothetical focal place against
//!    the ledger extended by that place:
//!    `distribution(all) + mean(distribution(per holiday)) + match(slot)`.
//! 3. Commit the highest-scoring family (first in family order on ties).
//!
//! Each commit is visible to every later step, so the holiday order is part
//! of the result. Steps run strictly in sequence.
//!
//! # Complexity
//! O(y * h * f * n) where n is the ledger size at each step.

use log::debug;
use std::iter;

use super::{Allocation, AllocationMode, Allocator};
use crate::error::Result;
use crate::models::{Family, Holiday, Ledger, Place};
use crate::projection::project_places;

/// A scored focal candidate for one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub place: Place,
    /// Distribution part of the score.
    pub balance: f64,
    /// Match part of the score.
    pub matching: f64,
}

impl Choice {
    /// Combined score.
    #[inline]
    pub fn score(&self) -> f64 {
        self.balance + self.matching
    }
}

impl Allocator {
    /// Runs greedy mode.
    ///
    /// # Errors
    /// [`crate::Error::DuplicatePlace`] if the history already holds a place
    /// for a horizon slot.
    pub fn greedy(&self) -> Result<Allocation> {
        let request = self.request();
        let mut ledger = self.seed_ledger()?;

        for year in request.years() {
            for holiday in Holiday::ALL {
                ledger.extend(project_places(&request.peers, year, holiday))?;
                let choice = self.best_choice(&ledger, year, holiday);
                debug!(
                    "greedy: {year} {holiday} -> {} (balance {:.4}, match {:.4})",
                    choice.place.family, choice.balance, choice.matching
                );
                ledger.insert(choice.place)?;
            }
        }

        Ok(Allocation::new(AllocationMode::Greedy, request.couple, ledger))
    }

    /// Scores every present family for one slot against `snapshot`, in
    /// family order.
    ///
    /// `snapshot` is read as-is: peers' places for the slot must already be
    /// in it for the match term to see them.
    pub fn evaluate_slot(
        &self,
        snapshot: &Ledger,
        year: i32,
        holiday: Holiday,
    ) -> [Choice; 3] {
        let couple = self.request().couple;
        let slot = snapshot.places_at(year, holiday);
        Family::PRESENT.map(|family| {
            let place = Place::new(year, holiday, couple, family);
            let extended = snapshot.iter().chain(iter::once(&place));
            Choice {
                place,
                balance: self.distribution().balance_score(extended, couple),
                matching: self.matcher().score(&place, slot.iter().copied()),
            }
        })
    }

    /// Highest-scoring choice for a slot; the earliest family wins ties.
    pub fn best_choice(&self, snapshot: &Ledger, year: i32, holiday: Holiday) -> Choice {
        let [first, rest @ ..] = self.evaluate_slot(snapshot, year, holiday);
        rest.into_iter().fold(first, |best, choice| {
            if choice.score() > best.score() {
                choice
            } else {
                best
            }
        })
    }
}
