//! Search mode: exhaustive evaluation of whole-horizon rotations.
//!
//! # Algorithm
//!
//! 1. Take every candidate rotation from the [`RotationCatalog`].
//! 2. For each candidate and each [`Orientation`], synthesize the focal
//!    schedule: year `start + i` uses the candidate shifted left by
//!    `i * step` positions.
//! 3. Score it as the number of `(year, holiday)` positions equal to each
//!    peer's projected family, summed over peers (one holiday may be
//!    excluded).
//! 4. Keep the best score; ties go to the lowest enumeration index
//!    `candidate * 2 + orientation`.
//! 5. Repair: per year, where the focal schedule holds one member of a
//!    family pair and the first peer holds the other member on that same
//!    holiday, switch the focal family to the peer's.
//! 6. Recount the agreement after repair.
//!
//! Steps 2-3 are a pure function of the enumeration index. With the
//! `parallel` feature they run on rayon; the reduction still orders ties
//! by index, so results are identical.
//!
//! # Complexity
//! O(c * y * p * h) where c=candidates, y=years, p=peers, h=holidays.

use log::{debug, info};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::request::FamilyPair;
use super::{Allocation, AllocationMode, Allocator};
use crate::catalog::RotationCatalog;
use crate::error::{Error, Result};
use crate::models::{Couple, Holiday, Place, Rotation};
use crate::projection::project;
use crate::scoring::count_agreement;

/// Direction the candidate rotation advances each year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Shift right by one holiday per elapsed year.
    Backward,
    /// Shift left by one holiday per elapsed year.
    Forward,
}

impl Orientation {
    /// Enumeration order.
    pub const ALL: [Orientation; 2] = [Orientation::Backward, Orientation::Forward];

    /// Signed shift per elapsed year.
    pub fn step(self) -> i64 {
        match self {
            Orientation::Backward => -1,
            Orientation::Forward => 1,
        }
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Ledger and focal schedule after repair.
    pub allocation: Allocation,
    /// Agreement count after repair.
    pub matches: usize,
    /// Agreement count of the winning candidate before repair.
    pub best_unrepaired: usize,
    /// Catalog index of the winning candidate.
    pub candidate_index: usize,
    /// Winning orientation.
    pub orientation: Orientation,
    /// Winning candidate as listed in the catalog.
    pub rotation: Rotation,
}

/// Focal rotations for every horizon year.
pub fn synthesize(candidate: &Rotation, orientation: Orientation, num_years: usize) -> Vec<Rotation> {
    (0..num_years)
        .map(|i| candidate.rotated_left(i as i64 * orientation.step()))
        .collect()
}

/// Positions where `ours` equals each peer's rotation, summed over peers.
pub fn agreement_score(ours: &[Rotation], peers: &[Vec<Rotation>], excluded: Option<Holiday>) -> usize {
    peers
        .iter()
        .map(|theirs| {
            ours.iter()
                .zip(theirs)
                .map(|(a, b)| {
                    Holiday::ALL
                        .into_iter()
                        .filter(|&h| Some(h) != excluded && a.get(h) == b.get(h))
                        .count()
                })
                .sum::<usize>()
        })
        .sum()
}

/// Switches focal families to the first peer's counterpart family.
///
/// The holidays holding each pair member are located before any change
/// in that year.
pub fn repair(ours: &mut [Rotation], first_peer: &[Rotation], pair: FamilyPair) {
    for (year, theirs) in ours.iter_mut().zip(first_peer) {
        let first_at = year.holiday_of(pair.first);
        let second_at = year.holiday_of(pair.second);
        if let Some(h) = first_at {
            if theirs.get(h) == pair.second {
                year.set(h, pair.second);
            }
        }
        if let Some(h) = second_at {
            if theirs.get(h) == pair.first {
                year.set(h, pair.first);
            }
        }
    }
}

/// Keeps the higher score; equal scores keep the lower index.
fn better(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
    let (a_index, a_score) = a;
    let (b_index, b_score) = b;
    if b_score > a_score || (b_score == a_score && b_index < a_index) {
        b
    } else {
        a
    }
}

impl Allocator {
    /// Runs search mode.
    ///
    /// # Errors
    /// - [`Error::EmptyCatalog`] if the pool yields no adjacency-free rotation
    /// - [`Error::DuplicatePlace`] if the history overlaps the horizon
    pub fn search(&self) -> Result<SearchOutcome> {
        let request = self.request();
        let options = &request.search;
        let catalog = RotationCatalog::new(&options.pool);
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let years: Vec<i32> = request.years().collect();
        let peer_rotations: Vec<Vec<Rotation>> = request
            .peers
            .iter()
            .map(|peer| years.iter().map(|&y| *project(&peer.table, y)).collect())
            .collect();

        info!(
            "search: {} candidates x {} orientations over {} years, {} peers",
            catalog.len(),
            Orientation::ALL.len(),
            years.len(),
            request.peers.len()
        );

        let orientations = Orientation::ALL.len();
        let evaluate = |index: usize| -> (usize, usize) {
            let candidate = &catalog.candidates()[index / orientations];
            let orientation = Orientation::ALL[index % orientations];
            let ours = synthesize(candidate, orientation, years.len());
            (
                index,
                agreement_score(&ours, &peer_rotations, options.excluded_holiday),
            )
        };

        let total = catalog.len() * orientations;

        #[cfg(feature = "parallel")]
        let best = (0..total).into_par_iter().map(evaluate).reduce_with(better);

        #[cfg(not(feature = "parallel"))]
        let best = (0..total).map(evaluate).reduce(better);

        let (best_index, best_unrepaired) = best.ok_or(Error::EmptyCatalog)?;
        let candidate_index = best_index / orientations;
        let orientation = Orientation::ALL[best_index % orientations];
        let rotation = catalog.candidates()[candidate_index];
        debug!(
            "search: best candidate {candidate_index} {orientation:?} with {best_unrepaired} matches"
        );

        let mut ours = synthesize(&rotation, orientation, years.len());
        if let (Some(pair), Some(first_peer)) = (options.repair, peer_rotations.first()) {
            repair(&mut ours, first_peer, pair);
        }

        let focal: Vec<Place> = rotations_to_places(request.couple, &years, &ours);
        let matches = request
            .peers
            .iter()
            .zip(&peer_rotations)
            .map(|(peer, theirs)| {
                let theirs = rotations_to_places(peer.couple, &years, theirs);
                count_agreement(&focal, &theirs, options.excluded_holiday).matches
            })
            .sum();

        let mut ledger = self.seed_ledger()?;
        for (i, &year) in years.iter().enumerate() {
            for holiday in Holiday::ALL {
                for (peer, theirs) in request.peers.iter().zip(&peer_rotations) {
                    ledger.insert(Place::new(year, holiday, peer.couple, theirs[i].get(holiday)))?;
                }
                ledger.insert(Place::new(year, holiday, request.couple, ours[i].get(holiday)))?;
            }
        }

        info!("search: {matches} matches after repair (before: {best_unrepaired})");

        Ok(SearchOutcome {
            allocation: Allocation::new(AllocationMode::Search, request.couple, ledger),
            matches,
            best_unrepaired,
            candidate_index,
            orientation,
            rotation,
        })
    }
}

fn rotations_to_places(couple: Couple, years: &[i32], rotations: &[Rotation]) -> Vec<Place> {
    years
        .iter()
        .zip(rotations)
        .flat_map(|(&year, r)| r.iter().map(move |(h, f)| Place::new(year, h, couple, f)))
        .collect()
}
