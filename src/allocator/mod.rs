//! Holiday allocators and allocation KPIs.
//!
//! An [`Allocator`] owns one validated [`AllocationRequest`] and runs one
//! of three strategies over it:
//!
//! | Mode | Strategy | Objective |
//! |------|----------|-----------|
//! | `Search` | every catalog rotation × orientation, then repair | peer agreement |
//! | `Greedy` | year by year, holiday by holiday, best family first | distribution + weighted match |
//! | `Rules` | parity rules over two peers' absences | compact deterministic pattern |
//!
//! Every run starts a fresh [`Ledger`] from the request history and
//! returns it together with the focal [`Schedule`].
//!
//! # Example
//!
//! ```
//! use u_holiday::allocator::{AllocationRequest, Allocator};
//! use u_holiday::models::{Couple, Family, Rotation, RotationTable};
//!
//! let request = AllocationRequest::new(Couple::Us, 2022, 2)
//!     .with_peer(Couple::James, RotationTable::fixed(Rotation::uniform(Family::Gresko)))
//!     .with_weight(Couple::James, 1.0)
//!     .with_target(Family::Gresko, 0.5)
//!     .with_target(Family::Palombo, 0.25)
//!     .with_target(Family::Pendola, 0.25);
//!
//! let allocation = Allocator::new(request).unwrap().greedy().unwrap();
//! assert_eq!(allocation.schedule.len(), 8);
//! ```

mod greedy;
mod kpi;
mod request;
mod rules;
mod search;

pub use greedy::Choice;
pub use kpi::{AllocationKpi, PeerMatch};
pub use request::{AllocationMode, AllocationRequest, FamilyPair, RuleOptions, SearchOptions};
pub use rules::{FirstAvailable, HolidayPicker, RandomPick};
pub use search::{agreement_score, repair, synthesize, Orientation, SearchOutcome};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Couple, Ledger, Schedule};
use crate::scoring::{DistributionScorer, MatchScorer};
use crate::validation::validate_request;

/// Output of one allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// Strategy that produced it.
    pub mode: AllocationMode,
    /// Focal couple.
    pub couple: Couple,
    /// Every place known at the end of the run.
    pub ledger: Ledger,
    /// The focal couple's places from the ledger, history included.
    pub schedule: Schedule,
}

impl Allocation {
    pub(crate) fn new(mode: AllocationMode, couple: Couple, ledger: Ledger) -> Self {
        let schedule = ledger.schedule_for(couple);
        Self {
            mode,
            couple,
            ledger,
            schedule,
        }
    }
}

/// Runs allocation strategies over a validated request.
#[derive(Debug, Clone)]
pub struct Allocator {
    request: AllocationRequest,
    distribution: DistributionScorer,
    matcher: MatchScorer,
}

impl Allocator {
    /// Validates the request and builds the scorers.
    ///
    /// # Errors
    /// [`Error::InvalidRequest`] with every validation issue found.
    pub fn new(request: AllocationRequest) -> Result<Self> {
        validate_request(&request).map_err(Error::InvalidRequest)?;
        Ok(Self {
            distribution: DistributionScorer::new(request.target.clone()),
            matcher: MatchScorer::new(request.weights.clone()),
            request,
        })
    }

    /// The validated request.
    pub fn request(&self) -> &AllocationRequest {
        &self.request
    }

    /// Distribution scorer built from the target shares.
    pub fn distribution(&self) -> &DistributionScorer {
        &self.distribution
    }

    /// Match scorer built from the peer weights.
    pub fn matcher(&self) -> &MatchScorer {
        &self.matcher
    }

    /// Runs the strategy selected by the request's `mode`.
    pub fn run(&self) -> Result<Allocation> {
        info!(
            "allocating {} for {} years from {} ({:?} mode, {} peers)",
            self.request.couple,
            self.request.num_years,
            self.request.start_year,
            self.request.mode,
            self.request.peers.len()
        );
        match self.request.mode {
            AllocationMode::Search => self.search().map(|outcome| outcome.allocation),
            AllocationMode::Greedy => self.greedy(),
            AllocationMode::Rules => self.rules(),
        }
    }

    /// KPIs of an allocation against this allocator's scorers.
    pub fn kpi(&self, allocation: &Allocation) -> AllocationKpi {
        AllocationKpi::calculate(&allocation.ledger, allocation.couple, &self.distribution)
    }

    /// Fresh ledger holding the request history.
    fn seed_ledger(&self) -> Result<Ledger> {
        Ledger::from_history(self.request.history.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Family, Holiday, Place, Rotation, RotationTable};
    use crate::validation::ValidationErrorKind;

    fn base_request() -> AllocationRequest {
        AllocationRequest::new(Couple::Us, 2022, 4)
            .with_peer(
                Couple::Ali,
                RotationTable::staggered([Family::Palombo, Family::Gone, Family::Pendola]),
            )
            .with_peer(Couple::Lauren, RotationTable::alternating(Family::Gone, Family::Gresko))
            .with_weight(Couple::Ali, 0.5)
            .with_weight(Couple::Lauren, 0.5)
            .with_target(Family::Gresko, 0.5)
            .with_target(Family::Palombo, 0.25)
            .with_target(Family::Pendola, 0.25)
    }

    #[test]
    fn test_invalid_request_rejected() {
        let request = base_request().with_weight(Couple::Ali, -1.0);
        match Allocator::new(request) {
            Err(Error::InvalidRequest(errors)) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::InvalidWeight));
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_run_dispatches_on_mode() {
        for mode in [AllocationMode::Search, AllocationMode::Greedy, AllocationMode::Rules] {
            let allocator = Allocator::new(base_request().with_mode(mode)).unwrap();
            let allocation = allocator.run().unwrap();
            assert_eq!(allocation.mode, mode);
            assert_eq!(allocation.schedule.len(), 4 * Holiday::COUNT);
        }
    }

    #[test]
    fn test_history_is_kept_in_schedule() {
        let history = vec![
            Place::new(2021, Holiday::Easter, Couple::Us, Family::Gresko),
            Place::new(2021, Holiday::Easter, Couple::Ali, Family::Palombo),
        ];
        let allocator = Allocator::new(base_request().with_history(history)).unwrap();
        let allocation = allocator.greedy().unwrap();
        assert_eq!(allocation.schedule.len(), 4 * Holiday::COUNT + 1);
        assert_eq!(allocation.schedule.places()[0].year, 2021);
        assert_eq!(allocation.schedule.within(2022, 4).len(), 16);
    }

    #[test]
    fn test_history_overlapping_horizon_fails() {
        let history = vec![Place::new(2022, Holiday::Easter, Couple::Us, Family::Gresko)];
        let allocator = Allocator::new(base_request().with_history(history)).unwrap();
        assert!(matches!(
            allocator.greedy(),
            Err(Error::DuplicatePlace { year: 2022, .. })
        ));
    }

    #[test]
    fn test_allocation_json_round_trip() {
        let request = base_request()
            .with_peer(Couple::James, RotationTable::fixed(Rotation::uniform(Family::Gresko)))
            .with_weight(Couple::James, 0.005);
        let allocator = Allocator::new(request).unwrap();
        let allocation = allocator.greedy().unwrap();
        let json = serde_json::to_string(&allocation).unwrap();
        let back: Allocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.schedule, allocation.schedule);
        assert_eq!(back.ledger.len(), allocation.ledger.len());
    }
}
