//! Allocation request (run configuration).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Couple, Family, Holiday, Place, RotationTable};
use crate::projection::PeerRotation;
use crate::scoring::{PeerWeights, TargetDistribution};

/// Which allocation strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationMode {
    /// Whole-horizon search over catalog rotations, then repair.
    Search,
    /// Year-by-holiday greedy construction.
    #[default]
    Greedy,
    /// Deterministic rules derived from two peers' absences.
    Rules,
}

/// Two families treated as interchangeable counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPair {
    pub first: Family,
    pub second: Family,
}

impl FamilyPair {
    pub fn new(first: Family, second: Family) -> Self {
        Self { first, second }
    }

    /// The other member of the pair, if `family` belongs to it.
    pub fn other(&self, family: Family) -> Option<Family> {
        if family == self.first {
            Some(self.second)
        } else if family == self.second {
            Some(self.first)
        } else {
            None
        }
    }

    /// Whether `family` is a member.
    pub fn contains(&self, family: Family) -> bool {
        family == self.first || family == self.second
    }
}

/// Search mode settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Family pool the rotation catalog permutes.
    pub pool: Vec<Family>,
    /// Holiday left out of agreement counting.
    pub excluded_holiday: Option<Holiday>,
    /// Counterpart families swapped back to match the first peer.
    /// `None` disables the repair pass.
    pub repair: Option<FamilyPair>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pool: vec![Family::Gresko, Family::Gresko, Family::Palombo, Family::Pendola],
            excluded_holiday: None,
            repair: Some(FamilyPair::new(Family::Pendola, Family::Palombo)),
        }
    }
}

/// Rule-based mode settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Family filling the holidays not copied from a peer.
    pub anchor: Family,
    /// Families Easter alternates between on odd years.
    pub pair: FamilyPair,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            anchor: Family::Gresko,
            pair: FamilyPair::new(Family::Pendola, Family::Palombo),
        }
    }
}

/// Everything one allocation run consumes.
///
/// # Example
///
/// ```
/// use u_holiday::allocator::AllocationRequest;
/// use u_holiday::models::{Couple, Family, Rotation, RotationTable};
///
/// let request = AllocationRequest::new(Couple::Us, 2022, 4)
///     .with_peer(Couple::James, RotationTable::fixed(Rotation::uniform(Family::Gresko)))
///     .with_weight(Couple::James, 1.0)
///     .with_target(Family::Gresko, 0.5)
///     .with_target(Family::Palombo, 0.25)
///     .with_target(Family::Pendola, 0.25);
/// assert_eq!(request.peers.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Focal couple being scheduled.
    pub couple: Couple,
    /// First year of the horizon.
    pub start_year: i32,
    /// Number of years to schedule.
    pub num_years: u32,
    /// Peers in priority order; the first peer drives repair and rules.
    #[serde(default)]
    pub peers: Vec<PeerRotation>,
    /// Importance of matching each peer.
    #[serde(default)]
    pub weights: PeerWeights,
    /// Target visit share per family.
    #[serde(default)]
    pub target: TargetDistribution,
    /// Places already committed before the horizon.
    #[serde(default)]
    pub history: Vec<Place>,
    #[serde(default)]
    pub mode: AllocationMode,
    #[serde(default)]
    pub search: SearchOptions,
    #[serde(default)]
    pub rules: RuleOptions,
    /// Seed for the random holiday picker of the rule-based mode. Without
    /// a seed the picker takes the first option.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AllocationRequest {
    /// Creates a request with no peers, weights, target or history.
    pub fn new(couple: Couple, start_year: i32, num_years: u32) -> Self {
        Self {
            couple,
            start_year,
            num_years,
            peers: Vec::new(),
            weights: PeerWeights::new(),
            target: TargetDistribution::new(),
            history: Vec::new(),
            mode: AllocationMode::default(),
            search: SearchOptions::default(),
            rules: RuleOptions::default(),
            seed: None,
        }
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends a peer.
    pub fn with_peer(mut self, couple: Couple, table: RotationTable) -> Self {
        self.peers.push(PeerRotation::new(couple, table));
        self
    }

    /// Sets a peer weight.
    pub fn with_weight(mut self, couple: Couple, weight: f64) -> Self {
        self.weights.insert(couple, weight);
        self
    }

    /// Sets a target share.
    pub fn with_target(mut self, family: Family, share: f64) -> Self {
        self.target.insert(family, share);
        self
    }

    /// Sets the historical prefix.
    pub fn with_history(mut self, history: Vec<Place>) -> Self {
        self.history = history;
        self
    }

    /// Sets the allocation mode.
    pub fn with_mode(mut self, mode: AllocationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the search options.
    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    /// Sets the rule options.
    pub fn with_rules(mut self, rules: RuleOptions) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the random seed for the rule-based mode.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Years of the horizon.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        crate::projection::horizon(self.start_year, self.num_years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_other() {
        let pair = FamilyPair::new(Family::Pendola, Family::Palombo);
        assert_eq!(pair.other(Family::Pendola), Some(Family::Palombo));
        assert_eq!(pair.other(Family::Palombo), Some(Family::Pendola));
        assert_eq!(pair.other(Family::Gresko), None);
        assert!(pair.contains(Family::Palombo));
    }

    #[test]
    fn test_defaults() {
        let r = AllocationRequest::new(Couple::Us, 2022, 13);
        assert_eq!(r.mode, AllocationMode::Greedy);
        assert_eq!(r.search.pool.len(), 4);
        assert_eq!(r.rules.anchor, Family::Gresko);
        assert!(r.seed.is_none());
        assert_eq!(r.years().count(), 13);
    }

    #[test]
    fn test_from_json_minimal() {
        let json = r#"{
            "couple": "Us",
            "start_year": 2022,
            "num_years": 3,
            "peers": [
                {"couple": "James", "table": [
                    {"easter": "Gresko", "thanksgiving": "Gresko", "christmas_eve": "Gresko", "christmas": "Gresko"}
                ]}
            ],
            "weights": {"James": 0.5},
            "target": {"Gresko": 0.5, "Palombo": 0.25, "Pendola": 0.25},
            "mode": "Search",
            "search": {"excluded_holiday": "Easter"}
        }"#;
        let r = AllocationRequest::from_json(json).unwrap();
        assert_eq!(r.peers[0].couple, Couple::James);
        assert_eq!(r.weights[&Couple::James], 0.5);
        assert_eq!(r.mode, AllocationMode::Search);
        assert_eq!(r.search.excluded_holiday, Some(Holiday::Easter));
        // Unspecified search fields keep their defaults
        assert_eq!(r.search.pool, SearchOptions::default().pool);
        assert!(r.search.repair.is_some());
    }

    #[test]
    fn test_from_json_rejects_empty_table() {
        let json = r#"{
            "couple": "Us", "start_year": 2022, "num_years": 3,
            "peers": [{"couple": "Ali", "table": []}]
        }"#;
        assert!(AllocationRequest::from_json(json).is_err());
    }
}
