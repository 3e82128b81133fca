//! Scoring functions for holiday allocation.
//!
//! Both scorers are pure: they read a snapshot of places passed in by the
//! caller and never touch the ledger themselves. Higher is better for
//! both.
//!
//! | Scorer | Objective |
//! |--------|-----------|
//! | `DistributionScorer` | visit shares close to a target, overall and per holiday |
//! | `MatchScorer` | same family as weighted peers for one slot |
//! | `count_agreement` | equal positions between two whole schedules |

mod distribution;
mod matching;

pub use distribution::{family_counts, DistributionScorer, TargetDistribution, EMPTY_SCORE};
pub use matching::{count_agreement, Agreement, MatchScorer, Misalignment, PeerWeights};
