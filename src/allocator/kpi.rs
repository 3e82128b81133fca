//! Allocation quality metrics (KPIs).
//!
//! Computes the indicators of a finished allocation from its ledger.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Peer match | Peer places with the focal couple's family at the same slot |
//! | Match percent | matched / available, in percent |
//! | Family counts | Focal places per family, absent family included |
//! | Holiday counts | Focal places per family, per holiday |
//! | Distribution score | Target agreement over all focal places |
//! | Holiday distribution score | Mean target agreement per holiday |

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Couple, Family, Holiday, Ledger};
use crate::scoring::DistributionScorer;

/// How often one peer and the focal couple are at the same family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeerMatch {
    pub couple: Couple,
    /// Peer places at a present family.
    pub available: usize,
    /// Available places where the focal couple is at the same family.
    pub matched: usize,
    /// `matched / available` in percent (0 when nothing is available).
    pub percent: f64,
}

/// Allocation performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationKpi {
    /// Focal couple the indicators describe.
    pub couple: Couple,
    /// One entry per peer found in the ledger, in couple order.
    pub peer_matches: Vec<PeerMatch>,
    /// Focal places per family.
    pub family_counts: BTreeMap<Family, usize>,
    /// Focal places per holiday and family.
    pub holiday_counts: BTreeMap<Holiday, BTreeMap<Family, usize>>,
    /// Distribution score over all focal places.
    pub distribution_score: f64,
    /// Mean of the per-holiday distribution scores.
    pub holiday_distribution_score: f64,
}

impl AllocationKpi {
    /// Computes KPIs from a ledger.
    ///
    /// # Arguments
    /// * `ledger` - Every place of the run, peers and history included.
    /// * `focal` - The couple being scheduled.
    /// * `distribution` - Scorer holding the target shares.
    pub fn calculate(ledger: &Ledger, focal: Couple, distribution: &DistributionScorer) -> Self {
        let ours: HashMap<(i32, Holiday), Family> = ledger
            .iter()
            .filter(|p| p.couple == focal)
            .map(|p| ((p.year, p.holiday), p.family))
            .collect();

        let mut per_peer: BTreeMap<Couple, (usize, usize)> = BTreeMap::new();
        for place in ledger.iter().filter(|p| p.couple != focal) {
            let entry = per_peer.entry(place.couple).or_insert((0, 0));
            if !place.is_present() {
                continue;
            }
            entry.0 += 1;
            if ours.get(&(place.year, place.holiday)) == Some(&place.family) {
                entry.1 += 1;
            }
        }
        let peer_matches = per_peer
            .into_iter()
            .map(|(couple, (available, matched))| PeerMatch {
                couple,
                available,
                matched,
                percent: if available == 0 {
                    0.0
                } else {
                    matched as f64 / available as f64 * 100.0
                },
            })
            .collect();

        let mut family_counts = BTreeMap::new();
        let mut holiday_counts: BTreeMap<Holiday, BTreeMap<Family, usize>> = BTreeMap::new();
        for (&(_, holiday), &family) in &ours {
            *family_counts.entry(family).or_insert(0) += 1;
            *holiday_counts
                .entry(holiday)
                .or_default()
                .entry(family)
                .or_insert(0) += 1;
        }

        let distribution_score = distribution.score(ledger, focal, None);
        let holiday_distribution_score = Holiday::ALL
            .into_iter()
            .map(|h| distribution.score(ledger, focal, Some(h)))
            .sum::<f64>()
            / Holiday::COUNT as f64;

        Self {
            couple: focal,
            peer_matches,
            family_counts,
            holiday_counts,
            distribution_score,
            holiday_distribution_score,
        }
    }

    /// Match entry for one peer.
    pub fn peer(&self, couple: Couple) -> Option<&PeerMatch> {
        self.peer_matches.iter().find(|m| m.couple == couple)
    }

    /// Number of focal places at `family` on `holiday`.
    pub fn count(&self, holiday: Holiday, family: Family) -> usize {
        self.holiday_counts
            .get(&holiday)
            .and_then(|row| row.get(&family))
            .copied()
            .unwrap_or(0)
    }
}

/// Renders the holiday × family spread table followed by the peer matches.
impl fmt::Display for AllocationKpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15}", "Holiday")?;
        for family in Family::ALL {
            write!(f, "{:>10}", family.label())?;
        }
        writeln!(f, "{:>10}", "Total")?;

        for holiday in Holiday::ALL {
            write!(f, "{:<15}", holiday.label())?;
            let mut row = 0;
            for family in Family::ALL {
                let n = self.count(holiday, family);
                row += n;
                write!(f, "{n:>10}")?;
            }
            writeln!(f, "{row:>10}")?;
        }

        write!(f, "{:<15}", "Total")?;
        for family in Family::ALL {
            write!(f, "{:>10}", self.family_counts.get(&family).copied().unwrap_or(0))?;
        }
        writeln!(f)?;

        for m in &self.peer_matches {
            writeln!(
                f,
                "{}: {}/{} ({:.1}%)",
                m.couple, m.matched, m.available, m.percent
            )?;
        }
        write!(
            f,
            "distribution {:.4}, per holiday {:.4}",
            self.distribution_score, self.holiday_distribution_score
        )
    }
}
