//! Rule-based mode: a compact parity pattern over two peers.
//!
//! # Algorithm
//!
//! The first peer is the primary, the second the secondary. For each year,
//! with `later` = the non-Easter holidays in canonical order:
//!
//! | Year parity | Easter | Later holidays |
//! |-------------|--------|----------------|
//! | even | anchor | copy the primary on its first two present holidays, anchor on the rest |
//! | odd | other member of the pair | anchor where the primary is absent, anchor on one picked holiday where the secondary is present, copy the primary on the last |
//!
//! Parity is taken from the absolute year, so it agrees with the peers'
//! period-2 tables.
//!
//! The odd-year pick goes through a [`HolidayPicker`]; [`RandomPick`] takes
//! any `rand::Rng`, so a seeded generator makes runs reproducible.

use log::debug;
use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Allocation, AllocationMode, Allocator};
use crate::error::{Error, Result};
use crate::models::{Holiday, Place};
use crate::projection::PeerRotation;

/// Non-Easter holidays in canonical order.
const LATER: [Holiday; 3] = [Holiday::Thanksgiving, Holiday::ChristmasEve, Holiday::Christmas];

/// Chooses one holiday out of a non-empty set of options.
pub trait HolidayPicker {
    /// Returns one of `options`, or `None` if it is empty.
    fn pick(&mut self, options: &[Holiday]) -> Option<Holiday>;
}

/// Always takes the first option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl HolidayPicker for FirstAvailable {
    fn pick(&mut self, options: &[Holiday]) -> Option<Holiday> {
        options.first().copied()
    }
}

/// Takes a uniformly random option.
#[derive(Debug, Clone)]
pub struct RandomPick<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPick<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> HolidayPicker for RandomPick<R> {
    fn pick(&mut self, options: &[Holiday]) -> Option<Holiday> {
        options.choose(&mut self.rng).copied()
    }
}

impl Allocator {
    /// Runs the rule-based mode.
    ///
    /// With a request seed the odd-year pick is random from
    /// `SmallRng::seed_from_u64(seed)`; without one it takes the first
    /// option.
    ///
    /// # Errors
    /// - [`Error::RuleNotApplicable`] with fewer than two peers, or when a
    ///   year's peer places cannot satisfy the rules
    /// - [`Error::DuplicatePlace`] if the history overlaps the horizon
    pub fn rules(&self) -> Result<Allocation> {
        match self.request().seed {
            Some(seed) => self.rules_with(&mut RandomPick::new(SmallRng::seed_from_u64(seed))),
            None => self.rules_with(&mut FirstAvailable),
        }
    }

    /// Runs the rule-based mode with a caller-supplied picker.
    pub fn rules_with<P: HolidayPicker>(&self, picker: &mut P) -> Result<Allocation> {
        let request = self.request();
        let (primary, secondary) = match request.peers.as_slice() {
            [primary, secondary, ..] => (primary, secondary),
            _ => {
                return Err(Error::RuleNotApplicable {
                    year: request.start_year,
                    reason: format!("needs two peers, got {}", request.peers.len()),
                })
            }
        };

        let mut ledger = self.seed_ledger()?;
        for year in request.years() {
            for peer in &request.peers {
                ledger.extend(peer.places(year, 1))?;
            }
            let focal = if year.rem_euclid(2) == 0 {
                self.even_year(primary, year)?
            } else {
                self.odd_year(primary, secondary, year, picker)?
            };
            debug!(
                "rules: {year} -> {}",
                focal
                    .iter()
                    .map(|p| format!("{}={}", p.holiday, p.family))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            ledger.extend(focal)?;
        }

        Ok(Allocation::new(AllocationMode::Rules, request.couple, ledger))
    }

    fn even_year(&self, primary: &PeerRotation, year: i32) -> Result<Vec<Place>> {
        let couple = self.request().couple;
        let anchor = self.request().rules.anchor;

        let copied: Vec<Place> = LATER
            .iter()
            .map(|&holiday| primary.place_at(year, holiday))
            .filter(Place::is_present)
            .take(2)
            .map(|place| place.for_couple(couple))
            .collect();
        if copied.len() < 2 {
            return Err(Error::RuleNotApplicable {
                year,
                reason: format!("{} is present on fewer than two later holidays", primary.couple),
            });
        }

        let mut focal = vec![Place::new(year, Holiday::Easter, couple, anchor)];
        for holiday in LATER {
            match copied.iter().find(|p| p.holiday == holiday) {
                Some(place) => focal.push(*place),
                None => focal.push(Place::new(year, holiday, couple, anchor)),
            }
        }
        Ok(focal)
    }

    fn odd_year<P: HolidayPicker>(
        &self,
        primary: &PeerRotation,
        secondary: &PeerRotation,
        year: i32,
        picker: &mut P,
    ) -> Result<Vec<Place>> {
        let couple = self.request().couple;
        let rules = &self.request().rules;
        let not_applicable = |reason: String| Error::RuleNotApplicable { year, reason };

        let absent = LATER
            .into_iter()
            .find(|&h| !primary.place_at(year, h).is_present())
            .ok_or_else(|| not_applicable(format!("{} is never absent", primary.couple)))?;

        let present: Vec<Holiday> = LATER
            .into_iter()
            .filter(|&h| h != absent && secondary.place_at(year, h).is_present())
            .collect();
        let picked = picker
            .pick(&present)
            .ok_or_else(|| not_applicable(format!("{} has no free present holiday", secondary.couple)))?;

        let remaining = LATER
            .into_iter()
            .find(|&h| h != absent && h != picked)
            .ok_or_else(|| not_applicable("no holiday left to copy".to_string()))?;
        let copied = primary.place_at(year, remaining);
        let easter = rules.pair.other(copied.family).ok_or_else(|| {
            not_applicable(format!(
                "{} holds {} on {remaining}, outside the Easter pair",
                primary.couple, copied.family
            ))
        })?;

        let mut focal = vec![
            Place::new(year, Holiday::Easter, couple, easter),
            Place::new(year, absent, couple, rules.anchor),
            Place::new(year, picked, couple, rules.anchor),
            copied.for_couple(couple),
        ];
        focal.sort();
        Ok(focal)
    }
}
