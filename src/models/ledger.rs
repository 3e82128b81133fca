//! Append-only place ledger.
//!
//! The ledger holds every place known during one run: the historical
//! prefix, peers' projected places and the focal couple's committed
//! choices. Places are only ever inserted; a second place for an
//! occupied `(year, holiday, couple)` key is rejected.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Couple, Holiday, Place, PlaceKey, Schedule};
use crate::error::{Error, Result};

/// Ordered, duplicate-free collection of places.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Place>", into = "Vec<Place>")]
pub struct Ledger {
    places: Vec<Place>,
    keys: HashSet<PlaceKey>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger seeded with a historical prefix.
    ///
    /// # Errors
    /// [`Error::DuplicatePlace`] if the history repeats a key.
    pub fn from_history(history: impl IntoIterator<Item = Place>) -> Result<Self> {
        let mut ledger = Self::new();
        for place in history {
            ledger.insert(place)?;
        }
        Ok(ledger)
    }

    /// Appends a place.
    ///
    /// # Errors
    /// [`Error::DuplicatePlace`] if the key is already occupied. The ledger
    /// is unchanged in that case.
    pub fn insert(&mut self, place: Place) -> Result<()> {
        if !self.keys.insert(place.key()) {
            return Err(Error::DuplicatePlace {
                year: place.year,
                holiday: place.holiday,
                couple: place.couple,
            });
        }
        self.places.push(place);
        Ok(())
    }

    /// Appends several places, stopping at the first duplicate.
    pub fn extend(&mut self, places: impl IntoIterator<Item = Place>) -> Result<()> {
        for place in places {
            self.insert(place)?;
        }
        Ok(())
    }

    /// Whether a key is occupied.
    pub fn contains(&self, year: i32, holiday: Holiday, couple: Couple) -> bool {
        self.keys.contains(&(year, holiday, couple))
    }

    /// The place for a key, if present.
    pub fn place_at(&self, year: i32, holiday: Holiday, couple: Couple) -> Option<&Place> {
        if !self.contains(year, holiday, couple) {
            return None;
        }
        self.places
            .iter()
            .find(|p| p.year == year && p.holiday == holiday && p.couple == couple)
    }

    /// All places of every couple for one year and holiday.
    pub fn places_at(&self, year: i32, holiday: Holiday) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|p| p.year == year && p.holiday == holiday)
            .collect()
    }

    /// All places of one couple, in insertion order.
    pub fn places_for(&self, couple: Couple) -> Vec<&Place> {
        self.places.iter().filter(|p| p.couple == couple).collect()
    }

    /// Places in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Places as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }

    /// Number of places.
    #[inline]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Materializes one couple's places as a schedule.
    pub fn schedule_for(&self, couple: Couple) -> Schedule {
        Schedule::from_places(self.places.iter().filter(|p| p.couple == couple).copied())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}

impl TryFrom<Vec<Place>> for Ledger {
    type Error = Error;

    fn try_from(places: Vec<Place>) -> Result<Self> {
        Self::from_history(places)
    }
}

impl From<Ledger> for Vec<Place> {
    fn from(ledger: Ledger) -> Self {
        ledger.places
    }
}
