//! Schedule (solution) model.
//!
//! A schedule is one couple's places, sorted by year and canonical holiday
//! order. It is the artifact handed back to the caller once allocation
//! finishes and is not modified afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Family, Holiday, Place};

/// A couple's ordered sequence of places.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    places: Vec<Place>,
}

impl Schedule {
    /// Builds a schedule, sorting the places.
    pub fn from_places(places: impl IntoIterator<Item = Place>) -> Self {
        let mut places: Vec<Place> = places.into_iter().collect();
        places.sort();
        Self { places }
    }

    /// Places in `(year, holiday)` order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Consumes the schedule.
    pub fn into_places(self) -> Vec<Place> {
        self.places
    }

    /// Distinct years covered, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.places.iter().map(|p| p.year).collect();
        years.dedup();
        years
    }

    /// Family for a year and holiday, if scheduled.
    pub fn family_at(&self, year: i32, holiday: Holiday) -> Option<Family> {
        self.places
            .iter()
            .find(|p| p.year == year && p.holiday == holiday)
            .map(|p| p.family)
    }

    /// Places restricted to `[start_year, start_year + num_years)`.
    pub fn within(&self, start_year: i32, num_years: u32) -> Schedule {
        let end = i64::from(start_year) + i64::from(num_years);
        Self {
            places: self
                .places
                .iter()
                .filter(|p| p.year >= start_year && i64::from(p.year) < end)
                .copied()
                .collect(),
        }
    }

    /// Visit counts per family, absent tag included.
    pub fn family_counts(&self) -> BTreeMap<Family, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.places {
            *counts.entry(p.family).or_insert(0) += 1;
        }
        counts
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Couple;

    fn sample_schedule() -> Schedule {
        Schedule::from_places(vec![
            Place::new(2023, Holiday::Easter, Couple::Us, Family::Palombo),
            Place::new(2022, Holiday::Christmas, Couple::Us, Family::Gresko),
            Place::new(2022, Holiday::Easter, Couple::Us, Family::Gresko),
        ])
    }

    #[test]
    fn test_sorted_on_build() {
        let s = sample_schedule();
        let order: Vec<(i32, Holiday)> = s.places().iter().map(|p| (p.year, p.holiday)).collect();
        assert_eq!(
            order,
            vec![
                (2022, Holiday::Easter),
                (2022, Holiday::Christmas),
                (2023, Holiday::Easter)
            ]
        );
    }

    #[test]
    fn test_years_and_lookup() {
        let s = sample_schedule();
        assert_eq!(s.years(), vec![2022, 2023]);
        assert_eq!(s.family_at(2023, Holiday::Easter), Some(Family::Palombo));
        assert_eq!(s.family_at(2023, Holiday::Christmas), None);
    }

    #[test]
    fn test_within_horizon() {
        let s = sample_schedule();
        assert_eq!(s.within(2023, 1).len(), 1);
        assert_eq!(s.within(2022, 2).len(), 3);
        assert!(s.within(2030, 5).is_empty());
    }

    #[test]
    fn test_family_counts() {
        let counts = sample_schedule().family_counts();
        assert_eq!(counts[&Family::Gresko], 2);
        assert_eq!(counts[&Family::Palombo], 1);
        assert!(!counts.contains_key(&Family::Gone));
    }
}
