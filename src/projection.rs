//! Peer projection: periodic lookup of a peer's places.
//!
//! The rotation for abstract year `y` is `table[y mod len(table)]`, using
//! Euclidean modulo so negative years stay periodic as well.

use serde::{Deserialize, Serialize};

use crate::models::{Couple, Holiday, Place, Rotation, RotationTable};

/// A peer couple and its periodic rotation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRotation {
    pub couple: Couple,
    pub table: RotationTable,
}

impl PeerRotation {
    pub fn new(couple: Couple, table: RotationTable) -> Self {
        Self { couple, table }
    }

    /// The peer's rotation for a year.
    pub fn rotation_for(&self, year: i32) -> &Rotation {
        project(&self.table, year)
    }

    /// The peer's place for a year and holiday.
    pub fn place_at(&self, year: i32, holiday: Holiday) -> Place {
        Place::new(year, holiday, self.couple, self.rotation_for(year).get(holiday))
    }

    /// The peer's places over `num_years` years from `start_year`, in
    /// `(year, holiday)` order.
    pub fn places(&self, start_year: i32, num_years: u32) -> Vec<Place> {
        horizon(start_year, num_years)
            .flat_map(|year| Holiday::ALL.into_iter().map(move |h| (year, h)))
            .map(|(year, h)| self.place_at(year, h))
            .collect()
    }
}

/// Rotation of `table` for `year`.
pub fn project(table: &RotationTable, year: i32) -> &Rotation {
    let index = i64::from(year).rem_euclid(table.len() as i64) as usize;
    &table.rotations()[index]
}

/// Every peer's place for one year and holiday, in peer order.
pub fn project_places(peers: &[PeerRotation], year: i32, holiday: Holiday) -> Vec<Place> {
    peers.iter().map(|p| p.place_at(year, holiday)).collect()
}

/// Years `start_year .. start_year + num_years`.
pub fn horizon(start_year: i32, num_years: u32) -> impl Iterator<Item = i32> {
    (0..num_years).map_while(move |i| start_year.checked_add(i32::try_from(i).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Family::*;
    use proptest::prelude::*;

    fn ali() -> PeerRotation {
        PeerRotation::new(
            Couple::Ali,
            RotationTable::new(vec![
                Rotation::new(Palombo, Palombo, Pendola, Gone),
                Rotation::new(Gone, Pendola, Gone, Palombo),
                Rotation::new(Pendola, Gone, Palombo, Pendola),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_project_modulo() {
        let peer = ali();
        // 2022 mod 3 = 0
        assert_eq!(peer.rotation_for(2022).easter, Palombo);
        assert_eq!(peer.rotation_for(2023).easter, Gone);
        assert_eq!(peer.rotation_for(2024).easter, Pendola);
        assert_eq!(peer.rotation_for(2025).easter, Palombo);
    }

    #[test]
    fn test_place_at() {
        let p = ali().place_at(2023, Holiday::Christmas);
        assert_eq!(p, Place::new(2023, Holiday::Christmas, Couple::Ali, Palombo));
    }

    #[test]
    fn test_places_over_horizon() {
        let places = ali().places(2022, 2);
        assert_eq!(places.len(), 2 * Holiday::COUNT);
        assert_eq!(places[0].year, 2022);
        assert_eq!(places[0].holiday, Holiday::Easter);
        assert_eq!(places[7].year, 2023);
        assert_eq!(places[7].holiday, Holiday::Christmas);
    }

    #[test]
    fn test_project_places_peer_order() {
        let peers = vec![
            ali(),
            PeerRotation::new(Couple::James, RotationTable::fixed(Rotation::uniform(Gresko))),
        ];
        let places = project_places(&peers, 2022, Holiday::Thanksgiving);
        assert_eq!(places[0].couple, Couple::Ali);
        assert_eq!(places[1].couple, Couple::James);
        assert_eq!(places[1].family, Gresko);
    }

    #[test]
    fn test_horizon() {
        assert_eq!(horizon(2022, 3).collect::<Vec<_>>(), vec![2022, 2023, 2024]);
        assert_eq!(horizon(5, 0).count(), 0);
    }

    fn rotation() -> impl Strategy<Value = Rotation> {
        let family = prop::sample::select(crate::models::Family::ALL.to_vec());
        [family.clone(), family.clone(), family.clone(), family]
            .prop_map(Rotation::from_families)
    }

    proptest! {
        #[test]
        fn prop_projection_is_periodic(
            rotations in prop::collection::vec(rotation(), 1..6),
            year in -10_000i32..10_000,
        ) {
            let table = RotationTable::new(rotations).unwrap();
            let period = table.len() as i32;
            prop_assert_eq!(project(&table, year), project(&table, year + period));
        }
    }
}
