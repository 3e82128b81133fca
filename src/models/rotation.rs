//! Rotation and rotation table models.
//!
//! A [`Rotation`] fixes one family per holiday for a single year. A
//! [`RotationTable`] is a peer's periodic pattern: the rotation for year
//! `y` is `table[y mod len]`.

use serde::{Deserialize, Serialize};

use super::{Family, Holiday};
use crate::error::{Error, Result};

/// One year of holiday → family assignments.
///
/// Every holiday is filled at construction, so lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation {
    pub easter: Family,
    pub thanksgiving: Family,
    pub christmas_eve: Family,
    pub christmas: Family,
}

impl Rotation {
    /// Creates a rotation in canonical holiday order.
    pub fn new(easter: Family, thanksgiving: Family, christmas_eve: Family, christmas: Family) -> Self {
        Self {
            easter,
            thanksgiving,
            christmas_eve,
            christmas,
        }
    }

    /// Rotation with the same family on every holiday.
    pub fn uniform(family: Family) -> Self {
        Self::new(family, family, family, family)
    }

    /// Builds a rotation from families listed in canonical holiday order.
    pub fn from_families(families: [Family; Holiday::COUNT]) -> Self {
        let [easter, thanksgiving, christmas_eve, christmas] = families;
        Self::new(easter, thanksgiving, christmas_eve, christmas)
    }

    /// Family for a holiday.
    pub fn get(&self, holiday: Holiday) -> Family {
        match holiday {
            Holiday::Easter => self.easter,
            Holiday::Thanksgiving => self.thanksgiving,
            Holiday::ChristmasEve => self.christmas_eve,
            Holiday::Christmas => self.christmas,
        }
    }

    /// Sets the family for a holiday.
    pub fn set(&mut self, holiday: Holiday, family: Family) {
        match holiday {
            Holiday::Easter => self.easter = family,
            Holiday::Thanksgiving => self.thanksgiving = family,
            Holiday::ChristmasEve => self.christmas_eve = family,
            Holiday::Christmas => self.christmas = family,
        }
    }

    /// Families in canonical holiday order.
    pub fn families(&self) -> [Family; Holiday::COUNT] {
        Holiday::ALL.map(|h| self.get(h))
    }

    /// `(holiday, family)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Holiday, Family)> + '_ {
        Holiday::ALL.into_iter().map(move |h| (h, self.get(h)))
    }

    /// Shifts families toward earlier holidays by `amount` positions,
    /// wrapping around. Negative amounts shift the other way.
    pub fn rotated_left(&self, amount: i64) -> Self {
        let mut families = self.families();
        let shift = amount.rem_euclid(Holiday::COUNT as i64) as usize;
        families.rotate_left(shift);
        Self::from_families(families)
    }

    /// Last holiday (canonical order) holding `family`, if any.
    pub fn holiday_of(&self, family: Family) -> Option<Holiday> {
        Holiday::ALL.into_iter().rev().find(|&h| self.get(h) == family)
    }
}

/// A peer's periodic schedule.
///
/// Invariant: never empty. Enforced by [`RotationTable::new`] and by
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rotation>", into = "Vec<Rotation>")]
pub struct RotationTable {
    rotations: Vec<Rotation>,
}

impl RotationTable {
    /// Creates a table.
    ///
    /// # Errors
    /// [`Error::EmptyRotationTable`] when `rotations` is empty.
    pub fn new(rotations: Vec<Rotation>) -> Result<Self> {
        if rotations.is_empty() {
            return Err(Error::EmptyRotationTable);
        }
        Ok(Self { rotations })
    }

    /// Single-rotation table (same holidays every year).
    pub fn fixed(rotation: Rotation) -> Self {
        Self {
            rotations: vec![rotation],
        }
    }

    /// Period-3 table from a 3-family cycle.
    ///
    /// Easter and Thanksgiving follow the cycle; Christmas Eve runs two
    /// steps ahead and Christmas one step ahead, so each year the three
    /// later holidays land on three different cycle entries.
    pub fn staggered(cycle: [Family; 3]) -> Self {
        let rotations = (0..3)
            .map(|k| {
                Rotation::new(
                    cycle[k % 3],
                    cycle[k % 3],
                    cycle[(k + 2) % 3],
                    cycle[(k + 1) % 3],
                )
            })
            .collect();
        Self { rotations }
    }

    /// Period-2 table: absent at Easter every year, the three later
    /// holidays alternate between `first` and `second`.
    pub fn alternating(first: Family, second: Family) -> Self {
        let rotations = [first, second]
            .into_iter()
            .map(|f| Rotation::new(Family::Gone, f, f, f))
            .collect();
        Self { rotations }
    }

    /// Period of the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    /// Always `false`; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// Rotations in period order.
    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }
}

impl TryFrom<Vec<Rotation>> for RotationTable {
    type Error = Error;

    fn try_from(rotations: Vec<Rotation>) -> Result<Self> {
        Self::new(rotations)
    }
}

impl From<RotationTable> for Vec<Rotation> {
    fn from(table: RotationTable) -> Self {
        table.rotations
    }
}
