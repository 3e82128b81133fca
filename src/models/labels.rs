//! Closed label sets: families, holidays and couples.
//!
//! Each set is a fixed enumeration with a canonical order. Every consumer
//! matches on the variants exhaustively, so adding a member forces the
//! scorers and generators to be revisited.
//!
//! Tokens parse case-insensitively from either the variant name or the
//! display label (`"EVE"` and `"christmas eve"` both resolve to
//! [`Holiday::ChristmasEve`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, TokenKind};

/// Where a couple spends a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Family {
    Gresko,
    Palombo,
    Pendola,
    /// Not present for the holiday.
    Gone,
}

/// A recurring yearly event. Declaration order is the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Holiday {
    Easter,
    Thanksgiving,
    ChristmasEve,
    Christmas,
}

/// A party whose holidays are scheduled or matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Couple {
    Us,
    Ali,
    Lauren,
    James,
    George,
}

impl Family {
    /// All families, absent tag last.
    pub const ALL: [Family; 4] = [Family::Gresko, Family::Palombo, Family::Pendola, Family::Gone];

    /// Families a couple can actually visit.
    pub const PRESENT: [Family; 3] = [Family::Gresko, Family::Palombo, Family::Pendola];

    /// Whether this is the absent tag.
    #[inline]
    pub fn is_absent(self) -> bool {
        matches!(self, Family::Gone)
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Family::Gresko => "Gresko",
            Family::Palombo => "Palombo",
            Family::Pendola => "Pendola",
            Family::Gone => "GONE",
        }
    }
}

impl Holiday {
    /// Number of holidays in a year.
    pub const COUNT: usize = 4;

    /// All holidays in canonical order.
    pub const ALL: [Holiday; Holiday::COUNT] = [
        Holiday::Easter,
        Holiday::Thanksgiving,
        Holiday::ChristmasEve,
        Holiday::Christmas,
    ];

    /// Position in the canonical order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Holiday::Easter => 0,
            Holiday::Thanksgiving => 1,
            Holiday::ChristmasEve => 2,
            Holiday::Christmas => 3,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Holiday::Easter => "Easter",
            Holiday::Thanksgiving => "Thanksgiving",
            Holiday::ChristmasEve => "Christmas Eve",
            Holiday::Christmas => "Christmas",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Holiday::Easter => "EASTER",
            Holiday::Thanksgiving => "THANKSGIVING",
            Holiday::ChristmasEve => "EVE",
            Holiday::Christmas => "CHRISTMAS",
        }
    }
}

impl Couple {
    pub const ALL: [Couple; 5] = [
        Couple::Us,
        Couple::Ali,
        Couple::Lauren,
        Couple::James,
        Couple::George,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Couple::Us => "Us",
            Couple::Ali => "Ali",
            Couple::Lauren => "Lauren",
            Couple::James => "James",
            Couple::George => "George",
        }
    }
}

/// Normalizes a token for comparison: trimmed, uppercase, no separators.
fn normalize(token: &str) -> String {
    token
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Family::ALL
            .into_iter()
            .find(|f| normalize(f.label()) == key)
            .ok_or_else(|| Error::UnknownToken {
                kind: TokenKind::Family,
                token: s.to_string(),
            })
    }
}

impl FromStr for Holiday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Holiday::ALL
            .into_iter()
            .find(|h| normalize(h.label()) == key || h.short_name() == key)
            .ok_or_else(|| Error::UnknownToken {
                kind: TokenKind::Holiday,
                token: s.to_string(),
            })
    }
}

impl FromStr for Couple {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Couple::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == key)
            .ok_or_else(|| Error::UnknownToken {
                kind: TokenKind::Couple,
                token: s.to_string(),
            })
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Couple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holiday_canonical_order() {
        for (i, h) in Holiday::ALL.iter().enumerate() {
            assert_eq!(h.index(), i);
        }
        assert!(Holiday::Easter < Holiday::Christmas);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("gresko".parse::<Family>().unwrap(), Family::Gresko);
        assert_eq!("GONE".parse::<Family>().unwrap(), Family::Gone);
        assert_eq!("ali".parse::<Couple>().unwrap(), Couple::Ali);
        assert_eq!("thanksgiving".parse::<Holiday>().unwrap(), Holiday::Thanksgiving);
    }

    #[test]
    fn test_parse_eve_aliases() {
        assert_eq!("EVE".parse::<Holiday>().unwrap(), Holiday::ChristmasEve);
        assert_eq!("Christmas Eve".parse::<Holiday>().unwrap(), Holiday::ChristmasEve);
        assert_eq!("christmas".parse::<Holiday>().unwrap(), Holiday::Christmas);
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = "Smith".parse::<Family>().unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownToken {
                kind: TokenKind::Family,
                ..
            }
        ));
        assert!("Halloween".parse::<Holiday>().is_err());
        assert!("Bob".parse::<Couple>().is_err());
    }

    #[test]
    fn test_label_round_trip() {
        for f in Family::ALL {
            assert_eq!(f.label().parse::<Family>().unwrap(), f);
        }
        for h in Holiday::ALL {
            assert_eq!(h.to_string().parse::<Holiday>().unwrap(), h);
        }
        for c in Couple::ALL {
            assert_eq!(c.to_string().parse::<Couple>().unwrap(), c);
        }
    }

    #[test]
    fn test_present_excludes_absent() {
        assert!(Family::PRESENT.iter().all(|f| !f.is_absent()));
        assert!(Family::Gone.is_absent());
    }
}
