//! Place records for import and export.
//!
//! Two shapes are supported:
//!
//! | Shape | One row per | Columns |
//! |-------|-------------|---------|
//! | [`PlaceRecord`] (long) | place | year, couple, holiday, family |
//! | [`WideRow`] (wide) | `(year, holiday)` slot | year, holiday, one family per couple |
//!
//! Long records hold plain strings and resolve them case-insensitively on
//! import, so hand-written files may use `"gresko"`, `"EVE"` or
//! `"Christmas Eve"`. Export always writes the canonical labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Couple, Family, Holiday, Place};

/// One place as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub year: i32,
    pub couple: String,
    pub holiday: String,
    pub family: String,
}

impl From<&Place> for PlaceRecord {
    fn from(place: &Place) -> Self {
        Self {
            year: place.year,
            couple: place.couple.label().to_string(),
            holiday: place.holiday.label().to_string(),
            family: place.family.label().to_string(),
        }
    }
}

impl TryFrom<&PlaceRecord> for Place {
    type Error = Error;

    fn try_from(record: &PlaceRecord) -> Result<Self> {
        Ok(Place::new(
            record.year,
            record.holiday.parse()?,
            record.couple.parse()?,
            record.family.parse()?,
        ))
    }
}

/// One `(year, holiday)` slot with every couple's family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    pub year: i32,
    pub holiday: Holiday,
    pub families: BTreeMap<Couple, Family>,
}

/// Groups places into one row per slot, sorted by `(year, holiday)`.
pub fn to_wide<'a>(places: impl IntoIterator<Item = &'a Place>) -> Vec<WideRow> {
    let mut rows: BTreeMap<(i32, Holiday), BTreeMap<Couple, Family>> = BTreeMap::new();
    for place in places {
        rows.entry((place.year, place.holiday))
            .or_default()
            .insert(place.couple, place.family);
    }
    rows.into_iter()
        .map(|((year, holiday), families)| WideRow {
            year,
            holiday,
            families,
        })
        .collect()
}

/// Expands wide rows back into places, in row then couple order.
pub fn from_wide(rows: &[WideRow]) -> Vec<Place> {
    rows.iter()
        .flat_map(|row| {
            row.families
                .iter()
                .map(move |(&couple, &family)| Place::new(row.year, row.holiday, couple, family))
        })
        .collect()
}

/// Serializes records as a JSON array.
pub fn records_to_json(records: &[PlaceRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parses a JSON array of records.
pub fn records_from_json(json: &str) -> Result<Vec<PlaceRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Parses and resolves places from a JSON array of records.
///
/// # Errors
/// - [`Error::Json`] for malformed input
/// - [`Error::UnknownToken`] for the first unresolvable token
pub fn import_places(json: &str) -> Result<Vec<Place>> {
    records_from_json(json)?
        .iter()
        .map(Place::try_from)
        .collect()
}

/// Writes places as a JSON array of records with canonical labels.
pub fn export_places<'a>(places: impl IntoIterator<Item = &'a Place>) -> Result<String> {
    let records: Vec<PlaceRecord> = places.into_iter().map(PlaceRecord::from).collect();
    records_to_json(&records)
}
