//! Crate error type.

use thiserror::Error;

use crate::models::{Couple, Holiday};
use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Which closed set a token failed to resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Family,
    Holiday,
    Couple,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Family => "family",
            TokenKind::Holiday => "holiday",
            TokenKind::Couple => "couple",
        };
        f.write_str(name)
    }
}

/// Errors raised by the allocation engine and its record layer.
#[derive(Debug, Error)]
pub enum Error {
    /// An import token did not match any member of its closed set.
    #[error("unknown {kind} token '{token}'")]
    UnknownToken { kind: TokenKind, token: String },

    /// A rotation table with no rotations.
    #[error("rotation table is empty")]
    EmptyRotationTable,

    /// A second place for an already occupied (year, holiday, couple) key.
    #[error("{couple} already has a place for {holiday} in {year}")]
    DuplicatePlace {
        year: i32,
        holiday: Holiday,
        couple: Couple,
    },

    /// The request failed validation.
    #[error("invalid allocation request: {}", summarize(.0))]
    InvalidRequest(Vec<ValidationError>),

    /// The rotation catalog produced no candidate for search mode.
    #[error("rotation catalog has no adjacency-free candidate")]
    EmptyCatalog,

    /// The rule-based generator cannot derive a place for this year.
    #[error("rule-based allocation failed for {year}: {reason}")]
    RuleNotApplicable { year: i32, reason: String },

    /// JSON encoding or decoding failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
