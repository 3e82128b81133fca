//! Input validation for allocation requests.
//!
//! Checks the configuration before any projection or scoring runs.
//! Detects:
//! - Duplicate or self-referencing peers
//! - Missing, negative or non-finite peer weights
//! - Target shares outside `(0, 1]` or targets for the absent family
//! - Repeated `(year, holiday, couple)` keys in the history
//! - An empty search pool or a degenerate family pair
//!
//! Empty rotation tables cannot reach this point: `RotationTable` refuses
//! them at construction and deserialization.

use std::collections::HashSet;

use crate::allocator::{AllocationRequest, FamilyPair};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The same couple is configured twice as a peer.
    DuplicatePeer,
    /// The focal couple is also configured as a peer.
    FocalIsPeer,
    /// A peer has no weight.
    MissingWeight,
    /// A weight is negative, NaN or infinite.
    InvalidWeight,
    /// A target share is outside `(0, 1]`.
    InvalidTargetShare,
    /// A target share is given for the absent family.
    AbsentTarget,
    /// The history repeats a `(year, holiday, couple)` key.
    DuplicateHistory,
    /// The search pool is empty.
    EmptyPool,
    /// A family pair has identical or absent members.
    InvalidPair,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an allocation request.
///
/// Checks:
/// 1. No peer appears twice and the focal couple is not a peer
/// 2. Every peer has a weight; every weight is finite and non-negative
/// 3. Every target share lies in `(0, 1]` and the absent family has none
/// 4. The history has no repeated key
/// 5. The search pool is not empty
/// 6. The repair and rule pairs have two distinct present families
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &AllocationRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut peers = HashSet::new();
    for peer in &request.peers {
        if peer.couple == request.couple {
            errors.push(ValidationError::new(
                ValidationErrorKind::FocalIsPeer,
                format!("Focal couple {} is listed as a peer", peer.couple),
            ));
        }
        if !peers.insert(peer.couple) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePeer,
                format!("Duplicate peer: {}", peer.couple),
            ));
        }
        if !request.weights.contains_key(&peer.couple) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingWeight,
                format!("Peer {} has no weight", peer.couple),
            ));
        }
    }

    for (couple, &weight) in &request.weights {
        if !weight.is_finite() || weight < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Weight for {couple} must be finite and non-negative, got {weight}"),
            ));
        }
    }

    for (family, &share) in &request.target {
        if family.is_absent() {
            errors.push(ValidationError::new(
                ValidationErrorKind::AbsentTarget,
                format!("Target share given for absent family {family}"),
            ));
        } else if !(share > 0.0 && share <= 1.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTargetShare,
                format!("Target share for {family} must be in (0, 1], got {share}"),
            ));
        }
    }

    let mut keys = HashSet::new();
    for place in &request.history {
        if !keys.insert(place.key()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateHistory,
                format!(
                    "History repeats {} for {} in {}",
                    place.couple, place.holiday, place.year
                ),
            ));
        }
    }

    if request.search.pool.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPool,
            "Search pool has no families",
        ));
    }

    if let Some(pair) = request.search.repair {
        check_pair(&pair, "Repair", &mut errors);
    }
    check_pair(&request.rules.pair, "Rule", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_pair(pair: &FamilyPair, label: &str, errors: &mut Vec<ValidationError>) {
    if pair.first == pair.second || pair.first.is_absent() || pair.second.is_absent() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPair,
            format!(
                "{label} pair needs two distinct present families, got {} and {}",
                pair.first, pair.second
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::SearchOptions;
    use crate::models::{Couple, Family, Holiday, Place, Rotation, RotationTable};

    fn gresko_table() -> RotationTable {
        RotationTable::fixed(Rotation::uniform(Family::Gresko))
    }

    fn sample_request() -> AllocationRequest {
        AllocationRequest::new(Couple::Us, 2022, 3)
            .with_peer(Couple::Ali, gresko_table())
            .with_peer(Couple::Lauren, gresko_table())
            .with_weight(Couple::Ali, 0.5)
            .with_weight(Couple::Lauren, 0.5)
            .with_target(Family::Gresko, 0.5)
            .with_target(Family::Palombo, 0.25)
            .with_target(Family::Pendola, 0.25)
    }

    fn kinds(request: &AllocationRequest) -> Vec<ValidationErrorKind> {
        validate_request(request)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&sample_request()).is_ok());
    }

    #[test]
    fn test_duplicate_peer() {
        let r = sample_request().with_peer(Couple::Ali, gresko_table());
        assert!(kinds(&r).contains(&ValidationErrorKind::DuplicatePeer));
    }

    #[test]
    fn test_focal_is_peer() {
        let r = sample_request()
            .with_peer(Couple::Us, gresko_table())
            .with_weight(Couple::Us, 1.0);
        assert_eq!(kinds(&r), vec![ValidationErrorKind::FocalIsPeer]);
    }

    #[test]
    fn test_missing_weight() {
        let r = sample_request().with_peer(Couple::James, gresko_table());
        assert_eq!(kinds(&r), vec![ValidationErrorKind::MissingWeight]);
    }

    #[test]
    fn test_invalid_weight() {
        let r = sample_request().with_weight(Couple::Ali, -0.1);
        assert!(kinds(&r).contains(&ValidationErrorKind::InvalidWeight));
        let r = sample_request().with_weight(Couple::Ali, f64::NAN);
        assert!(kinds(&r).contains(&ValidationErrorKind::InvalidWeight));
    }

    #[test]
    fn test_target_share_bounds() {
        let r = sample_request().with_target(Family::Gresko, 0.0);
        assert_eq!(kinds(&r), vec![ValidationErrorKind::InvalidTargetShare]);
        let r = sample_request().with_target(Family::Gresko, 1.5);
        assert_eq!(kinds(&r), vec![ValidationErrorKind::InvalidTargetShare]);
        let r = sample_request().with_target(Family::Gresko, 1.0);
        assert!(validate_request(&r).is_ok());
    }

    #[test]
    fn test_absent_target() {
        let r = sample_request().with_target(Family::Gone, 0.1);
        assert_eq!(kinds(&r), vec![ValidationErrorKind::AbsentTarget]);
    }

    #[test]
    fn test_duplicate_history() {
        let p = Place::new(2021, Holiday::Easter, Couple::Us, Family::Gresko);
        let r = sample_request().with_history(vec![p, p]);
        assert_eq!(kinds(&r), vec![ValidationErrorKind::DuplicateHistory]);
    }

    #[test]
    fn test_empty_pool_and_bad_pair() {
        let r = sample_request().with_search(SearchOptions {
            pool: Vec::new(),
            excluded_holiday: None,
            repair: Some(FamilyPair::new(Family::Palombo, Family::Palombo)),
        });
        let k = kinds(&r);
        assert!(k.contains(&ValidationErrorKind::EmptyPool));
        assert!(k.contains(&ValidationErrorKind::InvalidPair));
    }

    #[test]
    fn test_multiple_errors() {
        let r = sample_request()
            .with_peer(Couple::George, gresko_table())
            .with_target(Family::Gone, 0.2)
            .with_weight(Couple::Ali, -1.0);
        let errors = validate_request(&r).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
