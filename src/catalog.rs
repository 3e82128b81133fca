//! Rotation catalog: candidate yearly rotations for the focal couple.
//!
//! # Algorithm
//!
//! 1. Enumerate every ordering of the family pool over the holiday
//!    sequence (positional permutations, so repeated families yield
//!    repeated orderings).
//! 2. Reject an ordering if two holidays adjacent in canonical order share
//!    a family.
//! 3. Reject it as well if, after rotating it left by one position, two
//!    adjacent entries still match. This catches a repeat across the
//!    year boundary when the rotation restarts.
//! 4. Keep the first occurrence of each surviving ordering.
//!
//! A pool shorter than the holiday count is completed by a second
//! enumeration of filler orderings drawn from the same pool; every
//! `known ++ filler` combination goes through the same filter. A longer
//! pool is truncated per ordering.
//!
//! Enumeration order is deterministic and is the tie-break order used by
//! the search allocator.

use std::collections::HashSet;

use crate::models::{Family, Holiday, Rotation};

/// Adjacency-filtered candidate rotations.
#[derive(Debug, Clone)]
pub struct RotationCatalog {
    pool: Vec<Family>,
    candidates: Vec<Rotation>,
}

impl RotationCatalog {
    /// Builds the catalog for a family pool.
    ///
    /// Repeats in `pool` bias the candidates toward that family, e.g.
    /// `[Gresko, Gresko, Palombo, Pendola]` gives Gresko two holidays a year.
    pub fn new(pool: &[Family]) -> Self {
        let candidates = candidate_sequences(pool)
            .into_iter()
            .filter(|seq| is_adjacency_free(seq))
            .filter_map(|seq| to_rotation(&seq))
            .collect();
        Self {
            pool: pool.to_vec(),
            candidates,
        }
    }

    /// The family pool the catalog was built from.
    pub fn pool(&self) -> &[Family] {
        &self.pool
    }

    /// Candidates in enumeration order.
    pub fn candidates(&self) -> &[Rotation] {
        &self.candidates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Whether no two neighbours match, including across the wraparound.
pub fn is_adjacency_free(seq: &[Family]) -> bool {
    if has_adjacent_repeat(seq) {
        return false;
    }
    let mut rotated = seq.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(1);
    }
    !has_adjacent_repeat(&rotated)
}

fn has_adjacent_repeat(seq: &[Family]) -> bool {
    seq.windows(2).any(|w| w[0] == w[1])
}

/// Unfiltered, de-duplicated orderings of length `Holiday::COUNT`.
fn candidate_sequences(pool: &[Family]) -> Vec<Vec<Family>> {
    let slots = Holiday::COUNT;
    let raw: Vec<Vec<Family>> = if pool.is_empty() {
        Vec::new()
    } else if pool.len() < slots {
        let missing = slots - pool.len();
        let known = permutations(pool, pool.len());
        let fillers = permutations(pool, missing.min(pool.len()));
        fillers
            .iter()
            .flat_map(|fill| {
                known.iter().map(move |k| {
                    let mut seq = k.clone();
                    seq.extend_from_slice(fill);
                    seq
                })
            })
            .filter(|seq| seq.len() == slots)
            .collect()
    } else {
        permutations(pool, pool.len())
            .into_iter()
            .map(|mut seq| {
                seq.truncate(slots);
                seq
            })
            .collect()
    };

    let mut seen = HashSet::new();
    raw.into_iter().filter(|seq| seen.insert(seq.clone())).collect()
}

/// Positional `r`-permutations of `items`, lexicographic in index order.
fn permutations(items: &[Family], r: usize) -> Vec<Vec<Family>> {
    fn walk(
        items: &[Family],
        r: usize,
        used: &mut Vec<bool>,
        current: &mut Vec<Family>,
        out: &mut Vec<Vec<Family>>,
    ) {
        if current.len() == r {
            out.push(current.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            current.push(items[i]);
            walk(items, r, used, current, out);
            current.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    if r > items.len() {
        return out;
    }
    let mut used = vec![false; items.len()];
    walk(items, r, &mut used, &mut Vec::with_capacity(r), &mut out);
    out
}

fn to_rotation(seq: &[Family]) -> Option<Rotation> {
    let families: [Family; Holiday::COUNT] = seq.try_into().ok()?;
    Some(Rotation::from_families(families))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Family::*;

    #[test]
    fn test_standard_pool() {
        let catalog = RotationCatalog::new(&[Gresko, Gresko, Palombo, Pendola]);
        // Gresko must sit on opposite holidays: positions (0,2) or (1,3),
        // with Palombo/Pendola filling the other two in either order.
        assert_eq!(catalog.len(), 4);
        for r in catalog.candidates() {
            let f = r.families();
            assert!(
                (f[0] == Gresko && f[2] == Gresko) || (f[1] == Gresko && f[3] == Gresko),
                "{f:?}"
            );
        }
    }

    #[test]
    fn test_enumeration_order_is_stable() {
        let catalog = RotationCatalog::new(&[Gresko, Gresko, Palombo, Pendola]);
        assert_eq!(
            catalog.candidates()[0].families(),
            [Gresko, Palombo, Gresko, Pendola]
        );
        assert_eq!(
            catalog.candidates()[1].families(),
            [Gresko, Pendola, Gresko, Palombo]
        );
    }

    #[test]
    fn test_wraparound_rejected() {
        assert!(!is_adjacency_free(&[Gresko, Palombo, Pendola, Gresko]));
        assert!(is_adjacency_free(&[Gresko, Palombo, Gresko, Pendola]));
        assert!(!is_adjacency_free(&[Gresko, Gresko, Palombo, Pendola]));
    }

    #[test]
    fn test_no_duplicates() {
        let catalog = RotationCatalog::new(&[Gresko, Gresko, Palombo, Palombo]);
        let unique: HashSet<_> = catalog.candidates().iter().collect();
        assert_eq!(unique.len(), catalog.len());
        // Only the two alternating orderings survive.
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_short_pool_is_filled() {
        let catalog = RotationCatalog::new(&[Gresko, Palombo, Pendola]);
        assert!(!catalog.is_empty());
        for r in catalog.candidates() {
            assert!(is_adjacency_free(&r.families()));
        }
        // Filler Gresko is tried first; the first known prefix that keeps
        // it off both neighbours wins.
        assert_eq!(
            catalog.candidates()[0].families(),
            [Palombo, Gresko, Pendola, Gresko]
        );
    }

    #[test]
    fn test_long_pool_truncated() {
        let catalog = RotationCatalog::new(&[Gresko, Palombo, Pendola, Gresko, Palombo]);
        assert!(!catalog.is_empty());
        let unique: HashSet<_> = catalog.candidates().iter().collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn test_unfillable_pool_is_empty() {
        assert!(RotationCatalog::new(&[Gresko, Gresko, Gresko, Gresko]).is_empty());
        assert!(RotationCatalog::new(&[]).is_empty());
        assert!(RotationCatalog::new(&[Gresko]).is_empty());
    }

    fn family() -> impl Strategy<Value = Family> {
        prop::sample::select(Family::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_candidates_are_adjacency_free(pool in prop::collection::vec(family(), 1..=5)) {
            let catalog = RotationCatalog::new(&pool);
            for r in catalog.candidates() {
                let f = r.families();
                for i in 0..Holiday::COUNT {
                    prop_assert_ne!(f[i], f[(i + 1) % Holiday::COUNT]);
                }
            }
        }
    }
}
