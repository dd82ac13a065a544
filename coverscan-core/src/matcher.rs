//! Nearest-match scan over the catalog.
//!
//! A pure, stateless computation: compare the query hash against every
//! catalog entry by Hamming distance, track the minimum, and report a match
//! only when the minimum is within the threshold. The scan always visits the
//! full catalog (tens of entries, so a linear pass is the right design) and
//! never exits early.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::phash::Phash64;

/// Default maximum Hamming distance (of 64 bits) still considered a match.
/// Empirically chosen for camera photos of printed covers, roughly 36% bit
/// tolerance; not a theoretically derived bound.
pub const DEFAULT_THRESHOLD: u32 = 23;

/// The outcome of one match operation.
///
/// No-match is a normal outcome, not an error; the best distance found is
/// still reported so callers can show how close the nearest cover was. The
/// distance is absent only for an empty catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The nearest entry was within the threshold.
    Matched { identifier: String, distance: u32 },
    /// No entry was close enough (or the catalog was empty).
    NoMatch { best_distance: Option<u32> },
}

impl MatchOutcome {
    /// The matched identifier, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched { identifier, .. } => Some(identifier),
            MatchOutcome::NoMatch { .. } => None,
        }
    }

    /// The minimum distance seen over the scan, absent for an empty catalog.
    pub fn best_distance(&self) -> Option<u32> {
        match self {
            MatchOutcome::Matched { distance, .. } => Some(*distance),
            MatchOutcome::NoMatch { best_distance } => *best_distance,
        }
    }
}

/// Scan the whole catalog for the entry nearest to `query`.
///
/// Ties on the minimum distance go to the entry encountered first in catalog
/// (= load) order. This mirrors the behavior of the original feature table
/// and is kept as an explicit reproducibility contract. A distance exactly
/// equal to `threshold` counts as a match.
pub fn find_best_match(query: Phash64, catalog: &Catalog, threshold: u32) -> MatchOutcome {
    let mut best: Option<(&str, u32)> = None;

    for entry in catalog.iter() {
        let distance = query.distance(entry.phash);
        // Strict `<` keeps the earliest entry on ties.
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((&entry.identifier, distance));
        }
    }

    match best {
        Some((identifier, distance)) if distance <= threshold => {
            debug!(identifier, distance, threshold, "Catalog match");
            MatchOutcome::Matched {
                identifier: identifier.to_owned(),
                distance,
            }
        }
        Some((identifier, distance)) => {
            debug!(
                nearest = identifier,
                distance, threshold, "Nearest entry beyond threshold"
            );
            MatchOutcome::NoMatch {
                best_distance: Some(distance),
            }
        }
        None => MatchOutcome::NoMatch {
            best_distance: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;

    fn catalog_of(pairs: &[(&str, &str)]) -> Catalog {
        Catalog::from_entries(
            pairs
                .iter()
                .map(|(id, hex)| CatalogEntry {
                    identifier: (*id).to_owned(),
                    phash: Phash64::from_hex(hex).unwrap(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_catalog_reports_no_distance() {
        let outcome = find_best_match(Phash64::ZERO, &Catalog::default(), DEFAULT_THRESHOLD);
        assert_eq!(
            outcome,
            MatchOutcome::NoMatch {
                best_distance: None
            }
        );
    }

    #[test]
    fn test_exact_match_distance_zero() {
        let catalog = catalog_of(&[("A", "0000000000000000")]);
        let outcome = find_best_match(Phash64::ZERO, &catalog, DEFAULT_THRESHOLD);
        assert_eq!(
            outcome,
            MatchOutcome::Matched {
                identifier: "A".into(),
                distance: 0
            }
        );
    }

    #[test]
    fn test_opposite_hash_is_no_match_with_distance() {
        let catalog = catalog_of(&[("A", "ffffffffffffffff")]);
        let outcome = find_best_match(Phash64::ZERO, &catalog, DEFAULT_THRESHOLD);
        assert_eq!(
            outcome,
            MatchOutcome::NoMatch {
                best_distance: Some(64)
            }
        );
    }

    #[test]
    fn test_nearest_entry_wins() {
        let catalog = catalog_of(&[
            ("far", "00000000ffffffff"),  // distance 32
            ("near", "0000000000000003"), // distance 2
            ("mid", "00000000000000ff"),  // distance 8
        ]);
        let outcome = find_best_match(Phash64::ZERO, &catalog, DEFAULT_THRESHOLD);
        assert_eq!(outcome.identifier(), Some("near"));
        assert_eq!(outcome.best_distance(), Some(2));
    }

    #[test]
    fn test_tie_break_prefers_earlier_entry() {
        // Both at distance 1 from the query; load order decides.
        let catalog = catalog_of(&[
            ("first", "0000000000000001"),
            ("second", "0000000000000002"),
        ]);
        let outcome = find_best_match(Phash64::ZERO, &catalog, DEFAULT_THRESHOLD);
        assert_eq!(outcome.identifier(), Some("first"));

        let reversed = catalog_of(&[
            ("second", "0000000000000002"),
            ("first", "0000000000000001"),
        ]);
        let outcome = find_best_match(Phash64::ZERO, &reversed, DEFAULT_THRESHOLD);
        assert_eq!(outcome.identifier(), Some("second"));
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // 23 bits set: exactly at the default threshold.
        let at = catalog_of(&[("A", "00000000007fffff")]);
        let outcome = find_best_match(Phash64::ZERO, &at, DEFAULT_THRESHOLD);
        assert_eq!(outcome.identifier(), Some("A"));
        assert_eq!(outcome.best_distance(), Some(23));

        // 24 bits set: one past the threshold.
        let past = catalog_of(&[("A", "0000000000ffffff")]);
        let outcome = find_best_match(Phash64::ZERO, &past, DEFAULT_THRESHOLD);
        assert_eq!(
            outcome,
            MatchOutcome::NoMatch {
                best_distance: Some(24)
            }
        );
    }

    #[test]
    fn test_threshold_zero_still_matches_exact() {
        let catalog = catalog_of(&[("A", "00000000000000ff"), ("B", "0000000000000000")]);
        let outcome = find_best_match(Phash64::ZERO, &catalog, 0);
        assert_eq!(outcome.identifier(), Some("B"));
        assert_eq!(outcome.best_distance(), Some(0));
    }
}
