//! Composite risk scoring.
//!
//! `score = min(100, 15 × number of found results)`. Deliberately flat
//! and provider-count-driven: a breach match and a social-media presence
//! contribute equally. Pure and deterministic — the same result sequence
//! always yields the same score.

use crate::types::SourceResult;

/// Points contributed by each found source.
const POINTS_PER_FOUND: u32 = 15;

/// Score ceiling.
const MAX_SCORE: u32 = 100;

/// Reduce a settled result sequence to a bounded risk score.
pub fn risk_score(results: &[SourceResult]) -> u8 {
    let found = results.iter().filter(|r| r.found).count() as u32;
    MAX_SCORE.min(POINTS_PER_FOUND * found) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn result(found: bool) -> SourceResult {
        SourceResult::new("test", found, Map::new())
    }

    #[test]
    fn empty_sequence_scores_zero() {
        assert_eq!(risk_score(&[]), 0);
    }

    #[test]
    fn fifteen_points_per_found_source() {
        let results = vec![result(true), result(false), result(true)];
        assert_eq!(risk_score(&results), 30);
    }

    #[test]
    fn none_found_scores_zero() {
        let results = vec![result(false); 8];
        assert_eq!(risk_score(&results), 0);
    }

    #[test]
    fn caps_at_one_hundred() {
        // 7 found would be 105 uncapped
        let results = vec![result(true); 7];
        assert_eq!(risk_score(&results), 100);
        let results = vec![result(true); 20];
        assert_eq!(risk_score(&results), 100);
    }

    #[test]
    fn boundary_just_below_cap() {
        let results = vec![result(true); 6];
        assert_eq!(risk_score(&results), 90);
    }

    #[test]
    fn deterministic_for_identical_sequences() {
        let results = vec![result(true), result(true), result(false)];
        assert_eq!(risk_score(&results), risk_score(&results));
    }

    #[test]
    fn score_always_within_bounds() {
        for n in 0..30 {
            let results: Vec<SourceResult> = (0..n).map(|i| result(i % 2 == 0)).collect();
            let score = risk_score(&results);
            assert!(score <= 100);
        }
    }
}
