//! Property tests for the derived-metrics engine.

#![allow(clippy::unwrap_used, clippy::panic)]

use maturity_core::dataset::{MAX_SCORE, MIN_SCORE};
use maturity_core::engine::{self, GovernanceAdjustment, MaturityLabel, SeverityBucket};
use maturity_core::{Category, Dimension, Year};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_year() -> impl Strategy<Value = Year> {
    prop::sample::select(Year::ALL.to_vec())
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_adjustment() -> impl Strategy<Value = GovernanceAdjustment> {
    (0i64..=4).prop_map(|level| GovernanceAdjustment::new(level).unwrap())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Adjusted scores never leave [0, 4].
    #[test]
    fn adjusted_scores_stay_in_range(year in arb_year(), adjustment in arb_adjustment()) {
        let matrix = engine::adjusted_matrix(year, adjustment);
        for (_, row) in matrix.iter() {
            for (_, score) in row.iter() {
                prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
            }
        }
    }

    /// Raising the adjustment never lowers the simulated dimensions.
    #[test]
    fn adjustment_is_monotonic(year in arb_year(), category in arb_category(), level in 0i64..4) {
        let lower = engine::adjusted_matrix(year, GovernanceAdjustment::new(level).unwrap());
        let higher = engine::adjusted_matrix(year, GovernanceAdjustment::new(level + 1).unwrap());
        for dimension in [Dimension::GovernanceEnforcement, Dimension::StakeholderProtections] {
            prop_assert!(higher.score(category, dimension) >= lower.score(category, dimension));
        }
    }

    /// Threat and technical scores ignore the simulation.
    #[test]
    fn untouched_dimensions_pass_through(year in arb_year(), adjustment in arb_adjustment()) {
        let adjusted = engine::adjusted_matrix(year, adjustment);
        let base = year.base_matrix();
        for category in Category::ALL {
            for dimension in [Dimension::ThreatMaturity, Dimension::TechnicalControls] {
                prop_assert_eq!(adjusted.score(category, dimension), base.score(category, dimension));
            }
        }
    }

    /// Bands are contiguous: the label ordinal counts the cut points at or
    /// below the score.
    #[test]
    fn classify_counts_cut_points(score in 0.0f64..=4.0) {
        let label = MaturityLabel::classify(score);
        let expected = [0.5, 1.5, 2.5, 3.5].iter().filter(|cut| **cut <= score).count() as u8;
        prop_assert_eq!(label.ordinal(), expected);
    }

    /// Labels are ordered like the scores that produce them.
    #[test]
    fn classify_is_monotonic(a in 0.0f64..=4.0, b in 0.0f64..=4.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(MaturityLabel::classify(lo) <= MaturityLabel::classify(hi));
    }

    /// Larger gaps are never less severe.
    #[test]
    fn severity_is_monotonic(a in -4.0f64..=4.0, b in -4.0f64..=4.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // Critical sorts first, so severity ordering is reversed.
        prop_assert!(SeverityBucket::from_gap(hi) <= SeverityBucket::from_gap(lo));
    }

    /// Gap analysis does not depend on the adjustment used elsewhere.
    #[test]
    fn gap_uses_base_matrix(year in arb_year(), category in arb_category()) {
        let row = year.base_matrix().row(category);
        let expected = row.threat_maturity
            - (row.technical_controls + row.governance_enforcement + row.stakeholder_protections) / 3.0;
        prop_assert!((engine::protection_gap(category, year) - expected).abs() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Fixed-point checks
// ---------------------------------------------------------------------------

#[test]
fn identity_for_every_year() {
    for year in Year::ALL {
        assert_eq!(
            &engine::adjusted_matrix(year, GovernanceAdjustment::NONE),
            year.base_matrix()
        );
    }
}

#[test]
fn boundary_values_land_in_upper_band() {
    let cases = [
        (0.5, MaturityLabel::Initial),
        (1.5, MaturityLabel::Developing),
        (2.5, MaturityLabel::Defined),
        (3.5, MaturityLabel::Managed),
    ];
    for (score, label) in cases {
        assert_eq!(MaturityLabel::classify(score), label, "score {score}");
    }
}

#[test]
fn unknown_keys_are_typed_errors() {
    assert!(matches!(
        engine::adjusted_matrix_for("2099", 0),
        Err(maturity_core::MaturityError::UnknownYear(_))
    ));
    assert!(matches!(
        engine::protection_gap_for("Deepfakes", "2025"),
        Err(maturity_core::MaturityError::UnknownCategory(_))
    ));
}
