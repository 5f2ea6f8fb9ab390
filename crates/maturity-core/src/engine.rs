//! # Derived-Metrics Engine
//!
//! Pure functions over the constant dataset. Given a year and a governance
//! adjustment, they produce every number the dashboard shows.
//!
//! Two rules hold across the module:
//! - every adjusted score stays within `[0, 4]` (the ceiling is a clamp, not
//!   an error);
//! - gap analysis reads the *base* matrix, independent of any adjustment.
//!
//! The second rule keeps the gap chart fixed while the what-if slider moves.
//! It may be an oversight in the product behavior; the two computations are
//! kept separate until that is settled.

use crate::dataset::{Category, Dimension, MAX_SCORE, MIN_SCORE, ScoreMatrix, Year};
use crate::{MaturityError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// GOVERNANCE ADJUSTMENT
// =============================================================================

/// Score added to Governance Enforcement per adjustment step.
pub const GOVERNANCE_STEP: f64 = 0.5;

/// Score added to Stakeholder Protections per adjustment step.
pub const STAKEHOLDER_STEP: f64 = 0.3;

/// What-if governance improvement level, `0..=4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GovernanceAdjustment(u8);

impl GovernanceAdjustment {
    /// No simulated improvement.
    pub const NONE: GovernanceAdjustment = GovernanceAdjustment(0);

    /// Largest supported level.
    pub const MAX: GovernanceAdjustment = GovernanceAdjustment(4);

    /// Validate a raw level.
    pub fn new(level: i64) -> Result<Self> {
        if (0..=i64::from(Self::MAX.0)).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(MaturityError::AdjustmentOutOfRange(level))
        }
    }

    /// Every supported level, ascending.
    pub fn all() -> impl Iterator<Item = GovernanceAdjustment> {
        (0..=Self::MAX.0).map(GovernanceAdjustment)
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Increment applied to a dimension at this level. Zero for dimensions
    /// the simulation does not touch.
    #[must_use]
    pub fn increment(self, dimension: Dimension) -> f64 {
        let step = match dimension {
            Dimension::GovernanceEnforcement => GOVERNANCE_STEP,
            Dimension::StakeholderProtections => STAKEHOLDER_STEP,
            Dimension::ThreatMaturity | Dimension::TechnicalControls => return 0.0,
        };
        f64::from(self.0) * step
    }
}

impl fmt::Display for GovernanceAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for GovernanceAdjustment {
    type Error = MaturityError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for GovernanceAdjustment {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self> {
        let level = s
            .trim()
            .parse::<i64>()
            .map_err(|_| MaturityError::InvalidAdjustment(s.to_string()))?;
        Self::new(level)
    }
}

// =============================================================================
// MATRIX OPERATIONS
// =============================================================================

/// The score matrix for `year` with the governance simulation applied.
///
/// Governance Enforcement gains `adjustment × 0.5`, Stakeholder Protections
/// gains `adjustment × 0.3`, other dimensions pass through. Results are
/// clamped to [`MAX_SCORE`]. An adjustment of zero returns the base matrix
/// unchanged.
#[must_use]
pub fn adjusted_matrix(year: Year, adjustment: GovernanceAdjustment) -> ScoreMatrix {
    let mut matrix = year.base_matrix().clone();
    if adjustment.is_none() {
        return matrix;
    }
    for category in Category::ALL {
        let row = matrix.row_mut(category);
        for dimension in [
            Dimension::GovernanceEnforcement,
            Dimension::StakeholderProtections,
        ] {
            let cell = row.get_mut(dimension);
            *cell = (*cell + adjustment.increment(dimension)).min(MAX_SCORE);
        }
    }
    matrix
}

/// [`adjusted_matrix`] keyed by raw year and level, as supplied by a caller
/// outside the typed API.
pub fn adjusted_matrix_for(year: &str, adjustment: i64) -> Result<ScoreMatrix> {
    Ok(adjusted_matrix(
        year.parse()?,
        GovernanceAdjustment::new(adjustment)?,
    ))
}

/// Threat score minus the mean of the protective dimensions, on the base
/// matrix of `year`.
#[must_use]
pub fn protection_gap(category: Category, year: Year) -> f64 {
    let row = year.base_matrix().row(category);
    row.threat_maturity - row.protection_mean()
}

/// [`protection_gap`] keyed by raw category and year.
pub fn protection_gap_for(category: &str, year: &str) -> Result<f64> {
    Ok(protection_gap(category.parse()?, year.parse()?))
}

/// One bar of the gap chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapEntry {
    pub category: Category,
    pub threat_level: f64,
    pub average_protection: f64,
    pub gap: f64,
    pub severity: SeverityBucket,
}

/// Gap analysis for every category, in display order.
#[must_use]
pub fn gap_analysis(year: Year) -> Vec<GapEntry> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let row = year.base_matrix().row(category);
            let gap = protection_gap(category, year);
            GapEntry {
                category,
                threat_level: row.threat_maturity,
                average_protection: row.protection_mean(),
                gap,
                severity: SeverityBucket::from_gap(gap),
            }
        })
        .collect()
}

/// Column means across categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub avg_threat: f64,
    pub avg_technical: f64,
    pub avg_governance: f64,
    pub avg_stakeholder: f64,
    /// `avg_threat - avg_stakeholder`.
    pub overall_gap: f64,
}

/// Summary statistics for `year`, over the adjusted matrix when an
/// adjustment is supplied and the base matrix otherwise.
#[must_use]
pub fn summary_statistics(year: Year, adjustment: Option<GovernanceAdjustment>) -> SummaryStatistics {
    let matrix = adjusted_matrix(year, adjustment.unwrap_or_default());
    let mean = |dimension: Dimension| {
        let column = matrix.column(dimension);
        column.iter().sum::<f64>() / column.len() as f64
    };
    let avg_threat = mean(Dimension::ThreatMaturity);
    let avg_stakeholder = mean(Dimension::StakeholderProtections);
    SummaryStatistics {
        avg_threat,
        avg_technical: mean(Dimension::TechnicalControls),
        avg_governance: mean(Dimension::GovernanceEnforcement),
        avg_stakeholder,
        overall_gap: avg_threat - avg_stakeholder,
    }
}

// =============================================================================
// CLASSIFIERS
// =============================================================================

/// Maturity band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaturityLabel {
    /// `[0, 0.5)`
    NonExistent,
    /// `[0.5, 1.5)`
    Initial,
    /// `[1.5, 2.5)`
    Developing,
    /// `[2.5, 3.5)`
    Defined,
    /// `[3.5, 4.0]`
    Managed,
}

impl MaturityLabel {
    /// All bands, lowest first.
    pub const ALL: [MaturityLabel; 5] = [
        MaturityLabel::NonExistent,
        MaturityLabel::Initial,
        MaturityLabel::Developing,
        MaturityLabel::Defined,
        MaturityLabel::Managed,
    ];

    /// Band lookup. Each band includes its lower bound; the top band also
    /// includes 4.0. Scores below 0 fall into the lowest band and scores
    /// above 4 into the highest.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score < 0.5 {
            MaturityLabel::NonExistent
        } else if score < 1.5 {
            MaturityLabel::Initial
        } else if score < 2.5 {
            MaturityLabel::Developing
        } else if score < 3.5 {
            MaturityLabel::Defined
        } else {
            MaturityLabel::Managed
        }
    }

    /// Integer level of the band (0-4).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            MaturityLabel::NonExistent => 0,
            MaturityLabel::Initial => 1,
            MaturityLabel::Developing => 2,
            MaturityLabel::Defined => 3,
            MaturityLabel::Managed => 4,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MaturityLabel::NonExistent => "Non-existent",
            MaturityLabel::Initial => "Initial/Ad-hoc",
            MaturityLabel::Developing => "Developing",
            MaturityLabel::Defined => "Defined",
            MaturityLabel::Managed => "Managed/Mature",
        }
    }

    /// Compact name used on scale ticks.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            MaturityLabel::NonExistent => "Non-existent",
            MaturityLabel::Initial => "Initial",
            MaturityLabel::Developing => "Developing",
            MaturityLabel::Defined => "Defined",
            MaturityLabel::Managed => "Mature",
        }
    }
}

impl fmt::Display for MaturityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MaturityLabel {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Shorthand for [`MaturityLabel::classify`].
#[must_use]
pub fn classify(score: f64) -> MaturityLabel {
    MaturityLabel::classify(score)
}

/// Severity of a protection gap, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBucket {
    /// gap > 2.5
    Critical,
    /// 2.0 < gap <= 2.5
    High,
    /// 1.5 < gap <= 2.0
    Elevated,
    /// gap <= 1.5
    Moderate,
}

impl SeverityBucket {
    /// Thresholds are exclusive lower bounds, checked from the top.
    #[must_use]
    pub fn from_gap(gap: f64) -> Self {
        if gap > 2.5 {
            SeverityBucket::Critical
        } else if gap > 2.0 {
            SeverityBucket::High
        } else if gap > 1.5 {
            SeverityBucket::Elevated
        } else {
            SeverityBucket::Moderate
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SeverityBucket::Critical => "critical",
            SeverityBucket::High => "high",
            SeverityBucket::Elevated => "elevated",
            SeverityBucket::Moderate => "moderate",
        }
    }

    /// Color token used for the gap bar.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            SeverityBucket::Critical => "#d73027",
            SeverityBucket::High => "#fc8d59",
            SeverityBucket::Elevated => "#fee08b",
            SeverityBucket::Moderate => "#d9ef8b",
        }
    }
}

/// Shorthand for [`SeverityBucket::from_gap`].
#[must_use]
pub fn severity_color(gap: f64) -> SeverityBucket {
    SeverityBucket::from_gap(gap)
}

/// Badge tone for a level on the detail cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Danger,
    Warning,
    Info,
    Success,
}

impl BadgeTone {
    #[must_use]
    pub fn for_level(level: f64) -> Self {
        if level < 1.0 {
            BadgeTone::Danger
        } else if level < 2.0 {
            BadgeTone::Warning
        } else if level < 3.0 {
            BadgeTone::Info
        } else {
            BadgeTone::Success
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BadgeTone::Danger => "danger",
            BadgeTone::Warning => "warning",
            BadgeTone::Info => "info",
            BadgeTone::Success => "success",
        }
    }
}

// =============================================================================
// HEATMAP COLORSCALE
// =============================================================================

/// Red-to-green stops at scores 0, 1, 2, 3, 4.
pub const COLORSCALE: [[u8; 3]; 5] = [
    [0xd7, 0x30, 0x27],
    [0xfc, 0x8d, 0x59],
    [0xfe, 0xe0, 0x8b],
    [0xd9, 0xef, 0x8b],
    [0x1a, 0x98, 0x50],
];

/// Heatmap fill for a score as `#rrggbb`, linearly interpolated between
/// the [`COLORSCALE`] stops.
#[must_use]
pub fn heat_color(score: f64) -> String {
    let clamped = if score.is_nan() {
        MIN_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    };
    let lower = (clamped.floor() as usize).min(COLORSCALE.len() - 2);
    let t = clamped - lower as f64;
    let (a, b) = (COLORSCALE[lower], COLORSCALE[lower + 1]);
    let channel = |i: usize| {
        let v = f64::from(a[i]) + (f64::from(b[i]) - f64::from(a[i])) * t;
        v.round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn zero_adjustment_is_identity() {
        for year in Year::ALL {
            assert_eq!(
                &adjusted_matrix(year, GovernanceAdjustment::NONE),
                year.base_matrix()
            );
        }
    }

    #[test]
    fn adjustment_moves_only_governance_and_stakeholder() {
        let adj = GovernanceAdjustment::new(2).expect("valid level");
        let m = adjusted_matrix(Year::Y2025, adj);
        let row = m.row(Category::PoliticalIntegrity);
        assert_eq!(row.threat_maturity, 4.0);
        assert_eq!(row.technical_controls, 1.0);
        assert!((row.governance_enforcement - 1.5).abs() < EPS);
        assert!((row.stakeholder_protections - 1.1).abs() < EPS);
    }

    #[test]
    fn adjustment_clamps_at_ceiling() {
        let m = adjusted_matrix(Year::Y2027, GovernanceAdjustment::MAX);
        for (_, row) in m.iter() {
            assert!(row.governance_enforcement <= MAX_SCORE);
            assert!(row.stakeholder_protections <= MAX_SCORE);
        }
        assert_eq!(
            m.score(Category::Privacy, Dimension::GovernanceEnforcement),
            4.0
        );
    }

    #[test]
    fn unknown_year_fails_explicitly() {
        assert_eq!(
            adjusted_matrix_for("2099", 0),
            Err(MaturityError::UnknownYear("2099".to_string()))
        );
    }

    #[test]
    fn adjustment_range_is_enforced() {
        assert!(GovernanceAdjustment::new(-1).is_err());
        assert!(GovernanceAdjustment::new(5).is_err());
        assert_eq!(
            adjusted_matrix_for("2025", 7),
            Err(MaturityError::AdjustmentOutOfRange(7))
        );
        assert_eq!(GovernanceAdjustment::all().count(), 5);
        assert_eq!(
            "two".parse::<GovernanceAdjustment>(),
            Err(MaturityError::InvalidAdjustment("two".to_string()))
        );
        assert_eq!("3".parse::<GovernanceAdjustment>().map(|a| a.level()), Ok(3));
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify(0.0), MaturityLabel::NonExistent);
        assert_eq!(classify(0.49), MaturityLabel::NonExistent);
        assert_eq!(classify(0.5), MaturityLabel::Initial);
        assert_eq!(classify(1.5), MaturityLabel::Developing);
        assert_eq!(classify(2.5), MaturityLabel::Defined);
        assert_eq!(classify(3.49), MaturityLabel::Defined);
        assert_eq!(classify(3.5), MaturityLabel::Managed);
        assert_eq!(classify(4.0), MaturityLabel::Managed);
        assert_eq!(MaturityLabel::Initial.name(), "Initial/Ad-hoc");
    }

    #[test]
    fn political_integrity_gap() {
        let gap = protection_gap(Category::PoliticalIntegrity, Year::Y2025);
        assert!((gap - (4.0 - 2.0 / 3.0)).abs() < EPS);
        assert!((gap - 3.333).abs() < 1e-3);
    }

    #[test]
    fn gap_ignores_adjustment() {
        let entries = gap_analysis(Year::Y2025);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].category, Category::PoliticalIntegrity);
        assert_eq!(entries[2].severity, SeverityBucket::Critical);
        assert!((entries[3].gap - 2.0).abs() < EPS);
        assert_eq!(entries[3].severity, SeverityBucket::Elevated);
    }

    #[test]
    fn keyed_gap_lookup() {
        assert!(protection_gap_for("privacy", "2026").is_ok());
        assert_eq!(
            protection_gap_for("Misinformation", "2025"),
            Err(MaturityError::UnknownCategory("Misinformation".to_string()))
        );
    }

    #[test]
    fn baseline_summary() {
        let s = summary_statistics(Year::Y2025, None);
        assert_eq!(s.avg_threat, 4.0);
        assert!((s.avg_stakeholder - 0.875).abs() < EPS);
        assert!((s.overall_gap - 3.125).abs() < EPS);
        assert!((s.avg_technical - 1.875).abs() < EPS);
        assert!((s.avg_governance - 1.625).abs() < EPS);
    }

    #[test]
    fn adjusted_summary_uses_adjusted_matrix() {
        let adj = GovernanceAdjustment::new(1).expect("valid level");
        let s = summary_statistics(Year::Y2025, Some(adj));
        assert!((s.avg_governance - 2.125).abs() < EPS);
        assert!((s.avg_stakeholder - 1.175).abs() < EPS);
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(severity_color(3.333), SeverityBucket::Critical);
        assert_eq!(severity_color(2.5), SeverityBucket::High);
        assert_eq!(severity_color(2.0), SeverityBucket::Elevated);
        assert_eq!(severity_color(1.6), SeverityBucket::Elevated);
        assert_eq!(severity_color(1.5), SeverityBucket::Moderate);
        assert_eq!(severity_color(1.0), SeverityBucket::Moderate);
        assert_eq!(SeverityBucket::Critical.color(), "#d73027");
    }

    #[test]
    fn badge_tones() {
        assert_eq!(BadgeTone::for_level(0.5), BadgeTone::Danger);
        assert_eq!(BadgeTone::for_level(1.0), BadgeTone::Warning);
        assert_eq!(BadgeTone::for_level(2.5), BadgeTone::Info);
        assert_eq!(BadgeTone::for_level(3.0), BadgeTone::Success);
    }

    #[test]
    fn heat_color_hits_stops() {
        assert_eq!(heat_color(0.0), "#d73027");
        assert_eq!(heat_color(2.0), "#fee08b");
        assert_eq!(heat_color(4.0), "#1a9850");
        assert_eq!(heat_color(9.0), "#1a9850");
        assert_eq!(heat_color(-1.0), "#d73027");
    }
}
