//! # Dataset
//!
//! The fixed assessment dataset: closed enumerations for categories,
//! dimensions and years, and one constant score matrix per year.
//!
//! Scores come from the 2025 baseline figure of the source assessment. The
//! 2026 and 2027 matrices are hand-authored projections, not forecasts.
//!
//! Matrices are `static` and never mutated. Dimension access is by name
//! (see [`DimensionScores::get`]); there is no positional column convention.

use crate::{MaturityError, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lowest possible maturity score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest possible maturity score. Adjusted scores are clamped here.
pub const MAX_SCORE: f64 = 4.0;

/// Normalize a user-supplied key for lookup: lowercase, with spaces and
/// underscores folded into dashes.
fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

// =============================================================================
// CATEGORY
// =============================================================================

/// A threat category (heatmap row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    PromptInjection,
    AutonomyHarms,
    PoliticalIntegrity,
    Privacy,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::PromptInjection,
        Category::AutonomyHarms,
        Category::PoliticalIntegrity,
        Category::Privacy,
    ];

    /// Row position in a [`ScoreMatrix`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Category::PromptInjection => 0,
            Category::AutonomyHarms => 1,
            Category::PoliticalIntegrity => 2,
            Category::Privacy => 3,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::PromptInjection => "Prompt Injection",
            Category::AutonomyHarms => "Autonomy Harms",
            Category::PoliticalIntegrity => "Political Integrity",
            Category::Privacy => "Privacy",
        }
    }

    /// URL-safe identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Category::PromptInjection => "prompt-injection",
            Category::AutonomyHarms => "autonomy-harms",
            Category::PoliticalIntegrity => "political-integrity",
            Category::Privacy => "privacy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = MaturityError;

    /// Accepts either the display name or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_key(s);
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == key)
            .ok_or_else(|| MaturityError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// =============================================================================
// DIMENSION
// =============================================================================

/// An assessment dimension (heatmap column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    ThreatMaturity,
    TechnicalControls,
    GovernanceEnforcement,
    StakeholderProtections,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 4] = [
        Dimension::ThreatMaturity,
        Dimension::TechnicalControls,
        Dimension::GovernanceEnforcement,
        Dimension::StakeholderProtections,
    ];

    /// The three protective dimensions averaged by the gap analysis.
    pub const PROTECTIVE: [Dimension; 3] = [
        Dimension::TechnicalControls,
        Dimension::GovernanceEnforcement,
        Dimension::StakeholderProtections,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Dimension::ThreatMaturity => "Threat Maturity",
            Dimension::TechnicalControls => "Technical Controls",
            Dimension::GovernanceEnforcement => "Governance Enforcement",
            Dimension::StakeholderProtections => "Stakeholder Protections",
        }
    }

    /// URL-safe identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Dimension::ThreatMaturity => "threat-maturity",
            Dimension::TechnicalControls => "technical-controls",
            Dimension::GovernanceEnforcement => "governance-enforcement",
            Dimension::StakeholderProtections => "stakeholder-protections",
        }
    }

    /// Whether this dimension measures protection rather than threat.
    #[must_use]
    pub const fn is_protective(self) -> bool {
        !matches!(self, Dimension::ThreatMaturity)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_key(s);
        Dimension::ALL
            .into_iter()
            .find(|d| d.slug() == key)
            .ok_or_else(|| MaturityError::UnknownDimension(s.to_string()))
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// =============================================================================
// YEAR
// =============================================================================

/// A supported assessment year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Year {
    /// 2025 baseline.
    Y2025,
    /// 2026 projection.
    Y2026,
    /// 2027 projection.
    Y2027,
}

impl Year {
    /// All supported years, oldest first.
    pub const ALL: [Year; 3] = [Year::Y2025, Year::Y2026, Year::Y2027];

    /// The baseline year.
    pub const BASELINE: Year = Year::Y2025;

    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Year::Y2025 => 2025,
            Year::Y2026 => 2026,
            Year::Y2027 => 2027,
        }
    }

    /// Whether this is the measured baseline rather than a projection.
    #[must_use]
    pub const fn is_baseline(self) -> bool {
        matches!(self, Year::Y2025)
    }

    /// Display label: "2025 Baseline" or "2026 Projection".
    #[must_use]
    pub fn label(self) -> String {
        if self.is_baseline() {
            format!("{} Baseline", self.as_u16())
        } else {
            format!("{} Projection", self.as_u16())
        }
    }

    /// The constant score matrix for this year.
    #[must_use]
    pub fn base_matrix(self) -> &'static ScoreMatrix {
        match self {
            Year::Y2025 => &MATRIX_2025,
            Year::Y2026 => &MATRIX_2026,
            Year::Y2027 => &MATRIX_2027,
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl TryFrom<u16> for Year {
    type Error = MaturityError;

    fn try_from(value: u16) -> Result<Self> {
        Year::ALL
            .into_iter()
            .find(|y| y.as_u16() == value)
            .ok_or_else(|| MaturityError::UnknownYear(value.to_string()))
    }
}

impl FromStr for Year {
    type Err = MaturityError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u16>()
            .map_err(|_| MaturityError::UnknownYear(s.to_string()))
            .and_then(Year::try_from)
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

// =============================================================================
// SCORES
// =============================================================================

/// One category's scores, one named field per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionScores {
    pub threat_maturity: f64,
    pub technical_controls: f64,
    pub governance_enforcement: f64,
    pub stakeholder_protections: f64,
}

impl DimensionScores {
    /// Create a row from the four dimension scores.
    #[must_use]
    pub const fn new(
        threat_maturity: f64,
        technical_controls: f64,
        governance_enforcement: f64,
        stakeholder_protections: f64,
    ) -> Self {
        Self {
            threat_maturity,
            technical_controls,
            governance_enforcement,
            stakeholder_protections,
        }
    }

    /// Score for a dimension.
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::ThreatMaturity => self.threat_maturity,
            Dimension::TechnicalControls => self.technical_controls,
            Dimension::GovernanceEnforcement => self.governance_enforcement,
            Dimension::StakeholderProtections => self.stakeholder_protections,
        }
    }

    /// Mutable access to a dimension's score.
    pub fn get_mut(&mut self, dimension: Dimension) -> &mut f64 {
        match dimension {
            Dimension::ThreatMaturity => &mut self.threat_maturity,
            Dimension::TechnicalControls => &mut self.technical_controls,
            Dimension::GovernanceEnforcement => &mut self.governance_enforcement,
            Dimension::StakeholderProtections => &mut self.stakeholder_protections,
        }
    }

    /// `(dimension, score)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Mean of the three protective dimensions.
    #[must_use]
    pub fn protection_mean(&self) -> f64 {
        let sum: f64 = Dimension::PROTECTIVE.iter().map(|d| self.get(*d)).sum();
        sum / Dimension::PROTECTIVE.len() as f64
    }
}

/// Category × dimension score table for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    rows: [DimensionScores; 4],
}

impl ScoreMatrix {
    /// Build a matrix from rows in [`Category::ALL`] order.
    #[must_use]
    pub const fn from_rows(rows: [DimensionScores; 4]) -> Self {
        Self { rows }
    }

    /// Scores for one category.
    #[must_use]
    pub const fn row(&self, category: Category) -> &DimensionScores {
        &self.rows[category.index()]
    }

    /// Mutable scores for one category.
    pub fn row_mut(&mut self, category: Category) -> &mut DimensionScores {
        &mut self.rows[category.index()]
    }

    /// A single cell.
    #[must_use]
    pub const fn score(&self, category: Category, dimension: Dimension) -> f64 {
        self.row(category).get(dimension)
    }

    /// One dimension's scores across all categories, in display order.
    #[must_use]
    pub fn column(&self, dimension: Dimension) -> [f64; 4] {
        Category::ALL.map(|c| self.score(c, dimension))
    }

    /// `(category, row)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &DimensionScores)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.row(c)))
    }
}

impl Serialize for ScoreMatrix {
    /// Serialized as an ordered map keyed by category name.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (category, row) in self.iter() {
            map.serialize_entry(category.name(), row)?;
        }
        map.end()
    }
}

// =============================================================================
// CONSTANT TABLES
// =============================================================================

static MATRIX_2025: ScoreMatrix = ScoreMatrix::from_rows([
    DimensionScores::new(4.0, 2.5, 2.0, 0.5),
    DimensionScores::new(4.0, 2.0, 2.0, 0.5),
    DimensionScores::new(4.0, 1.0, 0.5, 0.5),
    DimensionScores::new(4.0, 2.0, 2.0, 2.0),
]);

static MATRIX_2026: ScoreMatrix = ScoreMatrix::from_rows([
    DimensionScores::new(4.0, 3.0, 2.5, 1.0),
    DimensionScores::new(4.0, 2.5, 2.5, 1.0),
    DimensionScores::new(4.0, 2.0, 1.5, 1.0),
    DimensionScores::new(4.0, 2.5, 2.5, 2.5),
]);

static MATRIX_2027: ScoreMatrix = ScoreMatrix::from_rows([
    DimensionScores::new(4.0, 3.5, 3.0, 2.0),
    DimensionScores::new(4.0, 3.0, 3.0, 1.5),
    DimensionScores::new(4.0, 2.5, 2.5, 1.5),
    DimensionScores::new(4.0, 3.0, 3.0, 3.0),
]);

// =============================================================================
// TESTS
// =============================================================================
