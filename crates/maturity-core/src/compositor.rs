//! # Compositor Module
//!
//! Output assembly for the presentation layer.
//!
//! The compositor turns engine results into plain value structures: one per
//! dashboard panel, plus a [`DashboardSnapshot`] carrying all of them for a
//! single render. It does no formatting beyond what every consumer needs
//! (labels, color tokens, evidence excerpts); markup is left to the caller.

use crate::dataset::{Category, Dimension, Year};
use crate::engine::{
    self, BadgeTone, GapEntry, GovernanceAdjustment, MaturityLabel, SummaryStatistics,
};
use crate::evidence::{self, KEY_FINDINGS, KeyFinding, SOURCE_ATTRIBUTION};
use serde::Serialize;

/// Evidence bullets shown per heatmap hover.
pub const HOVER_EVIDENCE_LIMIT: usize = 2;

/// References shown per heatmap hover.
pub const HOVER_REFERENCE_LIMIT: usize = 2;

/// Radar reference ring (the "Developing" level).
pub const RADAR_REFERENCE_LEVEL: f64 = 2.0;

// =============================================================================
// REQUEST
// =============================================================================

/// Parameters of one dashboard render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardRequest {
    pub year: Year,
    pub adjustment: GovernanceAdjustment,
    /// Category shown in the radar panel.
    pub radar_category: Category,
    /// Category whose detail view is open, if any.
    pub detail: Option<Category>,
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self {
            year: Year::BASELINE,
            adjustment: GovernanceAdjustment::NONE,
            radar_category: Category::PromptInjection,
            detail: None,
        }
    }
}

// =============================================================================
// PANEL VIEWS
// =============================================================================

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub dimension: Dimension,
    pub score: f64,
    pub label: MaturityLabel,
    /// Fill color from the continuous colorscale.
    pub color: String,
    pub evidence: &'static [&'static str],
    pub references: &'static [&'static str],
}

/// One heatmap row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub category: Category,
    pub cells: Vec<HeatmapCell>,
}

/// The adjusted matrix, labelled and annotated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapView {
    pub year: Year,
    pub year_label: String,
    pub adjustment: GovernanceAdjustment,
    pub dimensions: [Dimension; 4],
    pub rows: Vec<HeatmapRow>,
}

impl HeatmapView {
    /// Cell lookup by key.
    #[must_use]
    pub fn cell(&self, category: Category, dimension: Dimension) -> Option<&HeatmapCell> {
        self.rows
            .iter()
            .find(|r| r.category == category)?
            .cells
            .iter()
            .find(|c| c.dimension == dimension)
    }
}

/// One spoke of the radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarPoint {
    pub dimension: Dimension,
    pub score: f64,
}

/// A category's profile across the four dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarProfile {
    pub category: Category,
    pub year: Year,
    pub points: Vec<RadarPoint>,
    pub reference_level: f64,
}

/// One dimension card of the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionCard {
    pub dimension: Dimension,
    pub level: f64,
    pub tone: BadgeTone,
    pub description: &'static str,
    pub evidence: &'static [&'static str],
    pub references: &'static [&'static str],
}

/// Detail view for a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub category: Category,
    pub description: &'static str,
    pub thesis_quote: &'static str,
    pub attribution: &'static str,
    pub dimensions: Vec<DimensionCard>,
    pub incidents: &'static [&'static str],
}

/// Everything one render needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub heatmap: HeatmapView,
    pub gaps: Vec<GapEntry>,
    pub summary: SummaryStatistics,
    pub radar: RadarProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailView>,
    pub key_findings: &'static [KeyFinding],
}

// =============================================================================
// COMPOSITOR
// =============================================================================

/// Assembles panel views from the engine.
pub struct Compositor;

impl Compositor {
    /// Compose the full dashboard.
    ///
    /// The heatmap reflects the adjustment. Gap analysis, summary statistics
    /// and the radar read the base matrix of the selected year.
    #[must_use]
    pub fn snapshot(request: &DashboardRequest) -> DashboardSnapshot {
        DashboardSnapshot {
            heatmap: Self::heatmap(request.year, request.adjustment),
            gaps: engine::gap_analysis(request.year),
            summary: engine::summary_statistics(request.year, None),
            radar: Self::radar(request.radar_category, request.year),
            detail: request.detail.map(Self::detail),
            key_findings: &KEY_FINDINGS,
        }
    }

    /// Heatmap for `year` with the simulation applied.
    #[must_use]
    pub fn heatmap(year: Year, adjustment: GovernanceAdjustment) -> HeatmapView {
        let matrix = engine::adjusted_matrix(year, adjustment);
        let rows = matrix
            .iter()
            .map(|(category, scores)| HeatmapRow {
                category,
                cells: scores
                    .iter()
                    .map(|(dimension, score)| {
                        let record = evidence::cell_evidence(category, dimension);
                        HeatmapCell {
                            dimension,
                            score,
                            label: MaturityLabel::classify(score),
                            color: engine::heat_color(score),
                            evidence: record.leading_evidence(HOVER_EVIDENCE_LIMIT),
                            references: record.leading_references(HOVER_REFERENCE_LIMIT),
                        }
                    })
                    .collect(),
            })
            .collect();

        HeatmapView {
            year,
            year_label: year.label(),
            adjustment,
            dimensions: Dimension::ALL,
            rows,
        }
    }

    /// Radar profile of one category (base matrix).
    #[must_use]
    pub fn radar(category: Category, year: Year) -> RadarProfile {
        let row = year.base_matrix().row(category);
        RadarProfile {
            category,
            year,
            points: row
                .iter()
                .map(|(dimension, score)| RadarPoint { dimension, score })
                .collect(),
            reference_level: RADAR_REFERENCE_LEVEL,
        }
    }

    /// Detail view of one category.
    #[must_use]
    pub fn detail(category: Category) -> DetailView {
        let dossier = evidence::dossier(category);
        DetailView {
            category,
            description: dossier.description,
            thesis_quote: dossier.thesis_quote,
            attribution: SOURCE_ATTRIBUTION,
            dimensions: dossier
                .records()
                .map(|(dimension, record)| DimensionCard {
                    dimension,
                    level: record.level,
                    tone: BadgeTone::for_level(record.level),
                    description: record.description,
                    evidence: record.evidence,
                    references: record.references,
                })
                .collect(),
            incidents: dossier.incidents,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
