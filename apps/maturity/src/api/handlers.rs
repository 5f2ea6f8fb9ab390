//! Route handlers.
//!
//! Query parameters arrive as raw strings and are parsed through the core
//! enums, so an unsupported year or category becomes a typed 404 rather than
//! a silently defaulted value. Omitted parameters take the dashboard defaults.

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::render::{self, Theme};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use maturity_core::compositor::{
    Compositor, DashboardRequest, DashboardSnapshot, DetailView, HeatmapView, RadarProfile,
};
use maturity_core::engine::{self, GapEntry, GovernanceAdjustment, MaturityLabel};
use maturity_core::{Category, SummaryStatistics, Year};
use serde::{Deserialize, Serialize};

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Query accepted by the dashboard endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<String>,
    pub adjustment: Option<String>,
    /// Radar category.
    pub category: Option<String>,
    /// Category whose detail view is open.
    pub detail: Option<String>,
    pub theme: Option<String>,
}

impl DashboardQuery {
    /// Resolve into a typed request, rejecting unknown keys.
    pub fn to_request(&self) -> ApiResult<DashboardRequest> {
        let defaults = DashboardRequest::default();
        Ok(DashboardRequest {
            year: parse_year(self.year.as_deref())?,
            adjustment: parse_adjustment(self.adjustment.as_deref())?
                .unwrap_or(defaults.adjustment),
            radar_category: match non_empty(self.category.as_deref()) {
                Some(raw) => raw.parse()?,
                None => defaults.radar_category,
            },
            detail: non_empty(self.detail.as_deref())
                .map(str::parse::<Category>)
                .transpose()?,
        })
    }

    pub fn theme(&self) -> ApiResult<Theme> {
        match non_empty(self.theme.as_deref()) {
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
            None => Ok(Theme::default()),
        }
    }
}

/// Query for year-only endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

/// Query for the classify endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ClassifyQuery {
    pub score: Option<String>,
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_year(raw: Option<&str>) -> ApiResult<Year> {
    match non_empty(raw) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(Year::BASELINE),
    }
}

fn parse_adjustment(raw: Option<&str>) -> ApiResult<Option<GovernanceAdjustment>> {
    non_empty(raw)
        .map(|raw| raw.parse::<GovernanceAdjustment>().map_err(ApiError::from))
        .transpose()
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// One supported year.
#[derive(Debug, Serialize, Deserialize)]
pub struct YearInfo {
    pub year: u16,
    pub label: String,
    pub baseline: bool,
}

/// One threat category.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub slug: String,
}

/// Gap analysis response.
#[derive(Debug, Serialize)]
pub struct GapsResponse {
    pub year: Year,
    pub gaps: Vec<GapEntry>,
}

/// Summary statistics response.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub year: Year,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<GovernanceAdjustment>,
    pub summary: SummaryStatistics,
}

/// Classification response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub score: f64,
    pub label: String,
    pub level: u8,
    pub color: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /` - rendered dashboard.
pub async fn dashboard_page(Query(query): Query<DashboardQuery>) -> ApiResult<Html<String>> {
    let request = query.to_request()?;
    let theme = query.theme()?;
    tracing::debug!(
        year = %request.year,
        adjustment = %request.adjustment,
        radar = %request.radar_category,
        "rendering dashboard"
    );
    let snapshot = Compositor::snapshot(&request);
    Ok(Html(render::render_dashboard(&snapshot, &request, theme)))
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// `GET /api/v1/years`
pub async fn list_years() -> Json<Vec<YearInfo>> {
    Json(
        Year::ALL
            .into_iter()
            .map(|y| YearInfo {
                year: y.as_u16(),
                label: y.label(),
                baseline: y.is_baseline(),
            })
            .collect(),
    )
}

/// `GET /api/v1/categories`
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|c| CategoryInfo {
                name: c.name().to_string(),
                slug: c.slug().to_string(),
            })
            .collect(),
    )
}

/// `GET /api/v1/dashboard`
pub async fn dashboard_json(
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSnapshot>> {
    let request = query.to_request()?;
    Ok(Json(Compositor::snapshot(&request)))
}

/// `GET /api/v1/matrix`
pub async fn matrix(Query(query): Query<DashboardQuery>) -> ApiResult<Json<HeatmapView>> {
    let request = query.to_request()?;
    Ok(Json(Compositor::heatmap(request.year, request.adjustment)))
}

/// `GET /api/v1/gaps`
pub async fn gaps(Query(query): Query<YearQuery>) -> ApiResult<Json<GapsResponse>> {
    let year = parse_year(query.year.as_deref())?;
    Ok(Json(GapsResponse {
        year,
        gaps: engine::gap_analysis(year),
    }))
}

/// `GET /api/v1/summary`
///
/// Uses the adjusted matrix only when `adjustment` is supplied.
pub async fn summary(Query(query): Query<DashboardQuery>) -> ApiResult<Json<SummaryResponse>> {
    let year = parse_year(query.year.as_deref())?;
    let adjustment = parse_adjustment(query.adjustment.as_deref())?;
    Ok(Json(SummaryResponse {
        year,
        adjustment,
        summary: engine::summary_statistics(year, adjustment),
    }))
}

/// `GET /api/v1/categories/{category}`
pub async fn category_detail(Path(category): Path<String>) -> ApiResult<Json<DetailView>> {
    let category: Category = category.parse()?;
    Ok(Json(Compositor::detail(category)))
}

/// `GET /api/v1/categories/{category}/radar`
pub async fn category_radar(
    Path(category): Path<String>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<RadarProfile>> {
    let category: Category = category.parse()?;
    let year = parse_year(query.year.as_deref())?;
    Ok(Json(Compositor::radar(category, year)))
}

/// `GET /api/v1/classify?score=`
pub async fn classify(Query(query): Query<ClassifyQuery>) -> ApiResult<Json<ClassifyResponse>> {
    let raw = non_empty(query.score.as_deref())
        .ok_or_else(|| ApiError::BadRequest("missing score".to_string()))?;
    let score = parse_score(raw)?;
    let label = MaturityLabel::classify(score);
    Ok(Json(ClassifyResponse {
        score,
        label: label.name().to_string(),
        level: label.ordinal(),
        color: engine::heat_color(score),
    }))
}

/// Parse a maturity score, accepting only finite values in `[0, 4]`.
pub fn parse_score(raw: &str) -> ApiResult<f64> {
    let score: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("score is not a number: {raw}")))?;
    if !(0.0..=4.0).contains(&score) {
        return Err(ApiError::BadRequest(format!(
            "score {score} out of range 0..=4"
        )));
    }
    Ok(score)
}
