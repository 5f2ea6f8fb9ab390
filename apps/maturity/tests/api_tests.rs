//! HTTP tests for the dashboard and JSON API.
//!
//! Uses axum-test against the real router, no socket required.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use maturity::api::{ClassifyResponse, ErrorResponse, HealthResponse, YearInfo, create_router};
use maturity::config::ServerConfig;
use serde_json::Value;
use std::num::NonZeroU32;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn server() -> TestServer {
    TestServer::new(create_router(&ServerConfig::default())).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// HEALTH AND METADATA
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = server().get("/health").await;
    response.assert_status_ok();
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_years_lists_baseline_first() {
    let years: Vec<YearInfo> = server().get("/api/v1/years").await.json();
    let labels: Vec<&str> = years.iter().map(|y| y.label.as_str()).collect();
    assert_eq!(
        labels,
        ["2025 Baseline", "2026 Projection", "2027 Projection"]
    );
    assert!(years[0].baseline);
}

#[tokio::test]
async fn test_categories_in_display_order() {
    let body: Value = server().get("/api/v1/categories").await.json();
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(
        slugs,
        [
            "prompt-injection",
            "autonomy-harms",
            "political-integrity",
            "privacy"
        ]
    );
}

// =============================================================================
// MATRIX, GAPS, SUMMARY
// =============================================================================

#[tokio::test]
async fn test_matrix_applies_adjustment() {
    let body: Value = server()
        .get("/api/v1/matrix")
        .add_query_param("year", "2025")
        .add_query_param("adjustment", "2")
        .await
        .json();

    assert_eq!(body["year"], 2025);
    let cells = body["rows"][0]["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 4);
    // Prompt Injection: threat and technical untouched, governance +1.0,
    // stakeholder +0.6
    assert!(close(cells[0]["score"].as_f64().unwrap(), 4.0));
    assert!(close(cells[1]["score"].as_f64().unwrap(), 2.5));
    assert!(close(cells[2]["score"].as_f64().unwrap(), 3.0));
    assert!(close(cells[3]["score"].as_f64().unwrap(), 1.1));
    assert_eq!(cells[0]["label"], "Managed/Mature");
}

#[tokio::test]
async fn test_matrix_unknown_year_is_404() {
    let response = server()
        .get("/api/v1/matrix")
        .add_query_param("year", "2099")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "UNKNOWN_KEY");
}

#[tokio::test]
async fn test_matrix_adjustment_out_of_range_is_400() {
    let response = server()
        .get("/api/v1/matrix")
        .add_query_param("adjustment", "9")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_gaps_severity_buckets() {
    let body: Value = server()
        .get("/api/v1/gaps")
        .add_query_param("year", "2025")
        .await
        .json();
    let gaps = body["gaps"].as_array().unwrap();
    let severities: Vec<&str> = gaps
        .iter()
        .map(|g| g["severity"].as_str().unwrap())
        .collect();
    assert_eq!(severities, ["high", "high", "critical", "elevated"]);
    assert!(close(gaps[2]["gap"].as_f64().unwrap(), 4.0 - 2.0 / 3.0));
}

#[tokio::test]
async fn test_summary_uses_adjustment_only_when_supplied() {
    let server = server();

    let base: Value = server.get("/api/v1/summary").await.json();
    assert!(close(base["summary"]["overall_gap"].as_f64().unwrap(), 3.125));
    assert!(base.get("adjustment").is_none());

    let adjusted: Value = server
        .get("/api/v1/summary")
        .add_query_param("adjustment", "4")
        .await
        .json();
    assert_eq!(adjusted["adjustment"], 4);
    assert!(adjusted["summary"]["overall_gap"].as_f64().unwrap() < 3.125);
}

// =============================================================================
// CATEGORY VIEWS
// =============================================================================

#[tokio::test]
async fn test_category_detail_by_name_or_slug() {
    let server = server();
    let by_slug: Value = server.get("/api/v1/categories/privacy").await.json();
    let by_name: Value = server.get("/api/v1/categories/Privacy").await.json();
    assert_eq!(by_slug, by_name);
    assert_eq!(by_slug["dimensions"].as_array().unwrap().len(), 4);
    assert_eq!(by_slug["attribution"], "Cabagnot (2025)");
}

#[tokio::test]
async fn test_unknown_category_is_404() {
    server()
        .get("/api/v1/categories/deepfakes")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_radar_reads_base_matrix() {
    let body: Value = server()
        .get("/api/v1/categories/political-integrity/radar")
        .add_query_param("year", "2027")
        .await
        .json();
    let scores: Vec<f64> = body["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["score"].as_f64().unwrap())
        .collect();
    assert_eq!(scores, [4.0, 2.5, 2.5, 1.5]);
    assert_eq!(body["reference_level"], 2.0);
}

#[tokio::test]
async fn test_classify() {
    let body: ClassifyResponse = server()
        .get("/api/v1/classify")
        .add_query_param("score", "2.5")
        .await
        .json();
    assert_eq!(body.label, "Defined");
    assert_eq!(body.level, 3);

    server()
        .get("/api/v1/classify")
        .add_query_param("score", "7")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_classify_without_score_is_json_400() {
    for path in ["/api/v1/classify", "/api/v1/classify?score="] {
        let response = server().get(path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "BAD_REQUEST");
        assert!(body.error.contains("missing score"));
    }
}

// =============================================================================
// DASHBOARD PAGE
// =============================================================================

#[tokio::test]
async fn test_dashboard_page_renders() {
    let response = server().get("/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Generative AI Security Maturity Explorer"));
    assert!(html.contains("2025 Baseline"));
    assert!(html.contains("Protection Gap Analysis"));
    assert!(html.contains("Key Findings"));
}

#[tokio::test]
async fn test_dashboard_page_opens_detail() {
    let html = server()
        .get("/")
        .add_query_param("year", "2026")
        .add_query_param("detail", "autonomy-harms")
        .add_query_param("theme", "light")
        .await
        .text();
    assert!(html.contains("2026 Projection"));
    assert!(html.contains("Real-World Incidents"));
    assert!(html.contains(r#"<body class="theme-light">"#));
}

#[tokio::test]
async fn test_dashboard_page_rejects_unknown_theme() {
    server()
        .get("/")
        .add_query_param("theme", "sepia")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_json_snapshot() {
    let body: Value = server()
        .get("/api/v1/dashboard")
        .add_query_param("category", "privacy")
        .await
        .json();
    assert_eq!(body["radar"]["category"], "Privacy");
    assert_eq!(body["key_findings"].as_array().unwrap().len(), 4);
    assert!(body.get("detail").is_none());
}

// =============================================================================
// RATE LIMITING
// =============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_excess_requests() {
    let config = ServerConfig {
        rate_limit: NonZeroU32::new(1),
        ..ServerConfig::default()
    };
    let server = TestServer::new(create_router(&config)).unwrap();

    server.get("/health").await.assert_status_ok();
    let response = server.get("/health").await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "RATE_LIMITED");
}
