//! # HTTP API
//!
//! axum router serving the rendered dashboard at `/` and the engine's
//! outputs as JSON under `/api/v1`.
//!
//! Every handler is a pure function of its query against the static
//! dataset, so the only shared state is process metadata and the optional
//! rate limiter.

mod error;
mod handlers;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use handlers::*;

use crate::config::ServerConfig;
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub version: &'static str,
    pub started_at: Instant,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl AppState {
    #[must_use]
    pub fn new(rate_limit: Option<NonZeroU32>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            started_at: Instant::now(),
            limiter: rate_limit.map(|n| Arc::new(RateLimiter::direct(Quota::per_second(n)))),
        }
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Build the application router.
pub fn create_router(config: &ServerConfig) -> Router {
    let state = AppState::new(config.rate_limit);

    let api_routes = Router::new()
        .route("/years", get(handlers::list_years))
        .route("/categories", get(handlers::list_categories))
        .route("/categories/{category}", get(handlers::category_detail))
        .route("/categories/{category}/radar", get(handlers::category_radar))
        .route("/dashboard", get(handlers::dashboard_json))
        .route("/matrix", get(handlers::matrix))
        .route("/gaps", get(handlers::gaps))
        .route("/summary", get(handlers::summary))
        .route("/classify", get(handlers::classify));

    let mut router = Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(TraceLayer::new_for_http());

    if config.cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}

/// Reject requests once the global budget for the current second is spent.
async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let exhausted = state
        .limiter
        .as_ref()
        .is_some_and(|limiter| limiter.check().is_err());
    if exhausted {
        tracing::warn!(path = %request.uri().path(), "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }
    next.run(request).await
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let app = create_router(&config);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Maturity Explorer listening on http://{}", addr);
    if let Some(limit) = config.rate_limit {
        tracing::info!("Rate limit: {} requests/second", limit);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Maturity Explorer shut down");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use tower::ServiceExt;

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(
            HttpRequest::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("infallible router")
    }

    #[tokio::test]
    async fn missing_classify_score_returns_json_error() {
        let response = get(create_router(&ServerConfig::default()), "/api/v1/classify").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: ErrorResponse = serde_json::from_slice(&bytes).expect("json error body");
        assert_eq!(body.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = get(create_router(&ServerConfig::default()), "/api/v2/matrix").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn limiter_is_shared_across_clones() {
        let config = ServerConfig {
            rate_limit: NonZeroU32::new(1),
            ..ServerConfig::default()
        };
        let app = create_router(&config);
        assert_eq!(get(app.clone(), "/health").await.status(), StatusCode::OK);
        assert_eq!(
            get(app, "/health").await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
