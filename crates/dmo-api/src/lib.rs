//! # dmo-api — Axum API Service
//!
//! HTTP surface for the DMO classification stack. Assembles the taxonomy,
//! suggestion, session and advisory routers into one application.
//!
//! ## Routes
//!
//! - `/v1/taxonomy`, `/v1/levels/*`, `/v1/datasets` — read-only catalog
//! - `/v1/suggest` — stateless dataset suggestion
//! - `/v1/sessions/*` — assessment workflow, answers and reports
//! - `/v1/sessions/{id}/advice` — advisory completion (503 when unconfigured)
//! - `/health/*` — liveness and readiness probes
//!
//! ## Crate Policy
//!
//! - Sits at the top of the dependency DAG.
//! - No business logic in route handlers; they delegate to dmo-state and
//!   dmo-classify.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::taxonomy::router())
        .merge(routes::suggest::router())
        .merge(routes::sessions::router())
        .merge(routes::advice::router())
        // Largest legitimate body is a custom dataset profile.
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api).with_state(state)
}

/// Liveness probe: the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: the loaded suggestion rules are usable.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.rules.validate() {
        tracing::error!(error = %e, "suggestion rules degraded");
        return (StatusCode::SERVICE_UNAVAILABLE, "suggestion rules degraded").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
