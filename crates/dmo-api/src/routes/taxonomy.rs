//! # Taxonomy API
//!
//! Read-only views of the compiled-in taxonomy.
//!
//! ## Endpoints
//!
//! - `GET /v1/taxonomy`                 — categories, subcategories, questions
//! - `GET /v1/levels`                   — every level with description and controls
//! - `GET /v1/levels/{level}/controls`  — required controls for one level
//! - `GET /v1/datasets`                 — canned example datasets

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use dmo_classify::ExampleDataset;
use dmo_core::{ClassificationLevel, ImpactCategory, LevelProfile, TaxonomyRegistry};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: &'static [ImpactCategory],
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct LevelResponse {
    pub level: ClassificationLevel,
    pub label: &'static str,
    pub rank: u8,
    pub description: &'static str,
    pub controls: &'static [&'static str],
}

impl From<&LevelProfile> for LevelResponse {
    fn from(profile: &LevelProfile) -> Self {
        Self {
            level: profile.level,
            label: profile.level.label(),
            rank: profile.level.rank(),
            description: profile.description,
            controls: profile.controls,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ControlsResponse {
    pub level: ClassificationLevel,
    pub controls: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/taxonomy", get(get_taxonomy))
        .route("/v1/levels", get(list_levels))
        .route("/v1/levels/{level}/controls", get(get_controls))
        .route("/v1/datasets", get(list_datasets))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/taxonomy
async fn get_taxonomy() -> Json<TaxonomyResponse> {
    let registry = TaxonomyRegistry::standard();
    Json(TaxonomyResponse {
        categories: registry.categories(),
        total_questions: registry.total_questions(),
    })
}

/// GET /v1/levels, most severe first.
async fn list_levels() -> Json<Vec<LevelResponse>> {
    Json(
        TaxonomyRegistry::standard()
            .level_profiles()
            .map(LevelResponse::from)
            .collect(),
    )
}

/// GET /v1/levels/{level}/controls
///
/// Accepts wire names (`top_secret`) or labels (`TOP SECRET`).
async fn get_controls(Path(level): Path<String>) -> Result<Json<ControlsResponse>, AppError> {
    let level: ClassificationLevel = level
        .parse()
        .map_err(|e: dmo_core::DmoError| AppError::NotFound(e.to_string()))?;
    Ok(Json(ControlsResponse {
        level,
        controls: TaxonomyRegistry::standard().required_controls(level),
    }))
}

/// GET /v1/datasets
async fn list_datasets() -> Json<&'static [ExampleDataset]> {
    Json(ExampleDataset::all())
}
