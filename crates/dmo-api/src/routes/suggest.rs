//! # Suggestion API
//!
//! `POST /v1/suggest` runs the suggestion engine over a dataset profile
//! without touching any session.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use dmo_classify::{DatasetProfile, Suggestion};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/suggest", post(suggest))
}

/// POST /v1/suggest
async fn suggest(
    State(state): State<AppState>,
    body: Result<Json<DatasetProfile>, JsonRejection>,
) -> Result<Json<Suggestion>, AppError> {
    let profile = extract_json(body)?;
    profile.validate()?;
    let text = profile.descriptor_text()?;
    Ok(Json(state.rules.suggest(&text)))
}
