//! # Advisory API
//!
//! `POST /v1/sessions/{id}/advice` asks the completion service how the
//! session's dataset should be classified. The answer is free text for a
//! human reader; it is never stored and never changes the session.
//!
//! Without a configured advisor this endpoint answers 503.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use dmo_advisor::Advice;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AdviceRequest {
    /// Defaults to a generic classification question.
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub session_id: Uuid,
    pub advice: Advice,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/sessions/{id}/advice", post(request_advice))
}

/// POST /v1/sessions/{id}/advice
async fn request_advice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<AdviceRequest>, JsonRejection>,
) -> Result<Json<AdviceResponse>, AppError> {
    let advisor = state.advisor.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("advisory service is not configured".to_string())
    })?;
    let req = extract_json(body)?;

    // Snapshot before awaiting; no lock is held across the call.
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::session_not_found(id))?;
    let descriptor = session
        .dataset()
        .map(|profile| profile.descriptor_text())
        .transpose()?;

    let advice = advisor
        .consult(req.question.as_deref(), descriptor.as_deref())
        .await?;
    tracing::info!(session = %id, model = advisor.model(), "advisory consulted");

    Ok(Json(AdviceResponse {
        session_id: id,
        advice,
    }))
}
