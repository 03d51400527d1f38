//! # Assessment Session API
//!
//! Each session is an independent [`AssessmentSession`]. Handlers only
//! parse, delegate to the session's workflow operation and render a view;
//! phase rules live in dmo-state.
//!
//! ## Endpoints
//!
//! - `POST   /v1/sessions`                 — create (201)
//! - `GET    /v1/sessions/{id}`            — current view
//! - `DELETE /v1/sessions/{id}`            — discard (204)
//! - `PUT    /v1/sessions/{id}/dataset`    — select or replace dataset profile
//! - `POST   /v1/sessions/{id}/begin`      — SELECTING → ASSESSING
//! - `PUT    /v1/sessions/{id}/responses`  — record one answer
//! - `POST   /v1/sessions/{id}/review`     — ASSESSING → REVIEWING
//! - `POST   /v1/sessions/{id}/modify`     — REVIEWING → ASSESSING
//! - `POST   /v1/sessions/{id}/reset`      — back to SELECTING, answers cleared
//! - `GET    /v1/sessions/{id}/report`     — classification report

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use dmo_classify::{ClassificationReport, DatasetProfile, Suggestion, SuggestionRules};
use dmo_core::ClassificationLevel;
use dmo_state::{AnswerEntry, AssessmentSession, TransitionRecord, WorkflowError, WorkflowPhase};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Snapshot of a session as returned by every session endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub phase: WorkflowPhase,
    /// Fraction of the taxonomy answered, in `[0, 1]`.
    pub progress: f64,
    pub answered: usize,
    pub total_questions: usize,
    /// Authoritative tier; absent until the first answer.
    pub current_level: Option<ClassificationLevel>,
    pub required_controls: Vec<String>,
    pub dataset: Option<DatasetProfile>,
    /// Advisory only. Never affects `current_level`.
    pub suggestion: Option<Suggestion>,
    pub answers: Vec<AnswerEntry>,
    pub transitions: Vec<TransitionRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    pub fn of(session: &AssessmentSession, rules: &SuggestionRules) -> Self {
        let current_level = session.current_level();
        Self {
            id: *session.id().as_uuid(),
            phase: session.phase(),
            progress: session.progress(),
            answered: session.answers().len(),
            total_questions: session.registry().total_questions(),
            current_level,
            required_controls: current_level
                .map(|level| {
                    session
                        .required_controls(level)
                        .iter()
                        .map(|c| c.to_string())
                        .collect()
                })
                .unwrap_or_default(),
            dataset: session.dataset().cloned(),
            suggestion: session.suggestion(rules),
            answers: session.answers().entries(),
            transitions: session.transitions().to_vec(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/{id}", get(get_session).delete(delete_session))
        .route("/v1/sessions/{id}/dataset", put(select_dataset))
        .route("/v1/sessions/{id}/begin", post(begin))
        .route("/v1/sessions/{id}/responses", put(record_response))
        .route("/v1/sessions/{id}/review", post(submit_for_review))
        .route("/v1/sessions/{id}/modify", post(modify))
        .route("/v1/sessions/{id}/reset", post(reset))
        .route("/v1/sessions/{id}/report", get(get_report))
}

/// Apply one workflow operation under the store's write lock and render
/// the resulting view. A failed operation leaves the session untouched.
fn mutate(
    state: &AppState,
    id: Uuid,
    op: impl FnOnce(&mut AssessmentSession) -> Result<(), WorkflowError>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .try_update(&id, |session| {
            op(session)?;
            Ok::<_, WorkflowError>(SessionView::of(session, &state.rules))
        })
        .ok_or_else(|| AppError::session_not_found(id))??;
    Ok(Json(view))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/sessions
async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let session = AssessmentSession::new();
    let view = SessionView::of(&session, &state.rules);
    state.sessions.insert(view.id, session);
    tracing::info!(
        session = %view.id,
        live = state.sessions.len(),
        "assessment session created"
    );
    (StatusCode::CREATED, Json(view))
}

/// GET /v1/sessions/{id}
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::session_not_found(id))?;
    Ok(Json(SessionView::of(&session, &state.rules)))
}

/// DELETE /v1/sessions/{id}
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(&id)
        .ok_or_else(|| AppError::session_not_found(id))?;
    tracing::info!(session = %id, "assessment session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /v1/sessions/{id}/dataset
async fn select_dataset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<DatasetProfile>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let profile = extract_json(body)?;
    mutate(&state, id, |s| s.select_dataset(profile))
}

/// POST /v1/sessions/{id}/begin
async fn begin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    mutate(&state, id, AssessmentSession::begin)
}

/// PUT /v1/sessions/{id}/responses
///
/// Overwrites any earlier answer to the same question.
async fn record_response(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<AnswerEntry>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let entry = extract_json(body)?;
    mutate(&state, id, |s| {
        s.record(&entry.category, &entry.subcategory, entry.question, entry.response)
            .map(|_| ())
    })
}

/// POST /v1/sessions/{id}/review
async fn submit_for_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    mutate(&state, id, AssessmentSession::submit_for_review)
}

/// POST /v1/sessions/{id}/modify
async fn modify(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    mutate(&state, id, AssessmentSession::modify)
}

/// POST /v1/sessions/{id}/reset
async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    mutate(&state, id, |s| {
        s.reset();
        Ok(())
    })
}

/// GET /v1/sessions/{id}/report
///
/// 422 while no question is answered.
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassificationReport>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .ok_or_else(|| AppError::session_not_found(id))?;
    Ok(Json(session.report(&state.rules)?))
}
