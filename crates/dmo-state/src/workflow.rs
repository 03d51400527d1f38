//! # Assessment Workflow State Machine
//!
//! Governs how a user moves between describing a dataset, answering impact
//! questions and reviewing the resulting tier.
//!
//! ## States
//!
//! ```text
//!              begin               submit_for_review
//! Selecting ─────────▶ Assessing ─────────────────────▶ Reviewing
//!     ▲                    ▲  (≥ 1 answer required)          │
//!     │                    └──────────── modify ─────────────┘
//!     │
//!     └──────────── reset (from any phase; clears answers and dataset)
//! ```
//!
//! ## Operation guards
//!
//! | Operation | Allowed in |
//! |-----------|------------|
//! | `select_dataset` | Selecting, Assessing |
//! | `record` | Assessing |
//! | `begin` | Selecting |
//! | `submit_for_review` | Assessing, with a non-empty record |
//! | `modify` | Reviewing |
//! | `reset` | any |
//!
//! A rejected operation never mutates the session.

use chrono::{DateTime, Utc};
use dmo_classify::{
    build_report, ClassificationReport, DatasetError, DatasetProfile, Suggestion, SuggestionRules,
};
use dmo_core::{
    ClassificationLevel, DmoError, QuestionId, Response, SessionId, TaxonomyError,
    TaxonomyRegistry,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::AssessmentRecord;

// ─── Workflow Phase ──────────────────────────────────────────────────

/// Phase of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// Optionally picking or describing the dataset.
    Selecting,
    /// Answering impact questions.
    Assessing,
    /// Tier and controls on display.
    Reviewing,
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Selecting => "SELECTING",
            Self::Assessing => "ASSESSING",
            Self::Reviewing => "REVIEWING",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from workflow operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Attempted phase change is not valid from the current phase.
    #[error("invalid workflow transition: {from} -> {to}")]
    InvalidTransition {
        /// Current phase.
        from: WorkflowPhase,
        /// Attempted target phase.
        to: WorkflowPhase,
    },

    /// Operation is not permitted in the current phase.
    #[error("cannot {operation} while {phase}")]
    WrongPhase {
        /// The rejected operation.
        operation: &'static str,
        /// Current phase.
        phase: WorkflowPhase,
    },

    /// Review requested before any question was answered.
    #[error("assessment has no answers; answer at least one question first")]
    EmptyAssessment,

    /// Answer addressed to a question that does not exist.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// Dataset profile failed validation.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl WorkflowError {
    /// Whether the error is a phase conflict rather than bad input.
    pub fn is_phase_conflict(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. } | Self::WrongPhase { .. })
    }
}

impl From<WorkflowError> for DmoError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Taxonomy(e) => DmoError::Taxonomy(e),
            e @ (WorkflowError::InvalidTransition { .. } | WorkflowError::WrongPhase { .. }) => {
                DmoError::InvalidTransition(e.to_string())
            }
            e => DmoError::Validation(e.to_string()),
        }
    }
}

// ─── Transition Log ──────────────────────────────────────────────────

/// Record of a phase change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Phase before the transition.
    pub from_state: WorkflowPhase,
    /// Phase after the transition.
    pub to_state: WorkflowPhase,
    /// When the transition occurred.
    pub timestamp: DateTime<Utc>,
    /// Reason for the transition.
    pub reason: String,
}

// ─── Session ─────────────────────────────────────────────────────────

/// One assessment: phase, answers, optional dataset profile and history.
///
/// The taxonomy is shared and read-only; everything else belongs to this
/// session alone.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    id: SessionId,
    phase: WorkflowPhase,
    record: AssessmentRecord,
    dataset: Option<DatasetProfile>,
    transitions: Vec<TransitionRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    registry: &'static TaxonomyRegistry,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    /// Start a session against the standard taxonomy, in `Selecting`.
    pub fn new() -> Self {
        Self::with_registry(TaxonomyRegistry::standard())
    }

    pub fn with_registry(registry: &'static TaxonomyRegistry) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            phase: WorkflowPhase::Selecting,
            record: AssessmentRecord::new(),
            dataset: None,
            transitions: Vec::new(),
            created_at: now,
            updated_at: now,
            registry,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn answers(&self) -> &AssessmentRecord {
        &self.record
    }

    pub fn dataset(&self) -> Option<&DatasetProfile> {
        self.dataset.as_ref()
    }

    /// Ordered log of all phase changes, including resets.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn registry(&self) -> &'static TaxonomyRegistry {
        self.registry
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Pick or replace the dataset profile (SELECTING or ASSESSING).
    pub fn select_dataset(&mut self, profile: DatasetProfile) -> Result<(), WorkflowError> {
        if self.phase == WorkflowPhase::Reviewing {
            return Err(WorkflowError::WrongPhase {
                operation: "select a dataset",
                phase: self.phase,
            });
        }
        profile.validate()?;
        tracing::debug!(session = %self.id, dataset = ?profile.display_name(), "dataset selected");
        self.dataset = Some(profile);
        self.touch();
        Ok(())
    }

    /// Start answering questions (SELECTING → ASSESSING).
    pub fn begin(&mut self) -> Result<(), WorkflowError> {
        self.require_phase(WorkflowPhase::Selecting, WorkflowPhase::Assessing)?;
        self.do_transition(WorkflowPhase::Assessing, "assessment started");
        Ok(())
    }

    /// Record or overwrite one answer (ASSESSING only).
    ///
    /// Returns the answer previously held for the question, if any.
    pub fn record(
        &mut self,
        category: &str,
        subcategory: &str,
        index: usize,
        response: Response,
    ) -> Result<Option<Response>, WorkflowError> {
        if self.phase != WorkflowPhase::Assessing {
            return Err(WorkflowError::WrongPhase {
                operation: "record an answer",
                phase: self.phase,
            });
        }
        let id = QuestionId::new(category, subcategory, index);
        let previous = self.record.record(self.registry, id, response)?;
        tracing::debug!(
            session = %self.id,
            category,
            subcategory,
            index,
            %response,
            answered = self.record.len(),
            "response recorded"
        );
        self.touch();
        Ok(previous)
    }

    /// Show the result (ASSESSING → REVIEWING). Requires at least one answer.
    pub fn submit_for_review(&mut self) -> Result<(), WorkflowError> {
        self.require_phase(WorkflowPhase::Assessing, WorkflowPhase::Reviewing)?;
        if self.record.is_empty() {
            return Err(WorkflowError::EmptyAssessment);
        }
        self.do_transition(WorkflowPhase::Reviewing, "submitted for review");
        Ok(())
    }

    /// Go back to editing answers (REVIEWING → ASSESSING). Answers are kept.
    pub fn modify(&mut self) -> Result<(), WorkflowError> {
        self.require_phase(WorkflowPhase::Reviewing, WorkflowPhase::Assessing)?;
        self.do_transition(WorkflowPhase::Assessing, "returned to assessment");
        Ok(())
    }

    /// Discard answers and dataset and return to SELECTING. Irreversible.
    pub fn reset(&mut self) {
        self.record.clear();
        self.dataset = None;
        self.do_transition(WorkflowPhase::Selecting, "assessment reset");
    }

    // ── Derived values ───────────────────────────────────────────────

    /// Authoritative tier from the recorded answers; `None` while empty.
    pub fn current_level(&self) -> Option<ClassificationLevel> {
        self.record.level()
    }

    /// Fraction of the taxonomy answered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.record.progress(self.registry)
    }

    pub fn required_controls(&self, level: ClassificationLevel) -> &'static [&'static str] {
        self.registry.required_controls(level)
    }

    /// Advisory suggestion for the selected dataset, if one is selected.
    pub fn suggestion(&self, rules: &SuggestionRules) -> Option<Suggestion> {
        let text = self.dataset.as_ref()?.descriptor_text().ok()?;
        Some(rules.suggest(&text))
    }

    /// Structured report of the current answers.
    ///
    /// Available in any phase once at least one question is answered.
    pub fn report(&self, rules: &SuggestionRules) -> Result<ClassificationReport, WorkflowError> {
        let report = build_report(self.registry, self.record.responses())
            .ok_or(WorkflowError::EmptyAssessment)?;
        Ok(report
            .with_dataset(self.dataset.as_ref().and_then(DatasetProfile::display_name))
            .with_advisory(self.suggestion(rules)))
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_phase(
        &self,
        expected: WorkflowPhase,
        target: WorkflowPhase,
    ) -> Result<(), WorkflowError> {
        if self.phase != expected {
            return Err(WorkflowError::InvalidTransition {
                from: self.phase,
                to: target,
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: WorkflowPhase, reason: &str) {
        let now = Utc::now();
        self.transitions.push(TransitionRecord {
            from_state: self.phase,
            to_state: to,
            timestamp: now,
            reason: reason.to_string(),
        });
        tracing::info!(
            session = %self.id,
            from = %self.phase,
            to = %to,
            reason,
            "workflow transition"
        );
        self.phase = to;
        self.updated_at = now;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assessing() -> AssessmentSession {
        let mut s = AssessmentSession::new();
        s.begin().unwrap();
        s
    }

    fn reviewing() -> AssessmentSession {
        let mut s = assessing();
        s.record("individuals", "privacy", 0, Response::Low).unwrap();
        s.submit_for_review().unwrap();
        s
    }

    // ── Happy path ───────────────────────────────────────────────────

    #[test]
    fn new_session_is_selecting_and_empty() {
        let s = AssessmentSession::new();
        assert_eq!(s.phase(), WorkflowPhase::Selecting);
        assert!(s.answers().is_empty());
        assert!(s.dataset().is_none());
        assert!(s.transitions().is_empty());
        assert_eq!(s.current_level(), None);
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn begin_moves_to_assessing() {
        let s = assessing();
        assert_eq!(s.phase(), WorkflowPhase::Assessing);
        assert_eq!(s.transitions().len(), 1);
        assert_eq!(s.transitions()[0].from_state, WorkflowPhase::Selecting);
        assert_eq!(s.transitions()[0].to_state, WorkflowPhase::Assessing);
    }

    #[test]
    fn low_and_none_resolve_to_restricted() {
        let mut s = assessing();
        s.record("national_interest", "reputation", 0, Response::Low).unwrap();
        s.record("national_interest", "reputation", 1, Response::None).unwrap();
        assert_eq!(s.current_level(), Some(ClassificationLevel::Restricted));
    }

    #[test]
    fn medium_and_high_resolve_to_top_secret() {
        let mut s = assessing();
        s.record("entity_activities", "private_profits", 0, Response::Medium).unwrap();
        s.record("individuals", "health_safety", 2, Response::High).unwrap();
        assert_eq!(s.current_level(), Some(ClassificationLevel::TopSecret));
    }

    #[test]
    fn rerecording_overwrites_and_keeps_count() {
        let mut s = assessing();
        assert_eq!(s.record("environment", "resources", 1, Response::High).unwrap(), None);
        assert_eq!(
            s.record("environment", "resources", 1, Response::None).unwrap(),
            Some(Response::High)
        );
        assert_eq!(s.answers().len(), 1);
        assert_eq!(s.current_level(), Some(ClassificationLevel::Public));
        assert!((s.progress() - 1.0 / 33.0).abs() < 1e-12);
    }

    #[test]
    fn modify_keeps_answers() {
        let mut s = reviewing();
        s.modify().unwrap();
        assert_eq!(s.phase(), WorkflowPhase::Assessing);
        assert_eq!(s.answers().len(), 1);
        s.record("individuals", "privacy", 1, Response::Medium).unwrap();
        assert_eq!(s.current_level(), Some(ClassificationLevel::Secret));
    }

    #[test]
    fn dataset_can_be_changed_while_assessing() {
        let mut s = AssessmentSession::new();
        s.select_dataset(DatasetProfile::example("hr_employee")).unwrap();
        s.begin().unwrap();
        s.select_dataset(DatasetProfile::example("security_logs")).unwrap();
        assert_eq!(s.dataset(), Some(&DatasetProfile::example("security_logs")));
    }

    #[test]
    fn dataset_selection_is_optional() {
        let mut s = assessing();
        s.record("individuals", "privacy", 2, Response::High).unwrap();
        s.submit_for_review().unwrap();
        assert!(s.suggestion(SuggestionRules::builtin()).is_none());
        let report = s.report(SuggestionRules::builtin()).unwrap();
        assert!(report.dataset.is_none());
        assert!(report.advisory.is_none());
    }

    // ── Guards ───────────────────────────────────────────────────────

    #[test]
    fn review_with_no_answers_is_rejected_and_stays_assessing() {
        let mut s = assessing();
        let err = s.submit_for_review().unwrap_err();
        assert_eq!(err, WorkflowError::EmptyAssessment);
        assert!(!err.is_phase_conflict());
        assert_eq!(s.phase(), WorkflowPhase::Assessing);
        assert_eq!(s.transitions().len(), 1);
    }

    #[test]
    fn recording_while_selecting_is_a_phase_error() {
        let mut s = AssessmentSession::new();
        let err = s.record("individuals", "privacy", 0, Response::High).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::WrongPhase {
                operation: "record an answer",
                phase: WorkflowPhase::Selecting
            }
        );
        assert!(err.to_string().contains("SELECTING"));
        assert!(s.answers().is_empty());
    }

    #[test]
    fn recording_while_reviewing_is_a_phase_error() {
        let mut s = reviewing();
        let err = s.record("individuals", "privacy", 0, Response::High).unwrap_err();
        assert!(err.is_phase_conflict());
        let privacy = QuestionId::new("individuals", "privacy", 0);
        assert_eq!(s.answers().get(&privacy), Some(Response::Low));
    }

    #[test]
    fn modify_while_assessing_is_invalid() {
        let mut s = assessing();
        let err = s.modify().unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidTransition {
                from: WorkflowPhase::Assessing,
                to: WorkflowPhase::Assessing
            }
        );
    }

    #[test]
    fn begin_twice_is_invalid() {
        let mut s = assessing();
        assert!(s.begin().unwrap_err().is_phase_conflict());
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut s = assessing();
        let err = s.record("individuals", "hobbies", 0, Response::Low).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Taxonomy(TaxonomyError::UnknownSubcategory { .. })
        ));
        assert!(s.answers().is_empty());
    }

    #[test]
    fn unknown_example_dataset_is_rejected() {
        let mut s = AssessmentSession::new();
        let err = s.select_dataset(DatasetProfile::example("mystery")).unwrap_err();
        assert!(matches!(err, WorkflowError::Dataset(DatasetError::UnknownExample { .. })));
        assert!(s.dataset().is_none());
    }

    #[test]
    fn dataset_selection_while_reviewing_is_rejected() {
        let mut s = reviewing();
        let err = s.select_dataset(DatasetProfile::example("hr_payroll")).unwrap_err();
        assert!(err.is_phase_conflict());
        assert!(s.dataset().is_none());
    }

    // ── Reset ────────────────────────────────────────────────────────

    #[test]
    fn reset_clears_everything_but_the_log() {
        let mut s = AssessmentSession::new();
        s.select_dataset(DatasetProfile::example("hr_payroll")).unwrap();
        s.begin().unwrap();
        s.record("individuals", "privacy", 0, Response::High).unwrap();
        s.submit_for_review().unwrap();

        s.reset();
        assert_eq!(s.phase(), WorkflowPhase::Selecting);
        assert!(s.answers().is_empty());
        assert!(s.dataset().is_none());
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.current_level(), None);
        assert_eq!(s.transitions().len(), 3);
        assert_eq!(s.transitions()[2].reason, "assessment reset");
    }

    #[test]
    fn reset_from_selecting_is_allowed() {
        let mut s = AssessmentSession::new();
        s.reset();
        assert_eq!(s.phase(), WorkflowPhase::Selecting);
        assert_eq!(s.transitions().len(), 1);
    }

    // ── Report & suggestion ──────────────────────────────────────────

    #[test]
    fn report_keeps_advisory_separate() {
        let mut s = AssessmentSession::new();
        s.select_dataset(DatasetProfile::example("hr_payroll")).unwrap();
        s.begin().unwrap();
        s.record("environment", "resources", 0, Response::Low).unwrap();

        let report = s.report(SuggestionRules::builtin()).unwrap();
        assert_eq!(report.level, ClassificationLevel::Restricted);
        assert_eq!(report.dataset.as_deref(), Some("HR Payroll Dataset"));
        let advisory = report.advisory.unwrap();
        assert_eq!(advisory.suggested_level, ClassificationLevel::TopSecret);
    }

    #[test]
    fn report_requires_an_answer() {
        let s = assessing();
        assert_eq!(
            s.report(SuggestionRules::builtin()).unwrap_err(),
            WorkflowError::EmptyAssessment
        );
    }

    #[test]
    fn required_controls_come_from_the_registry() {
        let s = AssessmentSession::new();
        assert_eq!(
            s.required_controls(ClassificationLevel::Secret),
            TaxonomyRegistry::standard().required_controls(ClassificationLevel::Secret)
        );
    }

    #[test]
    fn errors_convert_into_dmo_error() {
        let err: DmoError = WorkflowError::EmptyAssessment.into();
        assert!(matches!(err, DmoError::Validation(_)));
        let err: DmoError = WorkflowError::WrongPhase {
            operation: "record an answer",
            phase: WorkflowPhase::Reviewing,
        }
        .into();
        assert!(matches!(err, DmoError::InvalidTransition(_)));
    }
}
