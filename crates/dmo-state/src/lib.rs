//! # dmo-state — Assessment Workflow
//!
//! Per-session mutable state for a classification assessment.
//!
//! ## Components
//!
//! - **Record** (`record.rs`): one severity answer per question, keyed by
//!   validated question identity. Unanswered questions are absent, never
//!   defaulted.
//!
//! - **Workflow** (`workflow.rs`): the session state machine
//!   (`Selecting → Assessing → Reviewing`, with `modify` and `reset`).
//!   Every phase change is logged with a UTC timestamp and reason.
//!
//! ## Design
//!
//! A session is an explicit context object. Nothing here is process-wide;
//! the API keeps many sessions side by side and the CLI builds one per run.
//! The tier is never cached: it is recomputed from the record on demand, so
//! it cannot drift from the answers.

pub mod record;
pub mod workflow;

pub use record::{AnswerEntry, AssessmentRecord};
pub use workflow::{AssessmentSession, TransitionRecord, WorkflowError, WorkflowPhase};
