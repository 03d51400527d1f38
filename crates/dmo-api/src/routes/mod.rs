//! # API Route Modules
//!
//! - `taxonomy` — read-only catalog: questionnaire, levels, controls,
//!   example datasets.
//! - `suggest` — stateless suggestion engine over a dataset profile.
//! - `sessions` — assessment session lifecycle, answers and reports.
//! - `advice` — advisory completion for a session's dataset.

pub mod advice;
pub mod sessions;
pub mod suggest;
pub mod taxonomy;
