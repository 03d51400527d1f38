//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across the classification stack. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Taxonomy errors name the exact key that failed to resolve so the
//!   caller can report it back verbatim.
//! - Parse errors carry the rejected input.
//! - State machine errors live next to their state machines in
//!   `dmo-state` and convert into [`DmoError`].

use thiserror::Error;

/// Top-level error type for the classification stack.
#[derive(Error, Debug)]
pub enum DmoError {
    /// A key did not resolve against the taxonomy registry.
    #[error("taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// A value could not be parsed from its textual form.
    #[error("parse error: {0}")]
    Parse(String),

    /// Workflow transition rejected.
    #[error("invalid workflow transition: {0}")]
    InvalidTransition(String),

    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A question key that is not part of the registry.
///
/// Recording against an unknown key is a contract violation: it is
/// rejected, never ignored and never auto-created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// The category key does not exist.
    #[error("unknown impact category '{category}'")]
    UnknownCategory {
        /// The rejected category key.
        category: String,
    },

    /// The subcategory key does not exist within the category.
    #[error("unknown subcategory '{subcategory}' in category '{category}'")]
    UnknownSubcategory {
        /// The (valid) category key.
        category: String,
        /// The rejected subcategory key.
        subcategory: String,
    },

    /// The question index is out of range for the subcategory.
    #[error("question index {index} out of range for '{category}/{subcategory}' ({count} questions)")]
    QuestionOutOfRange {
        /// The (valid) category key.
        category: String,
        /// The (valid) subcategory key.
        subcategory: String,
        /// The rejected index.
        index: usize,
        /// Number of questions in the subcategory.
        count: usize,
    },
}
