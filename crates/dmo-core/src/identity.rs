//! # Identity Newtypes
//!
//! Newtype wrappers for the identifiers the stack passes around. A
//! `SessionId` cannot be confused with any other UUID, and a `QuestionId`
//! is always the full `(category, subcategory, index)` triple.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one taxonomy question.
///
/// Identity is positional within a subcategory and stable: questions are
/// never renumbered. Construction does not validate the triple; use
/// [`TaxonomyRegistry::question`](crate::TaxonomyRegistry::question) for
/// that.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId {
    /// Impact category key (e.g. `national_interest`).
    pub category: String,
    /// Subcategory key within the category (e.g. `reputation`).
    pub subcategory: String,
    /// Zero-based question index within the subcategory.
    pub index: usize,
}

impl QuestionId {
    /// Build a question identity from its parts.
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>, index: usize) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            index,
        }
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.subcategory, self.index)
    }
}
