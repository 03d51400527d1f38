//! # Classification Resolver
//!
//! Worst-case dominance: the most severe response present determines the
//! tier.
//!
//! | Most severe response | Tier |
//! |----------------------|------|
//! | High | TopSecret |
//! | Medium | Secret |
//! | Low | Restricted |
//! | None | Public |
//!
//! The result depends only on the set of response values, never on which
//! questions they came from or the order they arrive in.

use dmo_core::{ClassificationLevel, Response};

/// Resolve a collection of responses to a classification level.
///
/// Returns `None` for an empty collection. An empty assessment has no tier;
/// callers gate on "at least one answer" before presenting a result.
pub fn resolve<I>(responses: I) -> Option<ClassificationLevel>
where
    I: IntoIterator<Item = Response>,
{
    responses
        .into_iter()
        .max()
        .map(ClassificationLevel::from_response)
}
