//! # dmo-core — Foundational Types for the Classification Stack
//!
//! This crate defines the vocabulary every other `dmo-*` crate speaks:
//! severity responses, classification levels, question identity, and the
//! immutable impact taxonomy. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One severity order.** `Response` and `ClassificationLevel` share the
//!    same rank scale (0..=3). The resolver maps one onto the other without
//!    lookup tables.
//!
//! 2. **Question identity is a triple.** `(category, subcategory, index)`,
//!    never a flat number. Keys are validated against the registry before
//!    they reach an assessment record.
//!
//! 3. **The taxonomy is static.** The registry is built once per process
//!    from compiled-in definitions and handed out as `&'static`. Nothing
//!    mutates it at runtime.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dmo-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod level;
pub mod response;
pub mod taxonomy;

// Re-export primary types for ergonomic imports.
pub use error::{DmoError, TaxonomyError};
pub use identity::{QuestionId, SessionId};
pub use level::ClassificationLevel;
pub use response::Response;
pub use taxonomy::{ImpactCategory, LevelProfile, Question, Subcategory, TaxonomyRegistry};
