//! # dmo-classify — Decision Engine
//!
//! The pure half of the stack. Nothing in this crate holds state between
//! calls or performs network I/O.
//!
//! - **Resolver** (`resolver.rs`): worst-case dominance over a set of
//!   severity responses. The single most severe answer decides the tier.
//!
//! - **Suggestion** (`suggestion.rs`): keyword heuristics over a free-text
//!   dataset description. Produces an advisory tier, at most five
//!   indicators and a saturating risk score. Rules are immutable once
//!   loaded.
//!
//! - **Datasets** (`datasets.rs`): canned example dataset profiles and the
//!   descriptor text the suggestion engine reads.
//!
//! - **Report** (`report.rs`): the structured summary handed to export
//!   collaborators. This crate never formats or writes files.
//!
//! ## Authority
//!
//! The resolver's tier is authoritative whenever real answers exist. The
//! suggestion engine's tier is advisory and is always carried in a separate
//! field; the two are never merged.

pub mod datasets;
pub mod report;
pub mod resolver;
pub mod suggestion;

pub use datasets::{DatasetError, DatasetProfile, ExampleDataset};
pub use report::{build_report, ClassificationReport, ResponseCounts};
pub use resolver::resolve;
pub use suggestion::{
    suggest, KeywordGroup, RulesError, Suggestion, SuggestionRules, TierThresholds, MAX_INDICATORS,
};
