//! # Classification Report
//!
//! The structured summary of a finished assessment. Export collaborators
//! (the CLI's text and JSON writers, the API's report endpoint) serialise
//! it; this module does no formatting and no file I/O.

use chrono::{DateTime, Utc};
use dmo_core::{ClassificationLevel, Response, TaxonomyRegistry};
use serde::{Deserialize, Serialize};

use crate::resolver::resolve;
use crate::suggestion::Suggestion;

/// Number of answers at each severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCounts {
    /// Answers of `high`.
    pub high: usize,
    /// Answers of `medium`.
    pub medium: usize,
    /// Answers of `low`.
    pub low: usize,
    /// Answers of `none`.
    pub none: usize,
}

impl ResponseCounts {
    pub fn tally<I: IntoIterator<Item = Response>>(responses: I) -> Self {
        let mut counts = Self::default();
        for r in responses {
            match r {
                Response::High => counts.high += 1,
                Response::Medium => counts.medium += 1,
                Response::Low => counts.low += 1,
                Response::None => counts.none += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low + self.none
    }

    pub fn get(&self, response: Response) -> usize {
        match response {
            Response::High => self.high,
            Response::Medium => self.medium,
            Response::Low => self.low,
            Response::None => self.none,
        }
    }
}

/// Result summary of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Resolved tier.
    pub level: ClassificationLevel,
    /// Display label of `level`, e.g. `TOP SECRET`.
    pub label: String,
    /// Registry description of `level`.
    pub description: String,
    /// Required controls for `level`, in registry order.
    pub controls: Vec<String>,
    /// Answers grouped by severity.
    pub response_counts: ResponseCounts,
    /// Number of questions answered.
    pub answered: usize,
    /// Number of questions in the taxonomy.
    pub total_questions: usize,
    /// Name of the dataset the assessment was about, when one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    /// Advisory output of the suggestion engine. Never affects `level`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Suggestion>,
    /// When the report was built.
    pub generated_at: DateTime<Utc>,
}

impl ClassificationReport {
    pub fn with_dataset(mut self, name: Option<String>) -> Self {
        self.dataset = name;
        self
    }

    pub fn with_advisory(mut self, suggestion: Option<Suggestion>) -> Self {
        self.advisory = suggestion;
        self
    }
}

/// Build a report from the recorded responses.
///
/// Returns `None` when there are no responses, mirroring [`resolve`].
pub fn build_report<I>(registry: &TaxonomyRegistry, responses: I) -> Option<ClassificationReport>
where
    I: IntoIterator<Item = Response>,
{
    let responses: Vec<Response> = responses.into_iter().collect();
    let level = resolve(responses.iter().copied())?;
    let profile = registry.level_profile(level);
    let response_counts = ResponseCounts::tally(responses);

    Some(ClassificationReport {
        level,
        label: level.label().to_string(),
        description: profile.description.to_string(),
        controls: profile.controls.iter().map(|c| c.to_string()).collect(),
        answered: response_counts.total(),
        response_counts,
        total_questions: registry.total_questions(),
        dataset: None,
        advisory: None,
        generated_at: Utc::now(),
    })
}
