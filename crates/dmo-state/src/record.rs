//! # Assessment Record
//!
//! Mapping from question identity to the severity answer given for it.
//! Keys are resolved through the [`TaxonomyRegistry`] before insertion, so
//! the record never holds a question that does not exist.

use std::collections::BTreeMap;

use dmo_classify::resolve;
use dmo_core::{ClassificationLevel, QuestionId, Response, TaxonomyError, TaxonomyRegistry};
use serde::{Deserialize, Serialize};

/// One answer in its flat, serialisable form.
///
/// Used for answers files, API request bodies and session views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub category: String,
    pub subcategory: String,
    /// Zero-based question index within the subcategory.
    pub question: usize,
    pub response: Response,
}

impl AnswerEntry {
    pub fn id(&self) -> QuestionId {
        QuestionId::new(self.category.clone(), self.subcategory.clone(), self.question)
    }
}

/// Answers recorded so far in one assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentRecord {
    answers: BTreeMap<QuestionId, Response>,
}

impl AssessmentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the answer to one question.
    ///
    /// Returns the previous answer if the question had one. Unknown keys are
    /// rejected and leave the record untouched.
    pub fn record(
        &mut self,
        registry: &TaxonomyRegistry,
        id: QuestionId,
        response: Response,
    ) -> Result<Option<Response>, TaxonomyError> {
        registry.resolve(&id)?;
        Ok(self.answers.insert(id, response))
    }

    pub fn get(&self, id: &QuestionId) -> Option<Response> {
        self.answers.get(id).copied()
    }

    /// Number of distinct questions answered.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Answer values, in question order.
    pub fn responses(&self) -> impl Iterator<Item = Response> + '_ {
        self.answers.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, Response)> + '_ {
        self.answers.iter().map(|(id, r)| (id, *r))
    }

    /// Flat copies of every answer, in question order.
    pub fn entries(&self) -> Vec<AnswerEntry> {
        self.answers
            .iter()
            .map(|(id, response)| AnswerEntry {
                category: id.category.clone(),
                subcategory: id.subcategory.clone(),
                question: id.index,
                response: *response,
            })
            .collect()
    }

    /// Fraction of the registry's questions answered, in `[0, 1]`.
    pub fn progress(&self, registry: &TaxonomyRegistry) -> f64 {
        let total = registry.total_questions();
        if total == 0 {
            return 0.0;
        }
        (self.len() as f64 / total as f64).min(1.0)
    }

    /// Worst-case tier of the current answers; `None` while empty.
    pub fn level(&self) -> Option<ClassificationLevel> {
        resolve(self.responses())
    }
}
