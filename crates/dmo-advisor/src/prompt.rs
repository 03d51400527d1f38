//! Topic gate and prompt assembly.

use dmo_core::TaxonomyRegistry;

/// Reply given instead of a completion when a question is off-topic.
pub const OUT_OF_SCOPE_MESSAGE: &str = "Sorry, I'm specialized in data classification only. \
     Please ask me about data classification.";

/// Question used when the caller supplies only a dataset descriptor.
pub const DEFAULT_QUESTION: &str = "How should this dataset be classified?";

const TOPIC_KEYWORDS: &[&str] = &[
    "classify",
    "classification",
    "data",
    "secret",
    "confidential",
    "restricted",
    "public",
    "internal",
    "sensitive",
];

/// Whether a question is about data classification.
pub fn is_classification_related(text: &str) -> bool {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Build the completion prompt.
///
/// The level list comes from the registry so the assistant and the
/// questionnaire never disagree on tier names or meanings.
pub fn build_prompt(
    registry: &TaxonomyRegistry,
    question: &str,
    dataset_descriptor: Option<&str>,
) -> String {
    let mut prompt = String::from(
        "You are a data classification assistant. Answer the user's question about \
         classifying a dataset using only the levels below.\n\nLevels:\n",
    );
    for profile in registry.level_profiles() {
        prompt.push_str(&format!("{}: {}\n", profile.level.label(), profile.description));
    }
    if let Some(descriptor) = dataset_descriptor.map(str::trim).filter(|d| !d.is_empty()) {
        prompt.push_str(&format!("\nDataset: \"{descriptor}\"\n"));
    }
    prompt.push_str(&format!("\nQuestion: \"{}\"\n", question.trim()));
    prompt.push_str("\nGive:\n- CLASSIFICATION: [level]\n- REASON: [brief reason]\n");
    prompt
}
