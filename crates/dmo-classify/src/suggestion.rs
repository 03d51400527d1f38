//! # Heuristic Suggestion Engine
//!
//! Keyword heuristics over a free-text dataset descriptor. The engine
//! answers "what tier does this dataset probably need?" before any
//! question has been answered.
//!
//! ## Algorithm
//!
//! 1. Lower-case the descriptor.
//! 2. For every sensitivity tag, in table order, test each phrase for
//!    substring containment. Each hit increments the match count; the first
//!    five hits become indicators of the form `"tag: phrase"`.
//! 3. Map the match count through [`TierThresholds`].
//! 4. Risk score is `min(count / 10, 1.0)`. This is a saturating
//!    normalisation, not a probability.
//! 5. The category label comes from a separate first-match-wins table, with
//!    a fallback label when nothing matches.
//!
//! Output is advisory. It never feeds the resolver and never mutates an
//! assessment.

use std::path::Path;
use std::sync::OnceLock;

use dmo_core::{ClassificationLevel, DmoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of indicators reported per suggestion.
pub const MAX_INDICATORS: usize = 5;

/// Match count at which the risk score saturates at 1.0.
const RISK_SATURATION: f64 = 10.0;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from loading or validating a rule set.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read suggestion rules from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse suggestion rules: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid suggestion rules: {0}")]
    Invalid(String),
}

impl From<RulesError> for DmoError {
    fn from(err: RulesError) -> Self {
        DmoError::Config(err.to_string())
    }
}

// ─── Rule Set ────────────────────────────────────────────────────────

/// A tag and the phrases that count as evidence for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Indicator or category name reported when any phrase matches.
    pub tag: String,
    /// Lower-case phrases searched for as substrings of the descriptor.
    pub phrases: Vec<String>,
}

impl KeywordGroup {
    fn from_static(tag: &str, phrases: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Minimum match counts for each non-public tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Matches needed for a TOP SECRET suggestion.
    pub top_secret: usize,
    /// Matches needed for a SECRET suggestion.
    pub secret: usize,
    /// Matches needed for a RESTRICTED suggestion. Fewer means PUBLIC.
    pub restricted: usize,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            top_secret: 5,
            secret: 3,
            restricted: 1,
        }
    }
}

impl TierThresholds {
    /// Highest tier whose threshold `match_count` reaches.
    pub fn level_for(&self, match_count: usize) -> ClassificationLevel {
        if match_count >= self.top_secret {
            ClassificationLevel::TopSecret
        } else if match_count >= self.secret {
            ClassificationLevel::Secret
        } else if match_count >= self.restricted {
            ClassificationLevel::Restricted
        } else {
            ClassificationLevel::Public
        }
    }
}

/// Immutable keyword configuration for the suggestion engine.
///
/// Build with [`SuggestionRules::builtin`] or load from YAML. Loaded rule
/// sets are normalised and validated before they are returned, so a
/// `SuggestionRules` value in hand is always usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRules {
    /// Sensitivity tags in match order.
    pub sensitivity: Vec<KeywordGroup>,
    /// Category labels in first-match-wins order.
    #[serde(default)]
    pub categories: Vec<KeywordGroup>,
    /// Category reported when no category group matches.
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
    /// Match counts that map onto suggested tiers.
    #[serde(default)]
    pub thresholds: TierThresholds,
}

fn default_fallback_category() -> String {
    "General".to_string()
}

const SENSITIVITY_TABLE: &[(&str, &[&str])] = &[
    (
        "personal_id",
        &[
            "national id",
            "employee id",
            "customer id",
            "full name",
            "home address",
            "phone number",
            "date of birth",
            "passport",
            "email address",
            "contact details",
            "personal",
        ],
    ),
    (
        "financial",
        &[
            "salary",
            "bank account",
            "tax",
            "payroll",
            "revenue",
            "budget",
            "profit",
            "investment",
            "credit card",
            "financial",
        ],
    ),
    (
        "health",
        &[
            "medical",
            "health",
            "diagnosis",
            "patient",
            "disability",
            "insurance claim",
        ],
    ),
    (
        "security",
        &[
            "password",
            "access log",
            "login",
            "vulnerability",
            "security incident",
            "encryption key",
            "system configuration",
            "national security",
            "intelligence",
        ],
    ),
    (
        "strategic",
        &[
            "research",
            "innovation",
            "patent",
            "product specification",
            "strategic",
            "intellectual property",
            "merger",
            "acquisition",
        ],
    ),
];

const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "HR",
        &["employee", "payroll", "staff", "personnel", "human resources"],
    ),
    (
        "Financial",
        &["financial", "revenue", "budget", "profit", "accounting", "invoice"],
    ),
    ("Customer", &["customer", "client", "purchase", "support ticket"]),
    (
        "Operations",
        &["log", "system", "operation", "inventory", "infrastructure"],
    ),
    (
        "Strategic",
        &["research", "innovation", "patent", "strategy", "strategic"],
    ),
];

impl SuggestionRules {
    /// The compiled-in rule set, built once.
    pub fn builtin() -> &'static SuggestionRules {
        static BUILTIN: OnceLock<SuggestionRules> = OnceLock::new();
        BUILTIN.get_or_init(Self::standard)
    }

    /// A fresh copy of the compiled-in rule set.
    pub fn standard() -> Self {
        let groups = |table: &[(&str, &[&str])]| {
            table
                .iter()
                .map(|(tag, phrases)| KeywordGroup::from_static(tag, phrases))
                .collect::<Vec<_>>()
        };
        Self {
            sensitivity: groups(SENSITIVITY_TABLE),
            categories: groups(CATEGORY_TABLE),
            fallback_category: default_fallback_category(),
            thresholds: TierThresholds::default(),
        }
    }

    /// Parse, normalise and validate a YAML rule set.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RulesError> {
        let mut rules: SuggestionRules = serde_yaml::from_str(yaml)?;
        rules.normalize();
        rules.validate()?;
        Ok(rules)
    }

    /// Load a YAML rule set from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules = Self::from_yaml_str(&yaml)?;
        tracing::info!(
            path = %path.display(),
            sensitivity_tags = rules.sensitivity.len(),
            categories = rules.categories.len(),
            "loaded suggestion rules"
        );
        Ok(rules)
    }

    fn normalize(&mut self) {
        for group in self.sensitivity.iter_mut().chain(self.categories.iter_mut()) {
            group.tag = group.tag.trim().to_string();
            for phrase in &mut group.phrases {
                *phrase = phrase.trim().to_lowercase();
            }
        }
        self.fallback_category = self.fallback_category.trim().to_string();
    }

    /// Check structural rules. Called by every loader.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.sensitivity.is_empty() {
            return Err(RulesError::Invalid(
                "at least one sensitivity tag is required".into(),
            ));
        }
        let tables = [
            ("sensitivity", &self.sensitivity),
            ("categories", &self.categories),
        ];
        for (table, groups) in tables {
            for group in groups {
                if group.tag.is_empty() {
                    return Err(RulesError::Invalid(format!("{table}: empty tag")));
                }
                if group.phrases.is_empty() {
                    return Err(RulesError::Invalid(format!(
                        "{table}: tag '{}' has no phrases",
                        group.tag
                    )));
                }
                if let Some(bad) = group
                    .phrases
                    .iter()
                    .find(|p| p.is_empty() || p.chars().any(char::is_uppercase))
                {
                    return Err(RulesError::Invalid(format!(
                        "{table}: tag '{}' has invalid phrase '{bad}'",
                        group.tag
                    )));
                }
            }
        }
        if self.fallback_category.is_empty() {
            return Err(RulesError::Invalid("fallback_category is empty".into()));
        }
        let t = self.thresholds;
        if t.restricted < 1 || t.secret <= t.restricted || t.top_secret <= t.secret {
            return Err(RulesError::Invalid(format!(
                "thresholds must be strictly descending and at least 1 \
                 (top_secret={}, secret={}, restricted={})",
                t.top_secret, t.secret, t.restricted
            )));
        }
        Ok(())
    }

    /// Run the engine over a descriptor.
    pub fn suggest(&self, text: &str) -> Suggestion {
        let haystack = text.to_lowercase();

        let mut match_count = 0usize;
        let mut indicators = Vec::new();
        for group in &self.sensitivity {
            for phrase in &group.phrases {
                if haystack.contains(phrase.as_str()) {
                    match_count += 1;
                    if indicators.len() < MAX_INDICATORS {
                        indicators.push(format!("{}: {}", group.tag, phrase));
                    }
                }
            }
        }

        let category = self
            .categories
            .iter()
            .find(|group| group.phrases.iter().any(|p| haystack.contains(p.as_str())))
            .map(|group| group.tag.clone())
            .unwrap_or_else(|| self.fallback_category.clone());

        Suggestion {
            category,
            indicators,
            risk_score: risk_score(match_count),
            match_count,
            suggested_level: self.thresholds.level_for(match_count),
        }
    }
}

fn risk_score(match_count: usize) -> f64 {
    (match_count as f64 / RISK_SATURATION).min(1.0)
}

/// Run the built-in rule set over a descriptor.
pub fn suggest(text: &str) -> Suggestion {
    SuggestionRules::builtin().suggest(text)
}

// ─── Output ──────────────────────────────────────────────────────────

/// Advisory output of the suggestion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// First matching category label, or the fallback.
    pub category: String,
    /// At most [`MAX_INDICATORS`] entries, in match order.
    pub indicators: Vec<String>,
    /// In `[0, 1]`.
    pub risk_score: f64,
    /// Number of sensitivity tags that matched.
    pub match_count: usize,
    /// Tier implied by `match_count` under the rule set's thresholds.
    pub suggested_level: ClassificationLevel,
}
