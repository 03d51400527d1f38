//! # dmo-cli — Command-Line Front End
//!
//! Provides the `dmo` command, an offline counterpart to the HTTP service.
//!
//! ## Subcommands
//!
//! - `dmo taxonomy` — print the impact questionnaire.
//! - `dmo levels` — print classification levels and their controls.
//! - `dmo datasets` — list the canned example datasets.
//! - `dmo suggest` — advisory tier for a dataset description.
//! - `dmo assess` — run an answers file through the workflow and print
//!   the classification report.
//!
//! ```bash
//! dmo suggest --example hr_payroll
//! dmo suggest --name "Patient intake" --field "Full Name" --field Diagnosis
//! dmo assess --answers answers.yaml --format json --output report.json
//! ```

pub mod assess;
pub mod catalog;
pub mod suggest;

use std::path::Path;

use anyhow::{Context, Result};
use dmo_classify::SuggestionRules;
use serde::de::DeserializeOwned;

/// Load suggestion rules from `path`, or the built-in rule set when absent.
pub fn load_rules(path: Option<&Path>) -> Result<SuggestionRules> {
    match path {
        Some(path) => SuggestionRules::from_path(path)
            .with_context(|| format!("failed to load suggestion rules from {}", path.display())),
        None => Ok(SuggestionRules::builtin().clone()),
    }
}

/// Read a YAML or JSON document. JSON is parsed as YAML.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write `content` to `path`, or stdout when no path is given.
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}
