//! # Suggest Subcommand
//!
//! Runs the heuristic suggestion engine over an example dataset or a
//! free-text description. The output is advisory; only an assessment
//! determines a dataset's classification.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dmo_classify::{DatasetProfile, Suggestion};

use crate::load_rules;

/// Arguments for `dmo suggest`.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Key of a built-in example dataset (see `dmo datasets`).
    #[arg(long, conflicts_with_all = ["name", "description", "fields"])]
    pub example: Option<String>,

    /// Dataset name.
    #[arg(long)]
    pub name: Option<String>,

    /// Dataset description.
    #[arg(long)]
    pub description: Option<String>,

    /// Field name. Repeatable.
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// YAML file overriding the built-in suggestion rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl SuggestArgs {
    pub fn profile(&self) -> DatasetProfile {
        match &self.example {
            Some(key) => DatasetProfile::example(key.clone()),
            None => DatasetProfile::custom(
                self.name.clone(),
                self.description.clone(),
                self.fields.clone(),
            ),
        }
    }
}

pub fn run_suggest(args: &SuggestArgs) -> Result<u8> {
    let rules = load_rules(args.rules.as_deref())?;
    let profile = args.profile();
    profile.validate()?;
    let suggestion = rules.suggest(&profile.descriptor_text()?);
    tracing::debug!(matches = suggestion.match_count, "suggestion computed");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
    } else {
        println!("{}", render_suggestion(&suggestion)?);
    }
    Ok(0)
}

pub fn render_suggestion(suggestion: &Suggestion) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Suggested level: {} (advisory)", suggestion.suggested_level.label())?;
    writeln!(out, "Category: {}", suggestion.category)?;
    writeln!(
        out,
        "Risk score: {:.2} ({} indicators matched)",
        suggestion.risk_score, suggestion.match_count
    )?;
    if suggestion.indicators.is_empty() {
        write!(out, "No sensitivity indicators found.")?;
    } else {
        writeln!(out, "Indicators:")?;
        for indicator in &suggestion.indicators {
            writeln!(out, "  - {indicator}")?;
        }
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SuggestArgs,
    }

    fn parse(argv: &[&str]) -> Result<SuggestArgs, clap::Error> {
        let mut full = vec!["dmo"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).map(|c| c.args)
    }

    #[test]
    fn example_flag_builds_example_profile() {
        let args = parse(&["--example", "hr_payroll"]).unwrap();
        assert_eq!(args.profile(), DatasetProfile::example("hr_payroll"));
    }

    #[test]
    fn free_text_flags_build_custom_profile() {
        let args = parse(&[
            "--name",
            "Patients",
            "--field",
            "Diagnosis",
            "--field",
            "Full Name",
        ])
        .unwrap();
        assert_eq!(
            args.profile(),
            DatasetProfile::custom(
                Some("Patients".into()),
                None,
                vec!["Diagnosis".into(), "Full Name".into()]
            )
        );
    }

    #[test]
    fn example_conflicts_with_free_text() {
        assert!(parse(&["--example", "hr_payroll", "--name", "x"]).is_err());
    }

    #[test]
    fn text_rendering_marks_output_advisory() {
        let suggestion = dmo_classify::suggest("HR Payroll Dataset salary bank account tax");
        let text = render_suggestion(&suggestion).unwrap();
        assert!(text.starts_with("Suggested level: SECRET (advisory)"));
        assert!(text.contains("Category: HR"));
        assert!(text.contains("  - financial: salary"));
    }

    #[test]
    fn text_rendering_without_indicators() {
        let suggestion = dmo_classify::suggest("weather observations");
        let text = render_suggestion(&suggestion).unwrap();
        assert!(text.starts_with("Suggested level: PUBLIC"));
        assert!(text.ends_with("No sensitivity indicators found."));
    }

    #[test]
    fn unknown_example_fails() {
        let args = parse(&["--example", "nope"]).unwrap();
        assert!(run_suggest(&args).is_err());
    }
}
