//! # Assess Subcommand
//!
//! Replays an answers file through an [`AssessmentSession`] and prints the
//! resulting classification report. The file is YAML or JSON:
//!
//! ```yaml
//! dataset:
//!   example: hr_payroll
//! responses:
//!   - { category: individuals, subcategory: privacy, question: 0, response: high }
//! ```
//!
//! The session goes through the same phase rules as the HTTP service:
//! dataset selection, begin, answers, review.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use dmo_classify::{ClassificationReport, DatasetProfile, SuggestionRules};
use dmo_core::Response;
use dmo_state::{AnswerEntry, AssessmentSession};
use serde::Deserialize;

use crate::{emit, load_rules, read_document};

/// Arguments for `dmo assess`.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// YAML or JSON answers file.
    #[arg(long)]
    pub answers: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML file overriding the built-in suggestion rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Contents of an answers file.
#[derive(Debug, Deserialize)]
pub struct AnswersFile {
    #[serde(default)]
    pub dataset: Option<DatasetProfile>,
    #[serde(default)]
    pub responses: Vec<AnswerEntry>,
}

pub fn run_assess(args: &AssessArgs) -> Result<u8> {
    let rules = load_rules(args.rules.as_deref())?;
    let answers = load_answers(&args.answers)?;
    let report = assess(answers, &rules)
        .with_context(|| format!("assessment of {} failed", args.answers.display()))?;
    tracing::info!(level = %report.label, answered = report.answered, "assessment complete");

    let rendered = match args.format {
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        ReportFormat::Text => render_report(&report)?,
    };
    emit(&rendered, args.output.as_deref())?;
    Ok(0)
}

/// Drive a fresh session through the workflow and return its report.
pub fn assess(answers: AnswersFile, rules: &SuggestionRules) -> Result<ClassificationReport> {
    let mut session = AssessmentSession::new();
    if let Some(profile) = answers.dataset {
        session.select_dataset(profile)?;
    }
    session.begin()?;
    for entry in &answers.responses {
        let previous = session
            .record(&entry.category, &entry.subcategory, entry.question, entry.response)
            .with_context(|| {
                format!(
                    "invalid answer for {}/{}/{}",
                    entry.category, entry.subcategory, entry.question
                )
            })?;
        if previous.is_some() {
            tracing::warn!(
                category = %entry.category,
                subcategory = %entry.subcategory,
                question = entry.question,
                "question answered more than once; last answer wins"
            );
        }
    }
    session.submit_for_review()?;
    Ok(session.report(rules)?)
}

pub fn render_report(report: &ClassificationReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Classification: {}", report.label)?;
    writeln!(out, "  {}", report.description)?;
    if let Some(dataset) = &report.dataset {
        writeln!(out, "Dataset: {dataset}")?;
    }
    writeln!(
        out,
        "Answered: {} of {} questions",
        report.answered, report.total_questions
    )?;
    let counts: Vec<String> = Response::all()
        .iter()
        .map(|r| format!("{} {}", r.as_str(), report.response_counts.get(*r)))
        .collect();
    writeln!(out, "Responses: {}", counts.join(", "))?;
    writeln!(out, "Required controls:")?;
    for control in &report.controls {
        writeln!(out, "  - {control}")?;
    }
    if let Some(advisory) = &report.advisory {
        writeln!(
            out,
            "Advisory suggestion: {} (category {}, {} indicators matched; not authoritative)",
            advisory.suggested_level.label(),
            advisory.category,
            advisory.match_count
        )?;
    }
    Ok(out.trim_end().to_string())
}

/// Parse an answers file without running it.
pub fn load_answers(path: &Path) -> Result<AnswersFile> {
    read_document(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmo_core::ClassificationLevel;

    const ANSWERS_YAML: &str = r#"
dataset:
  example: hr_payroll
responses:
  - { category: individuals, subcategory: privacy, question: 0, response: low }
  - { category: individuals, subcategory: privacy, question: 1, response: medium }
  - { category: entity_activities, subcategory: private_profits, question: 0, response: none }
"#;

    fn write_answers(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn assess_resolves_worst_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_answers(&dir, "answers.yaml", ANSWERS_YAML);
        let report = assess(load_answers(&path).unwrap(), SuggestionRules::builtin()).unwrap();
        assert_eq!(report.level, ClassificationLevel::Secret);
        assert_eq!(report.answered, 3);
        assert_eq!(report.dataset.as_deref(), Some("HR Payroll Dataset"));
        assert_eq!(
            report.advisory.map(|s| s.suggested_level),
            Some(ClassificationLevel::TopSecret)
        );
    }

    #[test]
    fn text_report_lists_controls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_answers(&dir, "answers.yaml", ANSWERS_YAML);
        let report = assess(load_answers(&path).unwrap(), SuggestionRules::builtin()).unwrap();
        let text = render_report(&report).unwrap();
        assert!(text.starts_with("Classification: SECRET"));
        assert!(text.contains("Answered: 3 of 33 questions"));
        assert!(text.contains("Responses: high 0, medium 1, low 1, none 1"));
        assert!(text.contains("  - Encrypt at rest and in transit"));
        assert!(text.contains("not authoritative"));
    }

    #[test]
    fn json_answers_file_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_answers(
            &dir,
            "answers.json",
            r#"{"responses": [{"category": "national_interest", "subcategory": "security", "question": 0, "response": "high"}]}"#,
        );
        let report = assess(load_answers(&path).unwrap(), SuggestionRules::builtin()).unwrap();
        assert_eq!(report.level, ClassificationLevel::TopSecret);
        assert!(report.dataset.is_none());
        assert!(report.advisory.is_none());
    }

    #[test]
    fn empty_answers_fail() {
        let answers = AnswersFile {
            dataset: None,
            responses: Vec::new(),
        };
        assert!(assess(answers, SuggestionRules::builtin()).is_err());
    }

    #[test]
    fn unknown_question_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_answers(
            &dir,
            "answers.yaml",
            concat!(
                "responses:\n",
                "  - { category: individuals, subcategory: privacy,",
                " question: 42, response: low }\n",
            ),
        );
        let err = assess(load_answers(&path).unwrap(), SuggestionRules::builtin()).unwrap_err();
        assert!(format!("{err:#}").contains("individuals/privacy/42"));
    }

    #[test]
    fn run_assess_writes_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let answers = write_answers(&dir, "answers.yaml", ANSWERS_YAML);
        let output = dir.path().join("report.json");
        let args = AssessArgs {
            answers,
            format: ReportFormat::Json,
            output: Some(output.clone()),
            rules: None,
        };
        assert_eq!(run_assess(&args).unwrap(), 0);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value["level"], "secret");
        assert_eq!(value["label"], "SECRET");
    }
}
