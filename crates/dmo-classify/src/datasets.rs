//! # Dataset Profiles
//!
//! What the user says about the dataset being classified. A profile is
//! either free text (name, description, field names) or a reference to one
//! of the canned [`ExampleDataset`]s. Profiles feed the suggestion engine
//! only; they never set answers in an assessment.

use dmo_core::DmoError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A canned example dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExampleDataset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Example field names found in the dataset.
    pub fields: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
}

impl ExampleDataset {
    /// The six built-in examples, in display order.
    pub fn all() -> &'static [ExampleDataset] {
        EXAMPLES
    }

    /// Look up an example by key.
    pub fn find(key: &str) -> Option<&'static ExampleDataset> {
        EXAMPLES.iter().find(|e| e.key == key)
    }

    /// Text the suggestion engine reads for this example.
    pub fn descriptor_text(&self) -> String {
        let mut parts = vec![self.name, self.description];
        parts.extend_from_slice(self.fields);
        parts.extend_from_slice(self.risk_factors);
        parts.join(" ")
    }
}

const EXAMPLES: &[ExampleDataset] = &[
    ExampleDataset {
        key: "hr_employee",
        name: "HR Employee Content Dataset",
        description: "Employee personal information, performance records, disciplinary actions",
        fields: &[
            "Employee ID",
            "Full Name",
            "National ID",
            "Home Address",
            "Phone Number",
            "Performance Reviews",
            "Disciplinary Records",
            "Training Records",
        ],
        risk_factors: &[
            "Personal identifiable information",
            "Privacy concerns",
            "Potential reputation damage",
        ],
    },
    ExampleDataset {
        key: "hr_payroll",
        name: "HR Payroll Dataset",
        description: "Employee salary information, bank details, tax information",
        fields: &[
            "Employee ID",
            "Salary Amount",
            "Bank Account Number",
            "Tax Information",
            "Benefits Details",
            "Bonuses",
            "Deductions",
        ],
        risk_factors: &[
            "Financial information",
            "Privacy violations",
            "Competitive intelligence",
        ],
    },
    ExampleDataset {
        key: "customer_data",
        name: "Customer Database",
        description: "Customer contact information, purchase history, preferences",
        fields: &[
            "Customer ID",
            "Contact Details",
            "Purchase History",
            "Preferences",
            "Support Tickets",
            "Feedback",
        ],
        risk_factors: &[
            "Customer privacy",
            "Business competitive advantage",
            "GDPR compliance",
        ],
    },
    ExampleDataset {
        key: "financial_reports",
        name: "Financial Reports",
        description: "Company financial statements, budget information, revenue data",
        fields: &[
            "Revenue Data",
            "Profit/Loss Statements",
            "Budget Allocations",
            "Cost Centers",
            "Investment Information",
        ],
        risk_factors: &[
            "Market sensitive information",
            "Competitive advantage",
            "Investor relations",
        ],
    },
    ExampleDataset {
        key: "security_logs",
        name: "Security System Logs",
        description: "Access logs, security incidents, system vulnerabilities",
        fields: &[
            "Access Logs",
            "Login Records",
            "Security Incidents",
            "Vulnerability Reports",
            "System Configurations",
        ],
        risk_factors: &[
            "National security",
            "Infrastructure protection",
            "Operational security",
        ],
    },
    ExampleDataset {
        key: "research_data",
        name: "Research & Development Data",
        description: "Product development, research findings, innovation plans",
        fields: &[
            "Research Results",
            "Product Specifications",
            "Innovation Plans",
            "Patent Applications",
            "Test Results",
        ],
        risk_factors: &[
            "Competitive advantage",
            "Intellectual property",
            "Strategic planning",
        ],
    },
];

/// Errors from dataset profile validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("unknown example dataset '{key}'")]
    UnknownExample { key: String },

    #[error("dataset profile has no name, description or fields")]
    EmptyProfile,
}

impl From<DatasetError> for DmoError {
    fn from(err: DatasetError) -> Self {
        DmoError::Validation(err.to_string())
    }
}

/// The dataset a user describes before or during an assessment.
///
/// Deserializes from either `{"example": "hr_payroll"}` or
/// `{"name": ..., "description": ..., "fields": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetProfile {
    /// Reference to a canned example by key.
    Example { example: String },
    /// Free-text description.
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<String>,
    },
}

impl DatasetProfile {
    pub fn example(key: impl Into<String>) -> Self {
        Self::Example {
            example: key.into(),
        }
    }

    pub fn custom(
        name: Option<String>,
        description: Option<String>,
        fields: Vec<String>,
    ) -> Self {
        Self::Custom {
            name,
            description,
            fields,
        }
    }

    /// Reject references to unknown examples and profiles with no text.
    pub fn validate(&self) -> Result<(), DatasetError> {
        match self {
            Self::Example { example } => ExampleDataset::find(example)
                .map(|_| ())
                .ok_or_else(|| DatasetError::UnknownExample {
                    key: example.clone(),
                }),
            Self::Custom { .. } => {
                if self.descriptor_text()?.trim().is_empty() {
                    Err(DatasetError::EmptyProfile)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Example { example } => ExampleDataset::find(example).map(|e| e.name.to_string()),
            Self::Custom { name, .. } => name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }

    /// Name, description and fields joined by single spaces.
    pub fn descriptor_text(&self) -> Result<String, DatasetError> {
        match self {
            Self::Example { example } => ExampleDataset::find(example)
                .map(ExampleDataset::descriptor_text)
                .ok_or_else(|| DatasetError::UnknownExample {
                    key: example.clone(),
                }),
            Self::Custom {
                name,
                description,
                fields,
            } => {
                let parts: Vec<&str> = name
                    .as_deref()
                    .into_iter()
                    .chain(description.as_deref())
                    .chain(fields.iter().map(String::as_str))
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .collect();
                Ok(parts.join(" "))
            }
        }
    }
}
