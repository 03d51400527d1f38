//! # Severity Response
//!
//! The answer a user gives to one impact question. Variants are declared in
//! ascending severity so the derived `Ord` is the severity order:
//! `None < Low < Medium < High`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DmoError;

/// Severity judgment for a single impact question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Disclosure has no impact.
    None,
    /// Limited impact.
    Low,
    /// Serious impact.
    Medium,
    /// Exceptionally grave impact.
    High,
}

impl Response {
    /// All responses, most severe first (the order a form presents them in).
    pub fn all() -> &'static [Response] {
        &[Self::High, Self::Medium, Self::Low, Self::None]
    }

    /// Severity rank on the shared 0..=3 scale.
    pub fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Response {
    type Err = DmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(DmoError::Parse(format!(
                "unknown response '{other}', expected one of: high, medium, low, none"
            ))),
        }
    }
}
