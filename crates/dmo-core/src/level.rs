//! # Classification Levels
//!
//! The four sensitivity tiers a dataset can land in. Like
//! [`Response`](crate::Response), variants are declared in ascending
//! severity so `Ord` follows the rank.
//!
//! | Rank | Level | Wire name |
//! |------|-------|-----------|
//! | 3 | TopSecret | `top_secret` |
//! | 2 | Secret | `secret` |
//! | 1 | Restricted | `restricted` |
//! | 0 | Public | `public` |
//!
//! Descriptions and controls are not stored on the enum; they are looked up
//! in the [`TaxonomyRegistry`](crate::TaxonomyRegistry).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DmoError;
use crate::response::Response;

/// A dataset sensitivity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLevel {
    /// Open data. No harm from disclosure.
    Public,
    /// Limited harm from disclosure.
    Restricted,
    /// Serious harm from disclosure.
    Secret,
    /// Exceptionally grave harm from disclosure.
    TopSecret,
}

impl ClassificationLevel {
    /// All levels, most severe first.
    pub fn all() -> &'static [ClassificationLevel] {
        &[Self::TopSecret, Self::Secret, Self::Restricted, Self::Public]
    }

    /// Severity rank on the shared 0..=3 scale.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Restricted => 1,
            Self::Secret => 2,
            Self::TopSecret => 3,
        }
    }

    /// The level whose rank matches a response's rank.
    pub fn from_response(response: Response) -> Self {
        match response {
            Response::High => Self::TopSecret,
            Response::Medium => Self::Secret,
            Response::Low => Self::Restricted,
            Response::None => Self::Public,
        }
    }

    /// Wire name (`top_secret`, `secret`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Restricted => "restricted",
            Self::Secret => "secret",
            Self::TopSecret => "top_secret",
        }
    }

    /// Display label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Restricted => "RESTRICTED",
            Self::Secret => "SECRET",
            Self::TopSecret => "TOP SECRET",
        }
    }
}

impl std::fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClassificationLevel {
    type Err = DmoError;

    /// Accepts the wire name or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "public" => Ok(Self::Public),
            "restricted" => Ok(Self::Restricted),
            "secret" => Ok(Self::Secret),
            "top_secret" | "topsecret" => Ok(Self::TopSecret),
            _ => Err(DmoError::Parse(format!(
                "unknown classification level '{s}', expected one of: top_secret, secret, restricted, public"
            ))),
        }
    }
}
