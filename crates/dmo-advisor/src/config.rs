//! Advisory client configuration.
//!
//! Read once at startup from environment variables. The API key is the
//! switch: without it the advisory endpoint reports itself unavailable
//! instead of failing requests one by one.

use url::Url;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the completion service.
///
/// Custom `Debug` implementation redacts the `api_key` field.
#[derive(Clone)]
pub struct AdvisorConfig {
    /// Base URL of the completion service.
    pub base_url: Url,
    /// API key sent with every request.
    pub api_key: String,
    /// Model name (default `gemini-2.5-flash`).
    pub model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AdvisorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DMO_COMPLETION_API_KEY` (required)
    /// - `DMO_COMPLETION_URL` (default: `https://generativelanguage.googleapis.com`)
    /// - `DMO_COMPLETION_MODEL` (default: `gemini-2.5-flash`)
    /// - `DMO_COMPLETION_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("DMO_COMPLETION_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = lookup("DMO_COMPLETION_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url("DMO_COMPLETION_URL", &raw_url)?;

        let timeout_secs = match lookup("DMO_COMPLETION_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            api_key,
            model: lookup("DMO_COMPLETION_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs,
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("local mock", base_url)?,
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Parse a base URL and make sure it ends with `/` so paths append cleanly.
fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DMO_COMPLETION_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid DMO_COMPLETION_TIMEOUT_SECS '{0}': expected a positive integer")]
    InvalidTimeout(String),
}
