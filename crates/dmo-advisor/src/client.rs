//! Completion client and the timeout-bounded advisor built on it.
//!
//! ## Wire format
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `v1beta/models/{model}:generateContent` | single-turn completion |
//!
//! Request body: `{"contents":[{"parts":[{"text": prompt}]}]}`.
//! The first text part of the first candidate is the answer.

use std::future::Future;
use std::time::Duration;

use dmo_core::TaxonomyRegistry;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::prompt::{
    build_prompt, is_classification_related, DEFAULT_QUESTION, OUT_OF_SCOPE_MESSAGE,
};

/// A service that turns a prompt into free text.
pub trait CompletionClient: Send + Sync {
    /// Model identifier reported alongside answers.
    fn model(&self) -> &str;

    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AdvisorError>> + Send;
}

// -- HTTP client --------------------------------------------------------------

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
    }
}

/// HTTP client for a `generateContent`-style completion service.
///
/// Custom `Debug` implementation redacts the `api_key` field.
#[derive(Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpCompletionClient {
    /// No request timeout is set here; [`Advisor::consult`] bounds the call.
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AdvisorError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl CompletionClient for HttpCompletionClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let endpoint = format!("POST models/{}:generateContent", self.model);
        let url = format!(
            "{}v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(AdvisorError::Upstream {
                endpoint,
                status,
                body,
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AdvisorError::Deserialization {
                endpoint,
                source: e,
            })?;
        parsed.into_text().ok_or(AdvisorError::EmptyCompletion)
    }
}

// -- Advisor ------------------------------------------------------------------

/// Outcome of an advisory consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Advice {
    /// The completion service answered.
    Answered { text: String, model: String },
    /// The question was not about data classification; no call was made.
    OutOfScope { message: String },
}

/// Topic gate, prompt assembly and a bounded completion call.
#[derive(Debug, Clone)]
pub struct Advisor<C> {
    client: C,
    registry: &'static TaxonomyRegistry,
    timeout: Duration,
}

impl Advisor<HttpCompletionClient> {
    /// Build an HTTP-backed advisor from configuration.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        Ok(Self::new(
            HttpCompletionClient::new(config)?,
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

impl<C: CompletionClient> Advisor<C> {
    pub fn new(client: C, timeout: Duration) -> Self {
        Self {
            client,
            registry: TaxonomyRegistry::standard(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Ask the completion service about a dataset.
    ///
    /// `question` defaults to a generic "how should this be classified"
    /// question. Off-topic questions are answered locally with
    /// [`Advice::OutOfScope`] and never reach the service.
    pub async fn consult(
        &self,
        question: Option<&str>,
        dataset_descriptor: Option<&str>,
    ) -> Result<Advice, AdvisorError> {
        let question = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUESTION);

        if !is_classification_related(question) {
            tracing::debug!(question, "advisory question out of scope");
            return Ok(Advice::OutOfScope {
                message: OUT_OF_SCOPE_MESSAGE.to_string(),
            });
        }

        let prompt = build_prompt(self.registry, question, dataset_descriptor);
        let text = match tokio::time::timeout(self.timeout, self.client.complete(&prompt)).await {
            Ok(result) => result.map_err(|e| {
                tracing::warn!(
                    error = %e,
                    model = self.client.model(),
                    "advisory completion failed"
                );
                e
            })?,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    model = self.client.model(),
                    "advisory completion timed out"
                );
                return Err(AdvisorError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        Ok(Advice::Answered {
            text,
            model: self.client.model().to_string(),
        })
    }
}
