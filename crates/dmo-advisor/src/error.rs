//! Advisory client error types.

/// Errors from advisory completion calls.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Completion service returned a non-2xx status.
    #[error("completion service {endpoint} returned {status}: {body}")]
    Upstream {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service answered but produced no text.
    #[error("completion service returned no text")]
    EmptyCompletion,
    /// The call did not finish within the configured timeout.
    #[error("completion call timed out after {secs}s")]
    Timeout { secs: u64 },
}
