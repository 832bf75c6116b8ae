//! Error types for effect resolution and startup configuration.
//!
//! Only two things can fail a request: a missing prompt and a broken
//! upstream call. Everything the model sends back is absorbed by the parser
//! and sanitizer instead, so it never shows up here.

use std::time::Duration;

use thiserror::Error;

/// Failure talking to the text-completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The call did not finish within the configured deadline.
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status.
    #[error("completion API HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but embedded an error object.
    #[error("completion API error: {0}")]
    Api(String),

    /// The response body was not a chat completion.
    #[error("failed to parse response: {0}")]
    Decode(String),
}

/// Failure resolving an [`EffectRequest`](crate::effect::EffectRequest).
#[derive(Debug, Error)]
pub enum EffectError {
    /// The prompt was missing, blank, or over the configured cap. Maps to a client error.
    #[error("{0}")]
    Validation(String),

    /// The completion service could not be reached or refused the call.
    /// Maps to a server error.
    #[error("upstream completion failed: {0}")]
    Upstream(#[from] CompletionError),
}

impl EffectError {
    /// Whether the caller is at fault (as opposed to the upstream service).
    pub fn is_client_error(&self) -> bool {
        matches!(self, EffectError::Validation(_))
    }
}

/// Invalid or missing startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured: set TYPESCALE_API_KEY or OPENROUTER_KEY")]
    MissingApiKey,

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
