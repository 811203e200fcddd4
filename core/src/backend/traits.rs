//! Completion Backend Traits
//!
//! Trait and request/error types shared by every completion backend.
//!
//! A backend turns a transcript into one reply. It makes a single attempt;
//! retrying, if anyone wanted it, would be the caller's business.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::messages::Message;

/// Failure of a completion call
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Connection, DNS, TLS or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("endpoint returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Success status, but the reply text is missing or the body isn't JSON
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Body of a chat-completion request
///
/// Serializes to the wire format of the endpoint:
/// `{model, messages, temperature, max_tokens, stream}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Full transcript, system message first if present
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens in the reply
    pub max_tokens: u32,
    /// Always false; replies arrive in one piece
    pub stream: bool,
}

impl CompletionRequest {
    /// Create a request for `model` over `messages`
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.5,
            max_tokens: 1024,
            stream: false,
        }
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Completion backend trait
///
/// Implement this trait to add support for a different provider.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name for logs (e.g., "Groq")
    fn name(&self) -> &str;

    /// Send the request and wait for the complete reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
