//! Message Routing
//!
//! The router handles one submitted user message against a [`Session`]:
//!
//! 1. the message is appended as a user turn,
//! 2. the [`TopicGuard`] checks it for inactive topic names,
//! 3. off-topic messages get a guidance turn and never reach the backend,
//! 4. on-topic messages send the whole transcript to the backend once, and
//!    the reply (or `"Error: ..."`) is appended as an assistant turn.
//!
//! Every failure is recovered here; nothing propagates to the caller.

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::guard::{guidance_message, GuardDecision, TopicGuard};
use crate::messages::Message;
use crate::session::Session;
use crate::topic::{ResponseStyle, Topic};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Default reply size bound
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Fixed request parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionSettings {
    /// Model identifier
    pub model: String,
    /// Maximum tokens in a reply
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// What the router did with a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Off-topic; a guidance turn naming this topic was appended
    Guided(Topic),
    /// The backend replied and the reply was appended
    Replied,
    /// The backend failed; an `Error: ` turn with this description was appended
    Failed(String),
}

/// Guard + dispatch for user messages
pub struct MessageRouter<B: CompletionBackend> {
    backend: B,
    settings: CompletionSettings,
}

impl<B: CompletionBackend> MessageRouter<B> {
    /// Create a router over `backend`
    pub fn new(backend: B, settings: CompletionSettings) -> Self {
        Self { backend, settings }
    }

    /// The backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The fixed request parameters
    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Build the request for the session's current transcript
    #[must_use]
    pub fn build_request(&self, session: &Session, style: ResponseStyle) -> CompletionRequest {
        CompletionRequest::new(
            self.settings.model.clone(),
            session.transcript().messages().to_vec(),
        )
        .with_temperature(style.temperature())
        .with_max_tokens(self.settings.max_tokens)
    }

    /// Route one user message
    ///
    /// Appends the user turn and exactly one assistant turn. The backend is
    /// called at most once.
    pub async fn route(
        &self,
        session: &mut Session,
        user_text: &str,
        style: ResponseStyle,
    ) -> RouteOutcome {
        push_turn(session, Message::user(user_text));

        if let GuardDecision::OffTopic(topic) = TopicGuard::new(session.topic()).check(user_text) {
            tracing::debug!(active = %session.topic(), mentioned = %topic, "Off-topic message");
            push_turn(session, Message::assistant(guidance_message(topic)));
            return RouteOutcome::Guided(topic);
        }

        let request = self.build_request(session, style);
        match self.backend.complete(&request).await {
            Ok(reply) => {
                tracing::debug!(
                    backend = self.backend.name(),
                    chars = reply.len(),
                    "Completion received"
                );
                push_turn(session, Message::assistant(reply));
                RouteOutcome::Replied
            }
            Err(e) => {
                let description = e.to_string();
                tracing::warn!(backend = self.backend.name(), error = %description, "Completion failed");
                push_turn(session, Message::assistant(format!("Error: {description}")));
                RouteOutcome::Failed(description)
            }
        }
    }
}

/// Append a user or assistant turn
///
/// Only system messages can be refused by the transcript, and the router
/// never creates one.
fn push_turn(session: &mut Session, message: Message) {
    if let Err(e) = session.append(message) {
        tracing::error!(error = %e, "Transcript rejected message");
    }
}
