//! Conductor - Per-Session Orchestration
//!
//! The Conductor owns everything one UI session needs: the [`Session`], the
//! selected [`ResponseStyle`], and the [`MessageRouter`]. A surface talks to
//! it through three calls, one per UI control:
//!
//! - [`Conductor::select_topic`] for the topic selector
//! - [`Conductor::select_style`] for the response-style selector
//! - [`Conductor::submit`] for the chat input
//!
//! Each call mutates state and returns; rendering is the surface's next step.

use crate::backend::CompletionBackend;
use crate::config::AppConfig;
use crate::router::{CompletionSettings, MessageRouter, RouteOutcome};
use crate::session::{Session, SYSTEM_PROMPT};
use crate::topic::{ResponseStyle, Topic};

/// The Conductor - one per UI session
pub struct Conductor<B: CompletionBackend> {
    /// Current session
    session: Session,
    /// Selected temperature preset
    style: ResponseStyle,
    /// Guard + backend dispatch
    router: MessageRouter<B>,
}

impl<B: CompletionBackend> Conductor<B> {
    /// Create a Conductor with an initialized session
    pub fn new(
        router: MessageRouter<B>,
        topic: Topic,
        style: ResponseStyle,
        system_prompt: Option<&'static str>,
    ) -> Self {
        Self {
            session: Session::initialize(topic, system_prompt),
            style,
            router,
        }
    }

    /// Create a Conductor from loaded configuration
    pub fn from_config(backend: B, config: &AppConfig) -> Self {
        let settings = CompletionSettings {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        };
        Self::new(
            MessageRouter::new(backend, settings),
            config.default_topic,
            config.default_style,
            SYSTEM_PROMPT,
        )
    }

    /// Switch the active topic; returns whether the transcript was reset
    pub fn select_topic(&mut self, topic: Topic) -> bool {
        self.session.switch_topic(topic)
    }

    /// Change the response style; the transcript is kept
    pub fn select_style(&mut self, style: ResponseStyle) {
        if style != self.style {
            tracing::debug!(style = %style, "Response style changed");
            self.style = style;
        }
    }

    /// Handle one user message
    pub async fn submit(&mut self, text: &str) -> RouteOutcome {
        self.router.route(&mut self.session, text, self.style).await
    }

    /// The current session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The active topic
    pub fn topic(&self) -> Topic {
        self.session.topic()
    }

    /// The selected response style
    pub fn style(&self) -> ResponseStyle {
        self.style
    }

    /// The router (and through it, the backend)
    pub fn router(&self) -> &MessageRouter<B> {
        &self.router
    }
}
