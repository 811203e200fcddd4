//! BotsRig Core - Topic-Scoped Programming Assistant
//!
//! This crate holds the conversation logic behind the BotsRig Programmer,
//! independent of any UI framework. A surface (the TUI, a test harness)
//! drives it by selecting a topic and response style and submitting text.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                            │
//! │        topic selector · style selector · chat input           │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ select_topic / select_style / submit
//! ┌──────────────────────────────┼───────────────────────────────┐
//! │                          Conductor                            │
//! │  ┌─────────────┐   ┌────────────────┐   ┌──────────────────┐  │
//! │  │   Session   │◄──│ MessageRouter  │──►│ CompletionBackend│  │
//! │  │ (transcript)│   │ (topic guard)  │   │  (Groq / OpenAI) │  │
//! │  └─────────────┘   └────────────────┘   └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`messages`]: Role-tagged transcript messages
//! - [`topic`]: The four supported topics and the response-style presets
//! - [`session`]: Transcript ownership and topic-switch reset
//! - [`guard`]: Keyword check that keeps a conversation on its topic
//! - [`backend`]: Completion endpoint abstraction and HTTP client
//! - [`router`]: Guard + dispatch for one user message
//! - [`conductor`]: Per-UI-session owner of all of the above
//! - [`config`]: TOML and environment configuration
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod conductor;
pub mod config;
pub mod guard;
pub mod messages;
pub mod router;
pub mod session;
pub mod topic;

// Re-exports for convenience
pub use backend::{CompletionBackend, CompletionError, CompletionRequest, GroqBackend};
pub use conductor::Conductor;
pub use config::{
    default_config_path, load_config, load_config_from_path, AppConfig, ConfigError,
    ConfigSource,
};
pub use guard::{GuardDecision, TopicGuard};
pub use messages::{Message, MessageRole};
pub use router::{CompletionSettings, MessageRouter, RouteOutcome};
pub use session::{Session, Transcript, TranscriptError, SYSTEM_PROMPT};
pub use topic::{ResponseStyle, Topic};
