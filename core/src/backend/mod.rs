//! Completion Backend Integration
//!
//! This module provides access to a hosted chat-completion endpoint through a
//! common trait interface, so the router can be driven by the real HTTP
//! client or by a test double.
//!
//! # Available Backends
//!
//! - **Groq**: OpenAI-compatible `/chat/completions` endpoint (default)
//!
//! # Usage
//!
//! ```ignore
//! use botsrig_core::backend::{CompletionBackend, CompletionRequest, GroqBackend};
//!
//! let backend = GroqBackend::new(GROQ_API_URL, std::env::var("GROQ_API_KEY").ok())?;
//! let request = CompletionRequest::new("llama3-70b-8192", transcript.messages().to_vec());
//! let reply = backend.complete(&request).await?;
//! ```

mod groq;
mod traits;

pub use groq::{GroqBackend, GROQ_API_URL};
pub use traits::{CompletionBackend, CompletionError, CompletionRequest};
