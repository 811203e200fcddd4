//! Session Management
//!
//! A [`Session`] pairs the active [`Topic`] with the [`Transcript`] of the
//! conversation about it. Switching to a different topic throws the
//! transcript away and starts over with a fresh welcome; there is no
//! archive of earlier conversations.
//!
//! One session exists per UI session. It lives in memory only.

use thiserror::Error;

use crate::messages::{Message, MessageRole};
use crate::topic::Topic;

/// Fixed instructions placed at the head of every transcript
pub const SYSTEM_PROMPT: Option<&str> = Some(
    "You are BotsRig Programmer, a programming assistant for Python, C++, \
     Arduino and Raspberry Pi. Answer only in the language the user has \
     selected, with short explanations and complete code examples.",
);

/// Errors from transcript mutation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    /// A system message may only open the transcript
    #[error("system message must be the first message in the transcript")]
    SystemMessageNotFirst,
}

/// Ordered conversation history
///
/// Holds at most one system message, and only at index 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::SystemMessageNotFirst`] when a system
    /// message is appended to a non-empty transcript.
    pub fn push(&mut self, message: Message) -> Result<(), TranscriptError> {
        if message.role() == MessageRole::System && !self.messages.is_empty() {
            return Err(TranscriptError::SystemMessageNotFirst);
        }
        self.messages.push(message);
        Ok(())
    }

    /// All messages in conversation order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The system message, if the transcript has one
    #[must_use]
    pub fn system_message(&self) -> Option<&Message> {
        self.messages
            .first()
            .filter(|m| m.role() == MessageRole::System)
    }

    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Welcome shown when the session first starts
#[must_use]
pub fn welcome_message(topic: Topic) -> String {
    format!("Welcome! I'm a programming assistant for **{topic}**. Ask me anything related to it.")
}

/// Welcome shown after a topic switch
#[must_use]
pub fn switched_message(topic: Topic) -> String {
    format!("You switched to **{topic}**. Let's work on that!")
}

/// The active topic and its conversation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    topic: Topic,
    system_prompt: Option<&'static str>,
    transcript: Transcript,
}

impl Session {
    /// Start a session on `topic`
    ///
    /// The transcript opens with `system_prompt` (if any) followed by a
    /// welcome message naming the topic.
    #[must_use]
    pub fn initialize(topic: Topic, system_prompt: Option<&'static str>) -> Self {
        tracing::debug!(topic = %topic, "Session initialized");
        Self {
            topic,
            system_prompt,
            transcript: fresh_transcript(system_prompt, welcome_message(topic)),
        }
    }

    /// Make `new_topic` active
    ///
    /// Switching to the active topic changes nothing. Any other topic
    /// replaces the whole transcript. Returns whether a switch happened.
    pub fn switch_topic(&mut self, new_topic: Topic) -> bool {
        if new_topic == self.topic {
            return false;
        }

        tracing::info!(
            from = %self.topic,
            to = %new_topic,
            discarded = self.transcript.len(),
            "Topic switched, transcript reset"
        );
        self.transcript = fresh_transcript(self.system_prompt, switched_message(new_topic));
        self.topic = new_topic;
        true
    }

    /// Append a message to the transcript
    ///
    /// # Errors
    ///
    /// See [`Transcript::push`].
    pub fn append(&mut self, message: Message) -> Result<(), TranscriptError> {
        self.transcript.push(message)
    }

    /// The active topic
    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// The conversation so far
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

fn fresh_transcript(system_prompt: Option<&str>, welcome: String) -> Transcript {
    let mut messages = Vec::with_capacity(2);
    if let Some(prompt) = system_prompt {
        messages.push(Message::system(prompt));
    }
    messages.push(Message::assistant(welcome));
    Transcript { messages }
}
