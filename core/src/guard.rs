//! Topic Guard
//!
//! Keeps a conversation on its topic. The check is a plain case-insensitive
//! substring test of every *other* topic's display name against the user's
//! text; it does not try to understand intent, so "I don't use C++" in a
//! Python session is still sent back with guidance to switch to C++.
//!
//! When several inactive topics are mentioned, the first one in
//! [`Topic::ALL`] order wins, regardless of where it appears in the text.

use crate::topic::Topic;

/// Outcome of a guard check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// No inactive topic is mentioned; forward the message
    OnTopic,
    /// The message mentions an inactive topic
    OffTopic(Topic),
}

/// Keyword guard for one active topic
#[derive(Clone, Copy, Debug)]
pub struct TopicGuard {
    active: Topic,
}

impl TopicGuard {
    /// Create a guard for the active topic
    #[must_use]
    pub fn new(active: Topic) -> Self {
        Self { active }
    }

    /// Check a message
    ///
    /// Pure function of the active topic and the text.
    #[must_use]
    pub fn check(&self, text: &str) -> GuardDecision {
        let haystack = text.to_lowercase();
        self.active
            .others()
            .find(|topic| haystack.contains(&topic.display_name().to_lowercase()))
            .map_or(GuardDecision::OnTopic, GuardDecision::OffTopic)
    }
}

/// Assistant reply telling the user to switch to `topic`
#[must_use]
pub fn guidance_message(topic: Topic) -> String {
    format!(
        "It looks like you're asking about another language. \
         Please change your selection in the topic selector to **{topic}**."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_topic_message() {
        let guard = TopicGuard::new(Topic::Python);
        assert_eq!(guard.check("how do I reverse a list?"), GuardDecision::OnTopic);
    }

    #[test]
    fn test_active_topic_name_is_allowed() {
        let guard = TopicGuard::new(Topic::Python);
        assert_eq!(guard.check("Python decorators?"), GuardDecision::OnTopic);
    }

    #[test]
    fn test_off_topic_case_insensitive() {
        let guard = TopicGuard::new(Topic::Python);
        assert_eq!(
            guard.check("how do I blink an LED with ARDUINO?"),
            GuardDecision::OffTopic(Topic::Arduino)
        );
        assert_eq!(
            guard.check("setting up a raspberry pi"),
            GuardDecision::OffTopic(Topic::RaspberryPi)
        );
    }

    #[test]
    fn test_negation_still_triggers() {
        let guard = TopicGuard::new(Topic::Python);
        assert_eq!(
            guard.check("I don't use C++"),
            GuardDecision::OffTopic(Topic::Cpp)
        );
    }

    #[test]
    fn test_enumeration_order_tie_break() {
        let guard = TopicGuard::new(Topic::Python);
        // Raspberry Pi appears first in the text, but C++ comes first in Topic::ALL
        let text = "Raspberry Pi or Arduino, or maybe C++?";
        for _ in 0..3 {
            assert_eq!(guard.check(text), GuardDecision::OffTopic(Topic::Cpp));
        }
    }

    #[test]
    fn test_empty_message_is_on_topic() {
        for topic in Topic::ALL {
            assert_eq!(TopicGuard::new(topic).check(""), GuardDecision::OnTopic);
        }
    }

    #[test]
    fn test_guidance_names_topic() {
        let text = guidance_message(Topic::RaspberryPi);
        assert!(text.contains("**Raspberry Pi**"));
        assert!(text.starts_with("It looks like you're asking about another language."));
    }
}
