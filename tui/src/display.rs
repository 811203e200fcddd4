//! Display State Types
//!
//! Converts a [`Transcript`] into styled screen lines for the conversation
//! pane. Everything here is pure so it can be tested without a terminal.
//!
//! - System messages are never shown
//! - Assistant turns starting with `Error: ` get the error style
//! - Markdown bold markers wrapping a word or phrase (`**Python**`) are
//!   dropped; the terminal has no bold text inside a single styled line.
//!   Code spans, code fences and operators like `**kwargs` or `2**8` are
//!   shown as written

use botsrig_core::{MessageRole, Transcript};
use ratatui::style::Style;

use crate::theme::{ASSISTANT_BLUE, ERROR_RED, USER_GREEN};
use crate::widgets::wrap_lines;

/// Display role for messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayRole {
    /// User input
    User,
    /// Assistant reply, welcome or guidance
    Assistant,
    /// Assistant turn reporting a failed call
    Error,
}

impl DisplayRole {
    /// Line prefix for this role
    pub fn prefix(self) -> &'static str {
        match self {
            DisplayRole::User => "You: ",
            DisplayRole::Assistant | DisplayRole::Error => "Assistant: ",
        }
    }

    /// Text style for this role
    pub fn style(self) -> Style {
        match self {
            DisplayRole::User => Style::default().fg(USER_GREEN),
            DisplayRole::Assistant => Style::default().fg(ASSISTANT_BLUE),
            DisplayRole::Error => Style::default().fg(ERROR_RED),
        }
    }
}

/// A transcript entry as it will be shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Who sent this message
    pub role: DisplayRole,
    /// Content with markdown emphasis removed
    pub content: String,
}

/// The visible messages of a transcript, in order
pub fn display_messages(transcript: &Transcript) -> Vec<DisplayMessage> {
    transcript
        .messages()
        .iter()
        .filter_map(|msg| {
            let role = match msg.role() {
                MessageRole::System => return None,
                MessageRole::User => DisplayRole::User,
                MessageRole::Assistant if msg.content().starts_with("Error: ") => {
                    DisplayRole::Error
                }
                MessageRole::Assistant => DisplayRole::Assistant,
            };
            Some(DisplayMessage {
                role,
                content: strip_bold(msg.content()),
            })
        })
        .collect()
}

/// Remove `**` emphasis markers outside code
///
/// Text inside backtick spans and ``` fences is untouched.
pub fn strip_bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_fence = false;

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push_str(line);
            continue;
        }
        if in_fence {
            out.push_str(line);
            continue;
        }
        // Odd segments sit between backticks
        for (j, segment) in line.split('`').enumerate() {
            if j > 0 {
                out.push('`');
            }
            if j % 2 == 1 {
                out.push_str(segment);
            } else {
                out.push_str(&strip_bold_segment(segment));
            }
        }
    }
    out
}

fn strip_bold_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    let mut prev: Option<char> = None;

    while let Some(open) = rest.find("**") {
        let before = rest[..open].chars().next_back().or(prev);
        let body = &rest[open + 2..];
        if let Some(end) = bold_span(before, body) {
            out.push_str(&rest[..open]);
            out.push_str(&body[..end]);
            prev = body[..end].chars().next_back();
            rest = &body[end + 2..];
        } else {
            out.push_str(&rest[..open + 2]);
            prev = Some('*');
            rest = body;
        }
    }
    out.push_str(rest);
    out
}

/// Length of the emphasized text if `body` (after an opening `**`) holds a
/// well-formed `**...**` span
fn bold_span(before: Option<char>, body: &str) -> Option<usize> {
    let is_word = |c: char| c.is_alphanumeric() || c == '*' || c == '_';
    if before.is_some_and(is_word) {
        return None;
    }
    let first = body.chars().next()?;
    if first.is_whitespace() || first == '*' {
        return None;
    }
    let end = body.find("**")?;
    let last = body[..end].chars().next_back()?;
    if last.is_whitespace() || body[end + 2..].chars().next().is_some_and(is_word) {
        return None;
    }
    Some(end)
}

/// Wrapped, styled lines for the conversation pane
///
/// Each message is followed by one blank line.
pub fn conversation_lines(transcript: &Transcript, width: usize) -> Vec<(String, Style)> {
    let mut all_lines = Vec::new();
    for msg in display_messages(transcript) {
        let style = msg.role.style();
        let content = format!("{}{}", msg.role.prefix(), msg.content);
        all_lines.extend(wrap_lines(&content, width).into_iter().map(|line| (line, style)));
        all_lines.push((String::new(), Style::default()));
    }
    all_lines
}

/// The slice of lines visible in a pane of `height` lines
///
/// `scroll_offset` counts lines up from the bottom (0 = newest) and is
/// clamped to the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line
    pub start: usize,
    /// One past the last visible line
    pub end: usize,
    /// Scroll offset after clamping
    pub scroll_offset: usize,
}

impl Viewport {
    /// Compute the visible range
    pub fn new(total_lines: usize, height: usize, scroll_offset: usize) -> Self {
        let max_scroll = total_lines.saturating_sub(height);
        let scroll_offset = scroll_offset.min(max_scroll);
        let end = total_lines - scroll_offset;
        Self {
            start: end.saturating_sub(height),
            end,
            scroll_offset,
        }
    }

    /// Whether older lines are hidden above
    pub fn has_content_above(&self) -> bool {
        self.start > 0
    }
}

#[cfg(test)]
mod tests {
    use botsrig_core::Message;
    use pretty_assertions::assert_eq;

    use super::*;

    fn transcript(messages: Vec<Message>) -> Transcript {
        let mut transcript = Transcript::new();
        for message in messages {
            transcript.push(message).unwrap();
        }
        transcript
    }

    #[test]
    fn test_system_message_hidden() {
        let transcript = transcript(vec![
            Message::system("rules"),
            Message::assistant("Welcome! I'm a programming assistant for **Python**."),
        ]);

        let messages = display_messages(&transcript);
        assert_eq!(
            messages,
            vec![DisplayMessage {
                role: DisplayRole::Assistant,
                content: "Welcome! I'm a programming assistant for Python.".to_string(),
            }]
        );
    }

    #[test]
    fn test_code_stars_preserved() {
        let transcript = transcript(vec![Message::assistant(
            "def f(*args, **kwargs): return 2**8",
        )]);

        let messages = display_messages(&transcript);
        assert_eq!(messages[0].content, "def f(*args, **kwargs): return 2**8");
    }

    #[test]
    fn test_strip_bold() {
        assert_eq!(
            strip_bold("Please switch to **Raspberry Pi**."),
            "Please switch to Raspberry Pi."
        );
        assert_eq!(strip_bold("You switched to **C++**. Go"), "You switched to C++. Go");
        assert_eq!(strip_bold("call `f(**opts)` or **this**"), "call `f(**opts)` or this");
        assert_eq!(
            strip_bold("Try:\n```python\nprint(**kw)\nx = **y**\n```\n**done**"),
            "Try:\n```python\nprint(**kw)\nx = **y**\n```\ndone"
        );
        assert_eq!(strip_bold("a ** b ** c"), "a ** b ** c");
    }

    #[test]
    fn test_error_turn_styled() {
        let transcript = transcript(vec![
            Message::user("what is RAII?"),
            Message::assistant("Error: request failed: connection refused"),
        ]);

        let roles: Vec<_> = display_messages(&transcript).iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![DisplayRole::User, DisplayRole::Error]);
    }

    #[test]
    fn test_conversation_lines_prefix_and_spacing() {
        let transcript = transcript(vec![Message::user("hi"), Message::assistant("hello")]);

        let lines: Vec<String> = conversation_lines(&transcript, 40)
            .into_iter()
            .map(|(line, _)| line)
            .collect();
        assert_eq!(lines, vec!["You: hi", "", "Assistant: hello", ""]);
    }

    #[test]
    fn test_conversation_lines_wrap() {
        let transcript = transcript(vec![Message::user("how do I reverse a list")]);

        let lines = conversation_lines(&transcript, 12);
        assert!(lines.len() > 2);
        assert!(lines.iter().all(|(line, _)| line.chars().count() <= 12));
        assert_eq!(lines[0].1, DisplayRole::User.style());
    }

    #[test]
    fn test_viewport_follows_bottom() {
        let viewport = Viewport::new(30, 10, 0);
        assert_eq!((viewport.start, viewport.end), (20, 30));
        assert!(viewport.has_content_above());
    }

    #[test]
    fn test_viewport_clamps_scroll() {
        let viewport = Viewport::new(30, 10, 100);
        assert_eq!(viewport.scroll_offset, 20);
        assert_eq!((viewport.start, viewport.end), (0, 10));

        let short = Viewport::new(3, 10, 5);
        assert_eq!((short.start, short.end, short.scroll_offset), (0, 3, 0));
        assert!(!short.has_content_above());
    }
}
