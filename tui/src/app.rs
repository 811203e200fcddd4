//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin client of the
//! [`Conductor`]:
//!
//! 1. Terminal key events are translated to [`Action`]s
//! 2. Actions are applied to the Conductor (topic, style, submit)
//! 3. The frame is redrawn from the Conductor's session
//!
//! A submit is handled inline: the busy state is drawn, the completion call
//! is awaited, and the next key is read only after the reply is on screen.

use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use ratatui::{Frame, Terminal};
use unicode_width::UnicodeWidthChar;

use botsrig_core::{CompletionBackend, Conductor, ResponseStyle, RouteOutcome, Topic};

use crate::display::{conversation_lines, Viewport};
use crate::theme::{BOTSRIG_ORANGE, DIM_GRAY, SIDEBAR_HEADER, THINKING_YELLOW, USER_GREEN};
use crate::widgets::{wrap_lines, TextBlock};

/// Page title
pub const TITLE: &str = "BotsRig Programmer";

/// Intro paragraph under the title
pub const INTRO: &str = "This assistant is optimized for programming help in \
Python, C++, Arduino, and Raspberry Pi.\nChoose your programming language from \
the sidebar. All responses will be generated in that language only.";

/// Input hint shown while the input is empty
pub const PLACEHOLDER: &str = "Ask your programming question...";

/// Busy indicator
pub const THINKING: &str = "Thinking...";

/// Sidebar width (columns)
const SIDEBAR_WIDTH: u16 = 30;

/// Input box height (lines), separator included
const INPUT_HEIGHT: u16 = 4;

// ============================================================================
// Actions
// ============================================================================

/// What a keypress asks the App to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Select the next topic
    NextTopic,
    /// Select the previous topic
    PreviousTopic,
    /// Select the next response style
    CycleStyle,
    /// Send the input buffer
    Submit,
    /// Type a character
    Input(char),
    /// Delete the last character
    Backspace,
    /// Scroll the conversation towards older lines
    ScrollUp,
    /// Scroll the conversation towards newer lines
    ScrollDown,
    /// Leave the app
    Quit,
}

impl Action {
    /// Translate a key event; `None` for unbound keys
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let action = match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
            KeyCode::Char(c) => Action::Input(c),
            KeyCode::Tab => Action::NextTopic,
            KeyCode::BackTab => Action::PreviousTopic,
            KeyCode::F(2) => Action::CycleStyle,
            KeyCode::Enter => Action::Submit,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::PageUp => Action::ScrollUp,
            KeyCode::PageDown => Action::ScrollDown,
            _ => return None,
        };
        Some(action)
    }
}

// ============================================================================
// App
// ============================================================================

/// Main application state
pub struct App<B: CompletionBackend> {
    /// Is the app still running?
    running: bool,
    /// Session orchestration
    conductor: Conductor<B>,
    /// User input buffer
    input_buffer: String,
    /// A completion call is in flight
    busy: bool,
    /// Scroll offset (lines from bottom, 0 = latest)
    scroll_offset: usize,
    /// Conversation pane height at the last draw
    conversation_height: usize,
}

impl<B: CompletionBackend> App<B> {
    /// Create a new App over `conductor`
    pub fn new(conductor: Conductor<B>) -> Self {
        Self {
            running: true,
            conductor,
            input_buffer: String::new(),
            busy: false,
            scroll_offset: 0,
            conversation_height: 0,
        }
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Fails when the terminal cannot be read or drawn.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            let Some(event) = event_stream.next().await else {
                break;
            };

            match event? {
                // Only handle Press events (not Release or Repeat)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = Action::from_key(key) {
                        self.dispatch(action, terminal).await?;
                    }
                }
                Event::Resize(..) => {}
                _ => continue,
            }

            self.render(terminal)?;
        }

        tracing::debug!("Event loop finished");
        Ok(())
    }

    /// Apply one action, drawing the busy state before a completion call
    async fn dispatch(
        &mut self,
        action: Action,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        if action != Action::Submit {
            self.apply(action);
            return Ok(());
        }
        if let Some(text) = self.begin_submit() {
            self.render(terminal)?;
            self.finish_submit(&text).await;
        }
        Ok(())
    }

    /// Apply every action except [`Action::Submit`]
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::NextTopic => self.select_topic(self.conductor.topic().next()),
            Action::PreviousTopic => self.select_topic(self.conductor.topic().previous()),
            Action::CycleStyle => self.conductor.select_style(self.conductor.style().next()),
            Action::Input(c) => self.input_buffer.push(c),
            Action::Backspace => {
                self.input_buffer.pop();
            }
            Action::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_add(self.page_size());
            }
            Action::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(self.page_size());
            }
            Action::Quit => self.running = false,
            Action::Submit => tracing::warn!("Submit must go through begin_submit"),
        }
    }

    /// Take the input for sending and enter the busy state
    ///
    /// Returns `None` (and stays idle) when the input is empty.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.input_buffer.is_empty() {
            return None;
        }
        self.busy = true;
        self.scroll_offset = 0;
        Some(std::mem::take(&mut self.input_buffer))
    }

    /// Hand `text` to the Conductor and leave the busy state
    pub async fn finish_submit(&mut self, text: &str) -> RouteOutcome {
        let outcome = self.conductor.submit(text).await;
        self.busy = false;
        self.scroll_offset = 0;
        outcome
    }

    fn select_topic(&mut self, topic: Topic) {
        if self.conductor.select_topic(topic) {
            self.scroll_offset = 0;
        }
    }

    fn page_size(&self) -> usize {
        (self.conversation_height / 2).max(1)
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Is a completion call in flight?
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Current input buffer
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// The Conductor behind this App
    pub fn conductor(&self) -> &Conductor<B> {
        &self.conductor
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    /// Draw one frame
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .areas(frame.area());
        self.draw_sidebar(frame, sidebar);

        let main = main.inner(Margin::new(1, 0));
        let intro_height = TextBlock::height_for(INTRO, main.width);
        let [title, intro, _, conversation, input, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(intro_height),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(main);

        let buf = frame.buffer_mut();
        buf.set_string(
            title.x,
            title.y,
            TITLE,
            Style::default().fg(BOTSRIG_ORANGE).add_modifier(Modifier::BOLD),
        );
        TextBlock::new(INTRO).render(intro, buf);
        self.draw_conversation(buf, conversation);
        self.draw_input(buf, input);
        self.draw_status(buf, status);
    }

    fn draw_sidebar(&self, frame: &mut Frame<'_>, area: Rect) {
        let header = Style::default().fg(SIDEBAR_HEADER).add_modifier(Modifier::BOLD);
        let hint = Style::default().fg(DIM_GRAY);
        let selected = Style::default().fg(BOTSRIG_ORANGE).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::styled("Configuration", header),
            Line::default(),
            Line::raw("Select Programming Language"),
            Line::styled("(Tab / Shift-Tab)", hint),
        ];
        for topic in Topic::ALL {
            lines.push(if topic == self.conductor.topic() {
                Line::styled(format!("> {topic}"), selected)
            } else {
                Line::raw(format!("  {topic}"))
            });
        }

        lines.extend([
            Line::default(),
            Line::raw("Select Response Style"),
            Line::styled("(F2)", hint),
        ]);
        for style in ResponseStyle::ALL {
            lines.push(if style == self.conductor.style() {
                Line::styled(format!("(*) {}", style.label()), selected)
            } else {
                Line::raw(format!("( ) {}", style.label()))
            });
        }

        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(area);
        let body = body.inner(Margin::new(1, 0));
        frame.render_widget(Paragraph::new(lines), body);
        frame.render_widget(
            Paragraph::new(vec![
                Line::styled("-".repeat(usize::from(footer.width)), hint),
                Line::styled(" Built by BotsRig.com", hint),
            ]),
            footer,
        );
    }

    fn draw_conversation(&mut self, buf: &mut Buffer, area: Rect) {
        let width = usize::from(area.width);
        let height = usize::from(area.height);
        self.conversation_height = height;
        if width < 10 || height == 0 {
            return;
        }

        let all_lines = conversation_lines(self.conductor.session().transcript(), width);
        let viewport = Viewport::new(all_lines.len(), height, self.scroll_offset);
        self.scroll_offset = viewport.scroll_offset;

        for (y, (line, style)) in (area.y..area.bottom()).zip(&all_lines[viewport.start..viewport.end]) {
            buf.set_string(area.x, y, fit_width(line, width), *style);
        }

        if viewport.has_content_above() {
            buf.set_string(
                area.right().saturating_sub(1),
                area.y,
                "^",
                Style::default().fg(DIM_GRAY),
            );
        }
    }

    fn draw_input(&self, buf: &mut Buffer, area: Rect) {
        let separator = "-".repeat(usize::from(area.width));
        buf.set_string(area.x, area.y, &separator, Style::default().fg(DIM_GRAY));

        let text_height = usize::from(area.height.saturating_sub(1));
        let text_width = usize::from(area.width.saturating_sub(1));
        if text_width < 5 || text_height == 0 {
            return;
        }

        if self.input_buffer.is_empty() {
            let style = Style::default().fg(DIM_GRAY);
            buf.set_string(area.x, area.y + 1, fit_width(PLACEHOLDER, text_width), style);
            return;
        }

        let full_input = format!("> {}_", self.input_buffer);
        let wrapped = wrap_lines(&full_input, text_width);
        let skip = wrapped.len().saturating_sub(text_height);
        for (y, line) in (area.y + 1..area.bottom()).zip(wrapped.iter().skip(skip)) {
            buf.set_string(area.x, y, line, Style::default().fg(USER_GREEN));
        }
    }

    fn draw_status(&self, buf: &mut Buffer, area: Rect) {
        if self.busy {
            buf.set_string(area.x, area.y, THINKING, Style::default().fg(THINKING_YELLOW));
            return;
        }

        let scroll_info = if self.scroll_offset > 0 {
            format!(" [^{} lines - PgDn to scroll]", self.scroll_offset)
        } else {
            String::new()
        };
        let status = format!(
            "{} | {} | Enter send | Esc quit{}",
            self.conductor.topic(),
            self.conductor.style().label(),
            scroll_info
        );
        buf.set_string(
            area.x,
            area.y,
            fit_width(&status, usize::from(area.width)),
            Style::default().fg(DIM_GRAY),
        );
    }
}

/// Cut `line` to at most `width` display columns
fn fit_width(line: &str, width: usize) -> String {
    let mut used = 0;
    line.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
