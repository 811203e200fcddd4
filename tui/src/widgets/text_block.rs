//! TextBlock Widget
//!
//! A borderless text region. Source lines are wrapped to the area width;
//! blank source lines are kept as paragraph breaks. Lines that do not fit
//! the area height are cut off.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Wrap `content` to `width`, one output entry per screen line
pub fn wrap_lines(content: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    content
        .lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.into_owned())
                    .collect()
            }
        })
        .collect()
}

/// A borderless, wrapped text block
pub struct TextBlock<'a> {
    content: &'a str,
}

impl<'a> TextBlock<'a> {
    /// Create a block over `content`
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Screen lines needed to show `content` at `width`
    pub fn height_for(content: &str, width: u16) -> u16 {
        u16::try_from(wrap_lines(content, usize::from(width)).len()).unwrap_or(u16::MAX)
    }
}

impl Widget for TextBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let wrapped = wrap_lines(self.content, usize::from(area.width));
        for (y, line) in (area.y..area.bottom()).zip(&wrapped) {
            buf.set_string(area.x, y, line, Style::default());
        }
    }
}
