//! Sidebar widget listing saved conversations.
//!
//! ```text
//! ┌ Conversations ──────────┐
//! │                         │
//! │  ▸ Tell me about ferr…  │
//! │    How do I write a t…  │
//! │                         │
//! │  [Ctrl+N] New           │
//! └─────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::ui::theme::Styles;
use confab_engine::Conversation;

/// Sidebar listing saved conversation titles.
pub struct Sidebar<'a> {
    conversations: &'a [Conversation],
    selected: usize,
    active: Option<usize>,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    /// Create a new sidebar widget.
    pub fn new(conversations: &'a [Conversation]) -> Self {
        Self {
            conversations,
            selected: 0,
            active: None,
            focused: false,
        }
    }

    /// Set the cursor position.
    #[must_use]
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    /// Mark which entry the live session was loaded from.
    #[must_use]
    pub fn active(mut self, active: Option<usize>) -> Self {
        self.active = active;
        self
    }

    /// Set whether the sidebar has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let block = Block::default()
            .title(" Conversations ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 {
            return;
        }

        let mut lines: Vec<Line<'_>> = Vec::new();
        lines.push(Line::from(""));

        if self.conversations.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No saved conversations",
                Styles::dim(),
            )));
        }

        let max_title = (inner.width as usize).saturating_sub(5);
        for (index, convo) in self.conversations.iter().enumerate() {
            let cursor_here = self.focused && index == self.selected;
            let marker = if cursor_here { "▸ " } else { "  " };
            let style = if cursor_here {
                Styles::highlight()
            } else if self.active == Some(index) {
                Styles::user()
            } else {
                Styles::default()
            };

            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled(marker, style),
                Span::styled(truncate_to_width(&convo.title, max_title), style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("[Ctrl+N]", Styles::highlight()),
            Span::styled(" New", Styles::dim()),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Truncate a title to the given display width, appending an ellipsis
/// when anything was cut.
fn truncate_to_width(title: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in title.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
