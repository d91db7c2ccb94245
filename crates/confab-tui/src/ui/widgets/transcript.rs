//! Transcript widget rendering the active conversation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::{Styles, Symbols};
use confab_engine::{Message, Role};

/// Indent for wrapped continuation lines.
const CONTINUATION_INDENT: &str = "  ";

/// Scrollable view of the live message sequence.
pub struct Transcript<'a> {
    messages: &'a [Message],
    scroll: usize,
    pending: usize,
    tick: usize,
    focused: bool,
}

impl<'a> Transcript<'a> {
    /// Create a new transcript widget.
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            scroll: 0,
            pending: 0,
            tick: 0,
            focused: false,
        }
    }

    /// Set the scroll offset (clamped during render).
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the number of requests currently in flight.
    #[must_use]
    pub fn pending(mut self, pending: usize) -> Self {
        self.pending = pending;
        self
    }

    /// Set the tick counter driving the waiting spinner.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Set whether the chat pane has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Build the full line list, wrapped to the given width.
    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for msg in self.messages {
            let (prefix, style) = match msg.role {
                Role::User => ("You", Styles::user()),
                Role::Assistant => ("Assistant", Styles::assistant()),
            };

            // Leave room for the prefix on the first line
            let wrap_width = width.saturating_sub(prefix.len() + 2).max(10);
            let mut first = true;
            for paragraph in msg.content.lines() {
                if paragraph.is_empty() {
                    lines.push(Line::from(""));
                    continue;
                }
                for wrapped in textwrap::wrap(paragraph, wrap_width) {
                    if first {
                        lines.push(Line::from(vec![
                            Span::styled(format!("{prefix}: "), style),
                            Span::styled(wrapped.into_owned(), Styles::default()),
                        ]));
                        first = false;
                    } else {
                        lines.push(Line::from(Span::styled(
                            format!("{CONTINUATION_INDENT}{wrapped}"),
                            Styles::default(),
                        )));
                    }
                }
            }
            if first {
                // Empty message content still gets its prefix line
                lines.push(Line::from(Span::styled(format!("{prefix}:"), style)));
            }
            lines.push(Line::from(""));
        }

        if self.pending > 0 {
            let frame = Symbols::SPINNER[self.tick % Symbols::SPINNER.len()];
            lines.push(Line::from(Span::styled(
                format!("{frame} waiting for reply..."),
                Styles::dim(),
            )));
        }

        lines
    }
}

impl Widget for Transcript<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };

        let block = Block::default()
            .title(" Chat ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        let lines = self.build_lines(inner.width as usize);

        // Clamp the offset so scrolling past the end pins to the bottom
        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        let scroll = self.scroll.min(max_scroll);

        let visible: Vec<Line<'_>> = lines.into_iter().skip(scroll).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(transcript: Transcript<'_>) -> String {
        let backend = TestBackend::new(50, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_widget(transcript, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_transcript_renders_roles() {
        let messages = vec![
            Message::assistant("Hello! How can I assist you today?"),
            Message::user("What is a lifetime?"),
        ];
        let content = render_to_string(Transcript::new(&messages));
        assert!(content.contains("Assistant: Hello!"));
        assert!(content.contains("You: What is a lifetime?"));
    }

    #[test]
    fn test_transcript_wraps_long_messages() {
        let messages = vec![Message::user(
            "a message that is definitely longer than the pane width and must wrap",
        )];
        let content = render_to_string(Transcript::new(&messages));
        assert!(content.contains("You: a message"));
        assert!(content.contains("must wrap"));
    }

    #[test]
    fn test_transcript_waiting_indicator() {
        let messages = vec![Message::user("hi")];
        let content = render_to_string(Transcript::new(&messages).pending(1));
        assert!(content.contains("waiting for reply"));
    }

    #[test]
    fn test_transcript_scroll_pins_to_bottom() {
        let messages: Vec<Message> = (0..40).map(|i| Message::user(format!("msg {i}"))).collect();
        // A huge offset clamps instead of scrolling past the content
        let content = render_to_string(Transcript::new(&messages).scroll(usize::MAX));
        assert!(content.contains("msg 39"));
    }

    #[test]
    fn test_transcript_small_area_does_not_panic() {
        let messages = vec![Message::user("hi")];
        let backend = TestBackend::new(4, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_widget(Transcript::new(&messages), frame.area()))
            .unwrap();
    }
}
