//! The chat screen: sidebar, transcript, input bar, and status bar.

use crate::app::{App, Focus};
use crate::screens::Screen;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, Sidebar, StatusBar, Transcript};
use crate::ui::{chat_layout, main_layout};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Height of the input area including its border.
const INPUT_HEIGHT: u16 = 5;

/// The main chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);
        let (sidebar_area, chat_area) = chat_layout(main_area);

        // Sidebar
        Sidebar::new(app.session.conversations())
            .selected(app.sidebar_selected)
            .active(app.session.active_index())
            .focused(app.focus == Focus::Sidebar)
            .render(sidebar_area, buf);

        // Chat column: transcript above, input below
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(INPUT_HEIGHT)])
            .split(chat_area);

        Transcript::new(app.session.messages())
            .scroll(app.transcript_scroll)
            .pending(app.pending_requests)
            .tick(app.tick)
            .focused(app.focus == Focus::Input)
            .render(chunks[0], buf);

        render_input(app, chunks[1], buf);

        // Status bar
        let hints = vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("Tab", "Pane"),
            KeyHint::new("Ctrl+N", "New"),
            KeyHint::new("Ctrl+C", "Quit"),
        ];
        let right = if app.pending_requests > 0 {
            format!("{} pending · {}", app.pending_requests, app.model_name)
        } else {
            app.model_name.clone()
        };
        StatusBar::new("Chat").hints(hints).right(right).render(status_area, buf);
    }
}

/// Render the input bar with prompt and cursor.
fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let focused = app.focus == Focus::Input;
    let border_style = if focused {
        Styles::border_active()
    } else {
        Styles::border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Styles::default());

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height < 1 {
        return;
    }

    let prompt = "> ";
    let content = app.input_state.content();

    if content.is_empty() {
        let mut spans = vec![Span::styled(prompt, Styles::highlight())];
        if focused {
            spans.push(Span::styled("_", Styles::default()));
        } else {
            spans.push(Span::styled("Type a message...", Styles::dim()));
        }
        Paragraph::new(vec![Line::from(spans)]).render(inner, buf);
        return;
    }

    // Split around the cursor byte offset; both halves may span lines
    let cursor = app.input_state.cursor();
    let before = &content[..cursor];
    let after = &content[cursor..];

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = vec![Span::styled(prompt, Styles::highlight())];

    push_text(before, &mut lines, &mut current);
    if focused {
        current.push(Span::styled("█", Styles::default()));
    }
    push_text(after, &mut lines, &mut current);
    lines.push(Line::from(current));

    // Keep the cursor line in view
    let cursor_line = before.matches('\n').count();
    let height = inner.height as usize;
    let scroll = cursor_line.saturating_sub(height.saturating_sub(1));

    #[allow(clippy::cast_possible_truncation)]
    Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .render(inner, buf);
}

/// Append text to the current line, breaking on newlines with a hanging
/// indent matching the prompt.
fn push_text(text: &str, lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(Line::from(std::mem::take(current)));
            current.push(Span::raw("  "));
        }
        if !part.is_empty() {
            current.push(Span::styled(part.to_string(), Styles::default()));
        }
    }
}
