//! Test utilities for confab-tui rendering tests.

use crate::app::App;
use crate::screens::Screen as ScreenTrait;
use ratatui::{backend::TestBackend, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test app with the default greeting and model.
pub fn create_test_app() -> App {
    App::new("Hello! How can I assist you today?", "gpt-4o-mini")
}

/// Render a screen into a flat string of the buffer contents.
pub fn render_screen_to_string(screen: &dyn ScreenTrait, app: &App) -> String {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    let mut terminal = Terminal::new(backend).expect("failed to create test terminal");

    terminal
        .draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            screen.render(app, area, buf);
        })
        .expect("failed to draw screen");

    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
