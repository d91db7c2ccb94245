//! confab-tui: Terminal UI for the confab chat client
//!
//! This crate provides the TUI layer:
//! - The chat screen (sidebar, transcript, input bar, status bar)
//! - Event handling and the main loop
//! - Spawned completion requests, polled without blocking input

mod app;
mod event;
mod screens;
#[cfg(test)]
mod test_utils;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, Focus};
pub use event::{Action, Event, EventHandler};

use confab_engine::{ClientError, CompletionClient, Config};
use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// on exit.
pub async fn run_tui(
    config: &Config,
    client: CompletionClient,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.greeting.clone(), client.model().to_string());

    // 4 Hz tick rate drives the spinner and keeps polling cheap
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, &client).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    client: &CompletionClient,
) -> Result<(), Box<dyn std::error::Error>> {
    // In-flight completion requests. Input stays live while these run, so
    // several can be outstanding at once; replies apply in arrival order.
    let mut completion_handles: Vec<tokio::task::JoinHandle<Result<String, ClientError>>> =
        Vec::new();

    loop {
        // Draw
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            screens::chat::ChatScreen.render(app, area, buf);

            if app.show_help {
                screens::render_help_overlay(area, buf);
            }
        })?;

        // Check for completed requests (non-blocking)
        let mut completed = Vec::new();
        for (i, handle) in completion_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            match completion_handles.remove(i).await {
                Ok(result) => app.apply_completion(result),
                Err(err) => {
                    tracing::warn!(error = %err, "completion task aborted");
                    app.pending_requests = app.pending_requests.saturating_sub(1);
                }
            }
        }

        // Handle events
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    // Text entry first when the input bar has focus
                    if app.focus == Focus::Input
                        && !app.show_help
                        && handle_input_key(app, key, client, &mut completion_handles)
                    {
                        continue;
                    }
                    let action = event::key_to_action(key);
                    app.handle_action(action);
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::Up),
                        MouseEventKind::ScrollDown => app.handle_action(Action::Down),
                        _ => {}
                    }
                }
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            for handle in completion_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Handle key input for the message box.
///
/// Returns true if the key was consumed (should not be processed as an
/// action).
fn handle_input_key(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    client: &CompletionClient,
    completion_handles: &mut Vec<tokio::task::JoinHandle<Result<String, ClientError>>>,
) -> bool {
    use crossterm::event::{KeyCode, KeyModifiers};

    // Ctrl+J inserts a newline
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('j') {
        app.input_state.insert('\n');
        return true;
    }

    // Other control chords (Ctrl+C, Ctrl+N) go to the action handler
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        // Keys that should be handled as actions
        KeyCode::Esc | KeyCode::Tab => false,

        // Enter submits and fires the completion request
        KeyCode::Enter => {
            if let Some(history) = app.submit_message() {
                app.pending_requests += 1;
                let client = client.clone();
                let handle =
                    tokio::spawn(async move { client.complete(&history).await });
                completion_handles.push(handle);
            }
            true
        }

        // Text input
        KeyCode::Char(c) => {
            app.input_state.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input_state.backspace();
            true
        }
        KeyCode::Delete => {
            app.input_state.delete();
            true
        }
        KeyCode::Left => {
            app.input_state.move_left();
            true
        }
        KeyCode::Right => {
            app.input_state.move_right();
            true
        }
        KeyCode::Home => {
            app.input_state.move_home();
            true
        }
        KeyCode::End => {
            app.input_state.move_end();
            true
        }
        KeyCode::Up => {
            // History navigation when the input is empty
            if app.input_state.is_empty() {
                app.input_state.history_prev();
                true
            } else {
                false // Let the action handler scroll the transcript
            }
        }
        KeyCode::Down => {
            if app.input_state.is_empty() {
                app.input_state.history_next();
                true
            } else {
                false
            }
        }

        _ => false,
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
