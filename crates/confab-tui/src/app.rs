//! Application state and update logic for the confab TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use confab_engine::{ClientError, Message, Session};

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Input,
}

impl Focus {
    /// The other pane.
    pub fn toggle(self) -> Self {
        match self {
            Self::Sidebar => Self::Input,
            Self::Input => Self::Sidebar,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Which pane has focus.
    pub focus: Focus,

    /// The live conversation plus the saved list.
    pub session: Session,

    /// Text input state for the message box.
    pub input_state: TextInputState,

    /// Sidebar cursor position.
    pub sidebar_selected: usize,

    /// Number of completion requests currently in flight.
    ///
    /// Input stays live while requests are outstanding; replies append in
    /// arrival order to whatever session is active when they land.
    pub pending_requests: usize,

    /// Scroll offset for the transcript pane.
    pub transcript_scroll: usize,

    /// Model identifier shown in the status bar.
    pub model_name: String,

    /// Tick counter for the waiting spinner.
    pub tick: usize,
}

impl App {
    /// Create a new app instance.
    pub fn new(greeting: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            focus: Focus::default(),
            session: Session::new(greeting),
            input_state: TextInputState::new(),
            sidebar_selected: 0,
            pending_requests: 0,
            transcript_scroll: 0,
            model_name: model_name.into(),
            tick: 0,
        }
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            Action::NewConversation => {
                self.start_new_conversation();
                return;
            }
            Action::FocusNext => {
                self.focus = self.focus.toggle();
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_action(action),
            Focus::Input => self.handle_chat_action(action),
        }
    }

    fn handle_sidebar_action(&mut self, action: Action) {
        match action {
            Action::Up => {
                self.sidebar_selected = self.sidebar_selected.saturating_sub(1);
            }
            Action::Down => {
                if self.sidebar_selected + 1 < self.session.conversations().len() {
                    self.sidebar_selected += 1;
                }
            }
            Action::Select => {
                self.select_conversation(self.sidebar_selected);
            }
            Action::Back => {
                self.focus = Focus::Input;
            }
            _ => {}
        }
    }

    fn handle_chat_action(&mut self, action: Action) {
        match action {
            Action::Up => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
            }
            Action::Down => {
                self.transcript_scroll = self.transcript_scroll.saturating_add(1);
            }
            Action::Back => {
                self.focus = Focus::Sidebar;
            }
            _ => {}
        }
    }

    /// Submit the input buffer as a user message.
    ///
    /// Returns the full history to send to the completion endpoint, or
    /// `None` when the input was blank (the buffer is left untouched).
    pub fn submit_message(&mut self) -> Option<Vec<Message>> {
        if self.input_state.content().trim().is_empty() {
            return None;
        }

        let content = self.input_state.submit();
        self.session.record_user_message(content);
        if let Some(index) = self.session.active_index() {
            self.sidebar_selected = index;
        }
        self.scroll_transcript_to_bottom();

        Some(self.session.messages().to_vec())
    }

    /// Apply the outcome of a completion request.
    ///
    /// Failures are logged and otherwise swallowed; the session is left
    /// unchanged and no reply is appended.
    pub fn apply_completion(&mut self, result: Result<String, ClientError>) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        match result {
            Ok(reply) => {
                self.session.record_assistant_message(reply);
                self.scroll_transcript_to_bottom();
            }
            Err(err) => {
                tracing::warn!(error = %err, "completion request failed");
            }
        }
    }

    /// Load a saved conversation into the live session.
    pub fn select_conversation(&mut self, index: usize) {
        if self.session.select(index) {
            self.sidebar_selected = index;
            self.focus = Focus::Input;
            self.scroll_transcript_to_bottom();
        }
    }

    /// Commit the live session (if it has user messages) and start fresh.
    pub fn start_new_conversation(&mut self) {
        self.session.start_new();
        self.transcript_scroll = 0;
        self.focus = Focus::Input;
        let count = self.session.conversations().len();
        self.sidebar_selected = self.sidebar_selected.min(count.saturating_sub(1));
    }

    /// Scroll the transcript so the latest messages are visible.
    ///
    /// Sets a generous offset; rendering clamps it to the content.
    fn scroll_transcript_to_bottom(&mut self) {
        self.transcript_scroll = self.session.messages().len() * 4;
    }

    /// Increment the tick counter.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}
