//! Reusable widgets for the confab TUI.

mod sidebar;
mod status_bar;
mod text_input;
mod transcript;

pub use sidebar::Sidebar;
pub use status_bar::{KeyHint, StatusBar};
pub use text_input::TextInputState;
pub use transcript::Transcript;
