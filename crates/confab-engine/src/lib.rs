//! confab-engine: Headless core for the confab chat client
//!
//! This crate provides everything underneath the TUI:
//! - Message and conversation types
//! - The in-memory conversation store and live session
//! - The chat-completion HTTP client
//! - Configuration

pub mod chat;
pub mod client;
pub mod config;
pub mod session;

// Re-export commonly used types
pub use chat::{Message, Role, DEFAULT_GREETING};
pub use client::{ClientError, CompletionClient};
pub use config::{Config, ConfigError};
pub use session::{Conversation, Session};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
