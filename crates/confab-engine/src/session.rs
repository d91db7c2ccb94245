//! The live session and the saved-conversation store.
//!
//! Conversations live in memory only. The saved list is append-only and
//! addressed by position; the session remembers which saved entry (if any)
//! it was loaded from so that starting a new conversation commits back to
//! that entry instead of creating a duplicate.

use crate::chat::{Message, DEFAULT_GREETING};
use serde::{Deserialize, Serialize};

/// Number of characters of the first user message used for the title.
const TITLE_LEN: usize = 20;

/// A saved, titled sequence of chat messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Title derived from the first user message, truncated.
    pub title: String,
    /// Messages in the conversation, greeting first.
    pub messages: Vec<Message>,
}

/// The live conversation plus the saved list.
#[derive(Debug)]
pub struct Session {
    /// Saved conversations, append-only.
    conversations: Vec<Conversation>,
    /// The live message sequence. Always starts with the greeting.
    messages: Vec<Message>,
    /// Index of the saved entry the live sequence was loaded from.
    active_index: Option<usize>,
    /// Greeting inserted at the start of every fresh sequence.
    greeting: String,
}

impl Session {
    /// Create a session with a fresh greeting and an empty saved list.
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            conversations: Vec::new(),
            messages: vec![Message::assistant(greeting.clone())],
            active_index: None,
            greeting,
        }
    }

    /// The live message sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The saved conversations.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Which saved entry the live sequence corresponds to, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Whether any user message has been sent this session.
    pub fn has_user_messages(&self) -> bool {
        self.messages.len() > 1
    }

    /// Append a user message to the live sequence.
    ///
    /// The first user message of a session immediately materializes a saved
    /// entry titled from its content, and that entry becomes the active one.
    pub fn record_user_message(&mut self, content: impl Into<String>) {
        let content = content.into();
        let first = !self.has_user_messages();
        self.messages.push(Message::user(content.clone()));

        if first {
            self.conversations.push(Conversation {
                title: truncate_title(&content),
                messages: self.messages.clone(),
            });
            self.active_index = Some(self.conversations.len() - 1);
        }
    }

    /// Append an assistant reply to the live sequence.
    pub fn record_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Commit the live sequence and reset to a fresh greeting.
    ///
    /// A sequence holding only the greeting is discarded without touching
    /// the saved list. Otherwise it overwrites the entry it was loaded from,
    /// or is appended as a new entry when none is remembered.
    pub fn start_new(&mut self) {
        if self.has_user_messages() {
            match self.active_index {
                Some(index) => {
                    self.conversations[index].messages = self.messages.clone();
                }
                None => {
                    let title = self
                        .messages
                        .get(1)
                        .map(|m| truncate_title(&m.content))
                        .unwrap_or_else(|| {
                            format!("Conversation {}", self.conversations.len() + 1)
                        });
                    self.conversations.push(Conversation {
                        title,
                        messages: self.messages.clone(),
                    });
                }
            }
        }

        self.messages = vec![Message::assistant(self.greeting.clone())];
        self.active_index = None;
    }

    /// Load a saved conversation into the live sequence.
    ///
    /// Replaces the live sequence with the stored messages exactly; the
    /// previous live sequence is not committed. Returns false when the
    /// index is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(convo) = self.conversations.get(index) else {
            return false;
        };
        self.messages = convo.messages.clone();
        self.active_index = Some(index);
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

fn truncate_title(content: &str) -> String {
    content.chars().take(TITLE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;

    #[test]
    fn test_session_starts_with_greeting() {
        let session = Session::default();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].content, DEFAULT_GREETING);
        assert!(session.conversations().is_empty());
        assert!(session.active_index().is_none());
    }

    #[test]
    fn test_first_message_materializes_entry() {
        let mut session = Session::default();
        session.record_user_message("Tell me about ferris the crab");

        assert_eq!(session.conversations().len(), 1);
        assert_eq!(session.conversations()[0].title, "Tell me about ferris");
        assert_eq!(session.active_index(), Some(0));
        // Snapshot includes the greeting and the user message
        assert_eq!(session.conversations()[0].messages.len(), 2);
    }

    #[test]
    fn test_short_first_message_keeps_full_title() {
        let mut session = Session::default();
        session.record_user_message("hi");
        assert_eq!(session.conversations()[0].title, "hi");
    }

    #[test]
    fn test_second_message_does_not_add_entry() {
        let mut session = Session::default();
        session.record_user_message("first");
        session.record_assistant_message("reply");
        session.record_user_message("second");

        assert_eq!(session.conversations().len(), 1);
        assert_eq!(session.active_index(), Some(0));
    }

    #[test]
    fn test_start_new_overwrites_active_entry() {
        let mut session = Session::default();
        session.record_user_message("first");
        session.record_assistant_message("reply one");
        session.start_new();

        session.select(0);
        session.record_user_message("follow-up");
        session.record_assistant_message("reply two");
        session.start_new();

        // Overwritten in place, not duplicated
        assert_eq!(session.conversations().len(), 1);
        let saved = &session.conversations()[0];
        assert_eq!(saved.title, "first");
        assert_eq!(saved.messages.len(), 5);
        assert_eq!(saved.messages[3].content, "follow-up");
    }

    #[test]
    fn test_start_new_with_only_greeting_leaves_list_unchanged() {
        let mut session = Session::default();
        session.record_user_message("one");
        session.start_new();
        assert_eq!(session.conversations().len(), 1);

        // Nothing sent: starting again must not create an entry
        session.start_new();
        assert_eq!(session.conversations().len(), 1);
        assert_eq!(session.messages().len(), 1);
        assert!(session.active_index().is_none());
    }

    #[test]
    fn test_start_new_resets_to_fresh_greeting() {
        let mut session = Session::new("Welcome back");
        session.record_user_message("hello");
        session.start_new();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, "Welcome back");
        assert!(session.active_index().is_none());
    }

    #[test]
    fn test_select_replaces_live_sequence_exactly() {
        let mut session = Session::default();
        session.record_user_message("saved convo");
        session.record_assistant_message("saved reply");
        session.start_new();

        session.record_user_message("unrelated");
        let stored = session.conversations()[0].messages.clone();

        assert!(session.select(0));
        assert_eq!(session.messages(), &stored[..]);
        assert_eq!(session.active_index(), Some(0));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut session = Session::default();
        assert!(!session.select(0));
        assert!(session.active_index().is_none());
    }

    #[test]
    fn test_select_does_not_commit_live_progress() {
        let mut session = Session::default();
        session.record_user_message("first convo");
        session.start_new();
        session.record_user_message("second convo");
        session.start_new();

        // Edit the first conversation but switch away without starting new
        session.select(0);
        session.record_user_message("uncommitted");
        session.select(1);

        // The edit was discarded
        assert_eq!(session.conversations()[0].messages.len(), 2);
    }
}
