// 🧑 Session - Explicit per-session state
// One user, one session: the expense store plus the chat transcript.
// Always passed around as a value, never a hidden singleton.

use crate::store::ExpenseStore;
use serde::{Deserialize, Serialize};

// ============================================================================
// CHAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// ============================================================================
// SESSION
// ============================================================================

/// Process-local state for one user session.
///
/// Data lives only for the lifetime of the session; there is no
/// persistence and no cross-session sharing.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub store: ExpenseStore,
    pub messages: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            store: ExpenseStore::new(),
            messages: Vec::new(),
        }
    }

    /// Submit a chat message and record the bot reply.
    ///
    /// The bot echoes the input reversed; there is no language
    /// understanding here. Blank input is ignored and produces no
    /// transcript entries. Returns the bot reply when one was made.
    pub fn chat(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });

        let reversed: String = text.chars().rev().collect();
        self.messages.push(ChatMessage {
            role: ChatRole::Bot,
            content: format!("Bot says: {}", reversed),
        });

        self.messages.last()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_echoes_reversed() {
        let mut session = Session::new();
        let reply = session.chat("hello").unwrap();

        assert_eq!(reply.role, ChatRole::Bot);
        assert_eq!(reply.content, "Bot says: olleh");
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, ChatRole::User);
        assert_eq!(session.messages[0].content, "hello");
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut session = Session::new();
        assert!(session.chat("").is_none());
        assert!(session.chat("   ").is_none());
        assert!(session.messages.is_empty());
    }

    #[test]
    fn test_store_starts_empty() {
        let session = Session::new();
        assert!(session.store.is_empty());
    }
}
