// Session conversation log
//
// Append-only sequence of user/assistant turns, scoped to one chat
// session. The log is display state for the UI; it is never replayed to
// the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

pub struct SessionLog {
    messages: Vec<Message>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a user message to the log.
    pub fn add_user_message(&mut self, content: String) {
        self.messages.push(Message {
            role: "user".to_string(),
            content,
        });
    }

    /// Append an assistant message (answer or inline error) to the log.
    pub fn add_assistant_message(&mut self, content: String) {
        self.messages.push(Message {
            role: "assistant".to_string(),
            content,
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Clear the log (start the session fresh).
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of complete turns (pairs of user + assistant messages).
    pub fn turn_count(&self) -> usize {
        self.messages.len() / 2
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}
