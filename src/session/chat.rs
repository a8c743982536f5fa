//! Room chat history and unread tracking.

use serde::{Deserialize, Serialize};

use crate::net::ChatPayload;

/// A chat line as received from the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub player_name: String,
    pub message: String,
    pub timestamp: Option<String>,
}

impl ChatMessage {
    /// Normalize a wire payload. Payloads without text are dropped.
    #[must_use]
    pub fn from_payload(payload: &ChatPayload) -> Option<Self> {
        let message = payload.message.clone()?;
        Some(Self {
            id: payload.id.clone().unwrap_or_default(),
            player_name: payload.player_name.clone().unwrap_or_default(),
            message,
            timestamp: payload.timestamp.clone(),
        })
    }
}

/// Chat history for the current room.
///
/// Starts minimized. Messages arriving while minimized count as unread;
/// opening the chat resets the counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    unread: u32,
    minimized: bool,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            unread: 0,
            minimized: true,
        }
    }
}

impl ChatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        if self.minimized {
            self.unread = self.unread.saturating_add(1);
        }
        self.messages.push(message);
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
        if !minimized {
            self.unread = 0;
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn unread(&self) -> u32 {
        self.unread
    }

    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Drop history and unread count, and minimize again.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
