//! Player identification.
//!
//! ## ClientId
//!
//! Opaque connection identifier assigned by the server.
//!
//! ## PlayerInfo
//!
//! A roster entry as broadcast by the server.

use serde::{Deserialize, Serialize};

/// Server-assigned client identifier.
///
/// The client never invents these; it stores whatever the server sent on
/// `connected` and echoes it back in outbound messages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    /// Create a new client ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form (first 8 characters), used for fallback player names.
    #[must_use]
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A player in the current room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    /// Connection the player is on.
    #[serde(default)]
    pub client_id: ClientId,

    /// Display name chosen at purchase time.
    #[serde(default)]
    pub player_name: String,
}

impl PlayerInfo {
    /// Create a new roster entry.
    pub fn new(client_id: impl Into<ClientId>, player_name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            player_name: player_name.into(),
        }
    }
}

/// Name shown for a player who never picked one.
#[must_use]
pub fn fallback_player_name(client_id: &ClientId) -> String {
    format!("Jugador {}", client_id.short())
}
