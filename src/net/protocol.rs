//! Message kinds exchanged with the game server.
//!
//! Kinds are the keys of the session reducer table. The names are the
//! event names used on the wire.

use serde::{Deserialize, Serialize};

/// Inbound message discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    // Session seed
    Connected,
    Status,

    // Draws and game lifecycle
    NewNumber,
    GameStarted,
    GameStopped,
    GameReset,

    // Room membership and roster
    RoomJoined,
    RoomLeft,
    RoomJoinRejected,
    RoomStatusChanged,
    ClientConnected,
    ClientDisconnected,
    PlayerJoinedRoom,
    PlayerLeftRoom,
    RoomPlayersUpdated,
    CardsPurchased,

    // Winner announcements
    GameEnded,
    PlayerWon,
    VictoryConfirmed,

    // Room closing and chat
    ShowRoomClosingModal,
    ChatMessage,
}

impl MessageKind {
    /// Every inbound kind.
    pub const ALL: [MessageKind; 21] = [
        MessageKind::Connected,
        MessageKind::Status,
        MessageKind::NewNumber,
        MessageKind::GameStarted,
        MessageKind::GameStopped,
        MessageKind::GameReset,
        MessageKind::RoomJoined,
        MessageKind::RoomLeft,
        MessageKind::RoomJoinRejected,
        MessageKind::RoomStatusChanged,
        MessageKind::ClientConnected,
        MessageKind::ClientDisconnected,
        MessageKind::PlayerJoinedRoom,
        MessageKind::PlayerLeftRoom,
        MessageKind::RoomPlayersUpdated,
        MessageKind::CardsPurchased,
        MessageKind::GameEnded,
        MessageKind::PlayerWon,
        MessageKind::VictoryConfirmed,
        MessageKind::ShowRoomClosingModal,
        MessageKind::ChatMessage,
    ];

    /// Wire event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageKind::Connected => "connected",
            MessageKind::Status => "status",
            MessageKind::NewNumber => "newNumber",
            MessageKind::GameStarted => "gameStarted",
            MessageKind::GameStopped => "gameStopped",
            MessageKind::GameReset => "gameReset",
            MessageKind::RoomJoined => "roomJoined",
            MessageKind::RoomLeft => "roomLeft",
            MessageKind::RoomJoinRejected => "roomJoinRejected",
            MessageKind::RoomStatusChanged => "roomStatusChanged",
            MessageKind::ClientConnected => "clientConnected",
            MessageKind::ClientDisconnected => "clientDisconnected",
            MessageKind::PlayerJoinedRoom => "playerJoinedRoom",
            MessageKind::PlayerLeftRoom => "playerLeftRoom",
            MessageKind::RoomPlayersUpdated => "roomPlayersUpdated",
            MessageKind::CardsPurchased => "cardsPurchased",
            MessageKind::GameEnded => "gameEnded",
            MessageKind::PlayerWon => "playerWon",
            MessageKind::VictoryConfirmed => "victoryConfirmed",
            MessageKind::ShowRoomClosingModal => "showRoomClosingModal",
            MessageKind::ChatMessage => "chatMessage",
        }
    }

    /// Look up a kind by wire event name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
