//! Play session phases.

use serde::{Deserialize, Serialize};

/// Where a session is in its room lifecycle.
///
/// `NoRoom → RoomSelected → NamedAndPurchased → InProgress → Ended →
/// Closing → NoRoom`. Always derived from session state; see
/// [`super::SessionState::phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Choosing a room.
    NoRoom,
    /// Room chosen, no cards yet.
    RoomSelected,
    /// Cards held, waiting for a game.
    NamedAndPurchased,
    /// Game running with cards held.
    InProgress,
    /// Winners announced.
    Ended,
    /// Room closing countdown active.
    Closing,
}

impl SessionPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionPhase::NoRoom => "no_room",
            SessionPhase::RoomSelected => "room_selected",
            SessionPhase::NamedAndPurchased => "named_and_purchased",
            SessionPhase::InProgress => "in_progress",
            SessionPhase::Ended => "ended",
            SessionPhase::Closing => "closing",
        }
    }

    /// Is the player sitting in a room?
    #[must_use]
    pub const fn in_room(self) -> bool {
        !matches!(self, SessionPhase::NoRoom)
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
