//! Room closing countdown.

use serde::{Deserialize, Serialize};

use crate::core::RoomId;

/// A cancellable countdown before a room closes.
///
/// Driven by the host calling [`ClosingCountdown::tick`] once per second.
/// Dropping the value cancels it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingCountdown {
    room_id: RoomId,
    remaining: u32,
    expired: bool,
}

impl ClosingCountdown {
    #[must_use]
    pub fn new(room_id: RoomId, seconds: u32) -> Self {
        Self {
            room_id,
            remaining: seconds,
            expired: false,
        }
    }

    #[must_use]
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Seconds left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Advance one second. Returns true exactly once, on expiry.
    pub fn tick(&mut self) -> bool {
        if self.expired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            return true;
        }
        false
    }
}
