//! Errors for rejected user actions.

use thiserror::Error;

use crate::cards::CardError;
use crate::core::{ConfigError, RoomId};

/// A user action the session refused.
///
/// Server messages never produce these; reducers degrade instead.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no room selected")]
    NoRoomSelected,

    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("cards already held in the current room")]
    AlreadyInRoom,

    #[error("not connected: no client id from the server yet")]
    NotConnected,

    #[error("player name must be {min} to {max} characters")]
    InvalidPlayerName { min: usize, max: usize },

    #[error("card quantity must be {min} to {max}")]
    InvalidCardQuantity { min: u32, max: u32 },

    #[error("number {0} has not been drawn")]
    NumberNotDrawn(u32),

    #[error("number {0} is not on any held card")]
    NumberNotOnCard(u32),

    #[error("number {0} is already marked")]
    AlreadyMarked(u32),

    #[error("no game running")]
    GameNotRunning,

    #[error("chat message is empty")]
    EmptyChatMessage,

    #[error("choose a player name before chatting")]
    NoPlayerName,

    #[error("card index {index} out of range ({len} cards held)")]
    CardIndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("checkpoint failed: {0}")]
    Checkpoint(#[from] bincode::Error),
}
