//! Client session reconciliation.
//!
//! ## Key Types
//!
//! - `Reconciler`: Owns a session, folds server messages and user actions into it
//! - `SessionState`: Everything the client knows about its room and game
//! - `ReducerTable`: Message kind → reducer registration table
//! - `WinnerRecord`: Normalized authoritative winner with its own highlight
//! - `DrawGate`: Holds each draw until its reveal finishes, releases it once
//!
//! ## Merge Rules
//!
//! - A room snapshot never erases held cards or marks
//! - Drawn numbers from snapshots are set-unioned, never removed
//! - Local wins are advisory claims; only server broadcasts set winners
//! - Leaving, by request, confirmation or countdown, clears the whole room

mod chat;
mod countdown;
mod draw_gate;
mod error;
mod handlers;
mod phase;
mod reconciler;
mod reducer;
mod state;
mod winners;

pub use chat::{ChatLog, ChatMessage};
pub use countdown::ClosingCountdown;
pub use draw_gate::DrawGate;
pub use error::SessionError;
pub use phase::SessionPhase;
pub use reconciler::{
    Reconciler, MAX_CARD_QUANTITY, MAX_PLAYER_NAME, MIN_CARD_QUANTITY, MIN_PLAYER_NAME,
};
pub use reducer::{Reducer, ReducerTable};
pub use state::SessionState;
pub use winners::{normalize_winners, LocalWinner, WinnerRecord, ANONYMOUS_WINNER};
