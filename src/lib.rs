//! # bingo-sync
//!
//! Bingo card generation, win detection and client-side reconciliation of
//! a server-authoritative multiplayer bingo game.
//!
//! ## Design Principles
//!
//! 1. **Server Authority**: Winners, draws and game flow come from the
//!    server. Local win detection only produces advisory claims.
//!
//! 2. **Pure Core**: Card generation takes an injected RNG and win
//!    detection never mutates its inputs, so both are reproducible.
//!
//! 3. **Normalize at the Boundary**: Wire payloads of every shape are
//!    turned into one internal representation on receipt.
//!
//! ## Architecture
//!
//! - **Reducer Table**: Each inbound message kind maps to a reducer over
//!   session state. Transport is the host's concern.
//!
//! - **Persistent Data Structures**: `im` collections keep marks and draw
//!   history cheap to clone for checkpoints.
//!
//! ## Modules
//!
//! - `core`: Client and room ids, configuration, RNG
//! - `cards`: Cells, cards and the card generator
//! - `win`: Marked numbers and winning line detection
//! - `net`: Inbound and outbound wire messages
//! - `session`: Session state, reducers and the reconciler

pub mod core;
pub mod cards;
pub mod win;
pub mod net;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ClientId, PlayerInfo,
    Room, RoomId,
    GameRng, GameRngState,
    GameConfig, ConfigError,
};

pub use crate::cards::{
    Card, Cell, Coord,
    CardGenerator, CardError, ColumnRange,
    generate_card,
};

pub use crate::win::{
    MarkedSet, LineKind, WinningLine,
    find_winning_line, check_bingo, classify_victory,
};

pub use crate::net::{ClientMessage, DecodeError, MessageKind, ServerMessage, WinClaim};

pub use crate::session::{
    Reconciler, ReducerTable, Reducer,
    SessionState, SessionPhase, SessionError,
    WinnerRecord, ChatLog, ChatMessage, ClosingCountdown, DrawGate,
};
