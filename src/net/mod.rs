//! Wire messages exchanged with the game server.
//!
//! ## Inbound
//!
//! [`ServerMessage`] decodes `{"event", "data"}` envelopes into typed
//! payloads. Field-level damage is tolerated; see [`inbound`].
//!
//! ## Outbound
//!
//! [`ClientMessage`] covers every request the client can issue, including
//! advisory win claims.
//!
//! Transport is out of scope: hosts feed decoded messages into a
//! [`crate::session::Reconciler`] and forward what it emits.

pub mod inbound;
pub mod outbound;
pub mod protocol;

pub use inbound::{
    CardShape, ChatPayload, ConnectedPayload, DecodeError, NewNumberPayload, PrizeInfo, RawWinner,
    RoomClosingPayload, RoomGameState, RoomJoinRejectedPayload, RoomJoinedPayload,
    RoomLeftPayload, RosterPayload, ServerConfig, ServerMessage, StatusPayload, WinnersPayload,
};
pub use outbound::{
    ChatRequest, ClientMessage, LeaveRoomRequest, PurchaseRequest, SetPlayerNameRequest, WinClaim,
};
pub use protocol::MessageKind;
