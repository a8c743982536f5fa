//! Reducer table.
//!
//! Maps each inbound [`MessageKind`] to a reducer that folds the message
//! into [`SessionState`]. The transport decodes and dispatches; the table
//! can be exercised without a live connection.

use rustc_hash::FxHashMap;

use super::handlers;
use super::state::SessionState;
use crate::net::{MessageKind, ServerMessage};

/// Folds one message into session state. Never fails.
pub type Reducer = fn(&mut SessionState, &ServerMessage);

/// Registration table from message kind to reducer.
#[derive(Clone, Debug, Default)]
pub struct ReducerTable {
    reducers: FxHashMap<MessageKind, Reducer>,
}

impl ReducerTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a reducer for every inbound kind.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(MessageKind::Connected, handlers::connected);
        table.register(MessageKind::Status, handlers::status);
        table.register(MessageKind::NewNumber, handlers::new_number);
        table.register(MessageKind::GameStarted, handlers::game_started);
        table.register(MessageKind::GameStopped, handlers::game_stopped);
        table.register(MessageKind::GameReset, handlers::game_reset);
        table.register(MessageKind::RoomJoined, handlers::room_joined);
        table.register(MessageKind::RoomLeft, handlers::room_left);
        table.register(MessageKind::RoomJoinRejected, handlers::room_join_rejected);
        table.register(MessageKind::RoomStatusChanged, handlers::room_status_changed);
        for kind in [
            MessageKind::ClientConnected,
            MessageKind::ClientDisconnected,
            MessageKind::PlayerJoinedRoom,
            MessageKind::PlayerLeftRoom,
            MessageKind::RoomPlayersUpdated,
            MessageKind::CardsPurchased,
        ] {
            table.register(kind, handlers::roster);
        }
        table.register(MessageKind::GameEnded, handlers::winners_announced);
        table.register(MessageKind::PlayerWon, handlers::winners_announced);
        table.register(MessageKind::VictoryConfirmed, handlers::victory_confirmed);
        table.register(MessageKind::ShowRoomClosingModal, handlers::room_closing);
        table.register(MessageKind::ChatMessage, handlers::chat_message);
        table
    }

    /// Register a reducer, returning the one it replaces.
    pub fn register(&mut self, kind: MessageKind, reducer: Reducer) -> Option<Reducer> {
        self.reducers.insert(kind, reducer)
    }

    /// Register a reducer (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: MessageKind, reducer: Reducer) -> Self {
        self.register(kind, reducer);
        self
    }

    /// Remove the reducer for `kind`.
    pub fn unregister(&mut self, kind: MessageKind) -> Option<Reducer> {
        self.reducers.remove(&kind)
    }

    #[must_use]
    pub fn get(&self, kind: MessageKind) -> Option<Reducer> {
        self.reducers.get(&kind).copied()
    }

    #[must_use]
    pub fn handles(&self, kind: MessageKind) -> bool {
        self.reducers.contains_key(&kind)
    }

    /// Apply `message` to `state`. Returns false if no reducer is registered.
    pub fn dispatch(&self, state: &mut SessionState, message: &ServerMessage) -> bool {
        match self.get(message.kind()) {
            Some(reducer) => {
                reducer(state, message);
                true
            }
            None => {
                tracing::debug!(kind = %message.kind(), "no reducer registered");
                false
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::NewNumberPayload;

    #[test]
    fn test_standard_covers_every_kind() {
        let table = ReducerTable::standard();
        for kind in MessageKind::ALL {
            assert!(table.handles(kind), "missing reducer for {kind}");
        }
        assert_eq!(table.len(), MessageKind::ALL.len());
    }

    #[test]
    fn test_dispatch_without_reducer() {
        let table = ReducerTable::new();
        let mut state = SessionState::default();
        assert!(!table.dispatch(&mut state, &ServerMessage::GameStarted));
        assert!(!state.running);
    }

    #[test]
    fn test_custom_reducer_replaces() {
        fn always_running(state: &mut SessionState, _: &ServerMessage) {
            state.running = true;
        }

        let table = ReducerTable::standard().with(MessageKind::GameStopped, always_running);
        let mut state = SessionState::default();
        assert!(table.dispatch(&mut state, &ServerMessage::GameStopped));
        assert!(state.running);
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let table = ReducerTable::standard();
        let mut state = SessionState::default();
        table.dispatch(
            &mut state,
            &ServerMessage::NewNumber(NewNumberPayload { number: Some(12) }),
        );
        assert!(state.is_drawn(12));
    }

    #[test]
    fn test_unregister() {
        let mut table = ReducerTable::standard();
        assert!(table.unregister(MessageKind::ChatMessage).is_some());
        assert!(!table.handles(MessageKind::ChatMessage));
    }
}
