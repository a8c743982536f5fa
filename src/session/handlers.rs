//! Standard reducers, one per inbound message kind.
//!
//! Each reducer ignores messages of other kinds and treats every missing
//! payload field as "leave this alone".

use tracing::{debug, info, warn};

use super::chat::ChatMessage;
use super::countdown::ClosingCountdown;
use super::state::SessionState;
use super::winners::{normalize_winners, WinnerRecord};
use crate::net::ServerMessage;

pub(super) fn connected(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::Connected(payload) = message else {
        return;
    };

    if let Some(id) = payload.client_id.clone().filter(|id| !id.as_str().is_empty()) {
        state.client_id = Some(id);
    }
    if let Some(server) = &payload.config {
        let mut config = state.config.clone();
        if let Some(delay) = server.delay {
            config.draw_delay_ms = delay;
        }
        if let Some(min) = server.min_number {
            config.min_number = min;
        }
        if let Some(max) = server.max_number {
            config.max_number = max;
        }
        match config.validate() {
            Ok(()) => state.config = config,
            Err(err) => warn!(%err, "ignoring server config"),
        }
    }
    if let Some(total) = payload.total_clients {
        state.total_clients = total;
    }
    if let Some(running) = payload.is_game_running {
        state.running = running;
    }
    if let Some(ended) = payload.game_ended {
        state.ended = ended;
    }
    if let Some(numbers) = &payload.generated_numbers {
        if state.holds_cards() {
            state.union_drawn(numbers);
        } else {
            state.replace_drawn(numbers);
        }
    }
    if let Some(winner) = payload.winner.as_ref().filter(|w| w.is_present()) {
        state.adopt_winners(vec![WinnerRecord::from_raw(winner)]);
    }

    info!(
        client_id = ?state.client_id,
        running = state.running,
        drawn = state.drawn.len(),
        "connected"
    );
}

pub(super) fn status(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::Status(payload) = message else {
        return;
    };

    if let Some(running) = payload.is_game_running {
        state.running = running;
    }
    if let Some(total) = payload.total_clients {
        state.total_clients = total;
    }
    if let Some(room_clients) = payload.room_clients {
        state.room_clients = room_clients;
    }
    if payload.game_ended == Some(true) {
        if let Some(winner) = payload.winner.as_ref().filter(|w| w.is_present()) {
            state.adopt_winners(vec![WinnerRecord::from_raw(winner)]);
        }
    }
}

pub(super) fn new_number(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::NewNumber(payload) = message else {
        return;
    };
    let Some(number) = payload.number else {
        debug!("newNumber without a number");
        return;
    };

    if state.push_drawn(number) {
        state.gate.arm(number);
        debug!(number, "number drawn");
    } else {
        debug!(number, "duplicate draw ignored");
    }
}

pub(super) fn game_started(state: &mut SessionState, message: &ServerMessage) {
    if !matches!(message, ServerMessage::GameStarted) {
        return;
    }
    // A start after an ended game is a new game.
    if state.ended {
        state.ended = false;
        state.pending_claim = None;
        state.clear_winners();
    }
    state.running = true;
    info!("game started");
}

pub(super) fn game_stopped(state: &mut SessionState, message: &ServerMessage) {
    if !matches!(message, ServerMessage::GameStopped) {
        return;
    }
    state.running = false;
    info!("game stopped");
}

pub(super) fn game_reset(state: &mut SessionState, message: &ServerMessage) {
    if !matches!(message, ServerMessage::GameReset) {
        return;
    }
    state.reset_game();
    info!("game reset");
}

/// Shared by every roster-carrying kind.
pub(super) fn roster(state: &mut SessionState, message: &ServerMessage) {
    if let Some(roster) = message.roster() {
        state.apply_roster(roster);
        debug!(kind = %message.kind(), room_clients = state.room_clients, "roster updated");
    }
}

pub(super) fn room_joined(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::RoomJoined(payload) = message else {
        return;
    };

    state.rejection = None;
    if let Some(room_clients) = payload.room_clients {
        state.room_clients = room_clients;
    }
    if let Some(players) = &payload.players {
        state.players.clone_from(players);
    }

    if state.holds_cards() {
        debug!(cards = state.cards.len(), "room snapshot: keeping held cards and marks");
        return;
    }

    match &payload.game_state {
        Some(game) if game.is_game_running == Some(true) => {
            state.running = true;
            state.ended = game.game_ended.unwrap_or(false);
            if let Some(numbers) = &game.generated_numbers {
                state.union_drawn(numbers);
            }
            let winners = game.winners.as_deref().map(normalize_winners).unwrap_or_default();
            state.adopt_winners(winners);
            info!(drawn = state.drawn.len(), "joined room with a game in progress");
        }
        _ => {
            state.reset_game();
            info!("joined room with no active game");
        }
    }
}

pub(super) fn room_left(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::RoomLeft(payload) = message else {
        return;
    };
    info!(room = ?payload.room_id, "left room");
    state.leave();
}

pub(super) fn room_join_rejected(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::RoomJoinRejected(payload) = message else {
        return;
    };
    let reason = payload
        .message
        .clone()
        .or_else(|| payload.reason.clone())
        .unwrap_or_default();
    warn!(room = ?payload.room_id, %reason, "room join rejected");

    state.leave();
    state.rejection = Some(reason);
}

pub(super) fn room_status_changed(_state: &mut SessionState, message: &ServerMessage) {
    debug!(kind = %message.kind(), "ignored");
}

/// `gameEnded` and `playerWon`.
pub(super) fn winners_announced(state: &mut SessionState, message: &ServerMessage) {
    let (ServerMessage::GameEnded(payload) | ServerMessage::PlayerWon(payload)) = message else {
        return;
    };

    state.running = false;
    state.ended = true;

    let winners = normalize_winners(&payload.entries());
    if winners.is_empty() {
        debug!(kind = %message.kind(), "winner announcement without winners");
        state.winners.clear();
        return;
    }
    info!(
        kind = %message.kind(),
        winners = winners.len(),
        first = %winners[0].player_name,
        "winners announced"
    );
    state.winners = winners;
}

pub(super) fn victory_confirmed(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::VictoryConfirmed(raw) = message else {
        return;
    };

    let record = WinnerRecord::from_raw_with_local(raw, &state.local_winner());
    info!(player = %record.player_name, victory = %record.victory_type, "victory confirmed");

    state.running = false;
    state.ended = true;
    let existing = record
        .client_id
        .as_ref()
        .and_then(|id| state.winners.iter().position(|w| w.is_client(id)));
    match existing {
        Some(index) => state.winners[index] = record,
        None => state.winners.push(record),
    }
}

pub(super) fn room_closing(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::ShowRoomClosingModal(payload) = message else {
        return;
    };
    let Some(room) = &state.selected_room else {
        debug!("closing notice with no room selected");
        return;
    };
    let room_id = payload.room_id.unwrap_or(room.id);
    if room_id != room.id {
        debug!(%room_id, selected = %room.id, "closing notice for another room dropped");
        return;
    }

    let seconds = payload.countdown.unwrap_or(state.config.closing_countdown_secs);
    info!(%room_id, seconds, "room closing");
    state.closing = Some(ClosingCountdown::new(room_id, seconds));
}

pub(super) fn chat_message(state: &mut SessionState, message: &ServerMessage) {
    let ServerMessage::ChatMessage(payload) = message else {
        return;
    };
    match ChatMessage::from_payload(payload) {
        Some(line) => state.chat.push(line),
        None => debug!("chat message without text dropped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::{ClientId, Room, RoomId};
    use crate::net::{
        ConnectedPayload, RawWinner, RoomClosingPayload, RoomGameState, RoomJoinedPayload,
        ServerConfig, WinnersPayload,
    };

    fn seated() -> SessionState {
        let mut state = SessionState::default();
        state.selected_room = Room::from_catalog(RoomId::new(2));
        state
    }

    #[test]
    fn test_connected_replaces_drawn_without_cards() {
        let mut state = SessionState::default();
        state.push_drawn(70);
        connected(
            &mut state,
            &ServerMessage::Connected(ConnectedPayload {
                client_id: Some(ClientId::new("c1")),
                generated_numbers: Some(vec![1, 2]),
                config: Some(ServerConfig {
                    delay: Some(1500),
                    min_number: Some(1),
                    max_number: Some(90),
                }),
                ..Default::default()
            }),
        );
        assert_eq!(state.client_id, Some(ClientId::new("c1")));
        assert!(!state.is_drawn(70));
        assert!(state.is_drawn(2));
        assert_eq!(state.config.max_number, 90);
        assert_eq!(state.config.draw_delay_ms, 1500);
    }

    #[test]
    fn test_connected_rejects_inverted_range() {
        let mut state = SessionState::default();
        connected(
            &mut state,
            &ServerMessage::Connected(ConnectedPayload {
                config: Some(ServerConfig {
                    min_number: Some(50),
                    max_number: Some(10),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        );
        assert_eq!(state.config.min_number, 1);
        assert_eq!(state.config.max_number, 75);
    }

    #[test]
    fn test_game_started_after_end_clears_winners() {
        let mut state = seated();
        state.adopt_winners(vec![WinnerRecord::default()]);
        state.closing = Some(ClosingCountdown::new(RoomId::new(2), 5));

        game_started(&mut state, &ServerMessage::GameStarted);
        assert!(state.running);
        assert!(!state.ended);
        assert!(state.winners.is_empty());
        assert!(state.closing.is_none());
    }

    #[test]
    fn test_snapshot_with_active_game_unions() {
        let mut state = seated();
        state.push_drawn(9);
        room_joined(
            &mut state,
            &ServerMessage::RoomJoined(RoomJoinedPayload {
                room_clients: Some(3),
                game_state: Some(RoomGameState {
                    is_game_running: Some(true),
                    generated_numbers: Some(vec![4, 9]),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        );
        assert!(state.running);
        assert_eq!(state.drawn.len(), 2);
        assert_eq!(state.room_clients, 3);
    }

    #[test]
    fn test_snapshot_without_game_resets() {
        let mut state = seated();
        state.push_drawn(9);
        state.marked.insert(9);
        state.running = true;
        room_joined(&mut state, &ServerMessage::RoomJoined(RoomJoinedPayload::default()));
        assert!(state.drawn.is_empty());
        assert!(state.marked.is_empty());
        assert!(!state.running);
    }

    #[test]
    fn test_snapshot_keeps_cards() {
        let mut state = seated();
        state.cards = vec![Card::default(); 3];
        state.marked.insert(5);
        state.push_drawn(5);
        room_joined(&mut state, &ServerMessage::RoomJoined(RoomJoinedPayload::default()));
        assert_eq!(state.cards.len(), 3);
        assert!(state.marked.contains(5));
        assert!(state.is_drawn(5));
    }

    #[test]
    fn test_empty_announcement_still_ends() {
        let mut state = seated();
        state.running = true;
        winners_announced(&mut state, &ServerMessage::GameEnded(WinnersPayload::default()));
        assert!(state.ended);
        assert!(!state.running);
        assert!(state.winners.is_empty());
    }

    #[test]
    fn test_empty_announcement_drops_earlier_winners() {
        let mut state = seated();
        state.adopt_winners(vec![WinnerRecord::from_raw(&RawWinner {
            client_id: Some(ClientId::new("old")),
            ..Default::default()
        })]);
        state.closing = Some(ClosingCountdown::new(RoomId::new(2), 5));

        winners_announced(&mut state, &ServerMessage::PlayerWon(WinnersPayload::default()));
        assert!(state.ended);
        assert!(state.winners.is_empty());
        assert!(state.winner().is_none());
        assert!(state.closing.is_some());
    }

    #[test]
    fn test_victory_confirmed_replaces_same_client() {
        let mut state = seated();
        state.client_id = Some(ClientId::new("me"));
        state.winners = vec![
            WinnerRecord::from_raw(&RawWinner {
                client_id: Some(ClientId::new("other")),
                ..Default::default()
            }),
            WinnerRecord::from_raw(&RawWinner {
                client_id: Some(ClientId::new("me")),
                ..Default::default()
            }),
        ];
        victory_confirmed(
            &mut state,
            &ServerMessage::VictoryConfirmed(RawWinner {
                prize: Some(12.5),
                ..Default::default()
            }),
        );
        assert_eq!(state.winners.len(), 2);
        assert_eq!(state.winners[1].prize, Some(12.5));
    }

    #[test]
    fn test_closing_for_other_room_dropped() {
        let mut state = seated();
        room_closing(
            &mut state,
            &ServerMessage::ShowRoomClosingModal(RoomClosingPayload {
                room_id: Some(RoomId::new(5)),
                countdown: Some(3),
            }),
        );
        assert!(state.closing.is_none());

        room_closing(
            &mut state,
            &ServerMessage::ShowRoomClosingModal(RoomClosingPayload {
                room_id: None,
                countdown: None,
            }),
        );
        assert_eq!(state.closing.as_ref().map(ClosingCountdown::remaining), Some(5));
    }

    #[test]
    fn test_reducer_ignores_other_kinds() {
        let mut state = seated();
        let before = state.clone();
        connected(&mut state, &ServerMessage::GameReset);
        room_joined(&mut state, &ServerMessage::GameStarted);
        assert_eq!(state, before);
    }
}
