//! The session reconciler.
//!
//! Owns one client's [`SessionState`] and merges two streams into it:
//! server messages, through the reducer table, and user actions, through
//! methods on [`Reconciler`]. Messages for the server are queued in an
//! outbox the host drains after each call.
//!
//! ## Authority
//!
//! The server decides who won. A locally detected win only produces an
//! advisory `playerWon` claim; the winner list changes only when the server
//! announces winners.
//!
//! ## Example
//!
//! ```
//! use bingo_sync::core::{GameConfig, RoomId};
//! use bingo_sync::session::{Reconciler, SessionPhase};
//!
//! let mut session = Reconciler::with_seed(GameConfig::default(), 7).unwrap();
//! session.handle_json(r#"{"event":"connected","data":{"clientId":"c1"}}"#);
//! session.select_room_by_id(RoomId::new(2)).unwrap();
//! session.purchase_cards("Ana", 2).unwrap();
//!
//! assert_eq!(session.state().cards.len(), 2);
//! assert_eq!(session.phase(), SessionPhase::NamedAndPurchased);
//! assert_eq!(session.drain_outbound().len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::SessionError;
use super::phase::SessionPhase;
use super::reducer::ReducerTable;
use super::state::SessionState;
use crate::cards::CardGenerator;
use crate::core::{fallback_player_name, GameConfig, GameRng, GameRngState, Room, RoomId};
use crate::net::{
    ChatRequest, ClientMessage, LeaveRoomRequest, PurchaseRequest, ServerMessage,
    SetPlayerNameRequest, WinClaim,
};
use crate::win::find_winning_line;

/// Shortest accepted player name, in characters, after trimming.
pub const MIN_PLAYER_NAME: usize = 2;
/// Longest accepted player name, in characters, after trimming.
pub const MAX_PLAYER_NAME: usize = 20;
/// Fewest cards one purchase may buy.
pub const MIN_CARD_QUANTITY: u32 = 1;
/// Most cards one purchase may buy.
pub const MAX_CARD_QUANTITY: u32 = 10;

#[derive(Serialize, Deserialize)]
struct Checkpoint {
    state: SessionState,
    rng: GameRngState,
}

/// One client's session.
#[derive(Clone, Debug)]
pub struct Reconciler {
    state: SessionState,
    reducers: ReducerTable,
    rng: GameRng,
    outbox: Vec<ClientMessage>,
}

impl Reconciler {
    /// Create a session with an entropy-seeded RNG.
    pub fn new(config: GameConfig) -> Result<Self, SessionError> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create a session with a fixed seed, for reproducible cards.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, SessionError> {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Create a session with the given RNG. Fails if `config` does not validate.
    pub fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            state: SessionState::new(config),
            reducers: ReducerTable::standard(),
            rng,
            outbox: Vec::new(),
        })
    }

    /// Replace the reducer table (builder pattern).
    #[must_use]
    pub fn with_reducers(mut self, reducers: ReducerTable) -> Self {
        self.reducers = reducers;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Messages queued for the server, oldest first.
    #[must_use]
    pub fn outbound(&self) -> &[ClientMessage] {
        &self.outbox
    }

    /// Take every queued message.
    pub fn drain_outbound(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outbox)
    }

    // === Server messages ===

    /// Fold a decoded server message into the session.
    pub fn handle(&mut self, message: &ServerMessage) {
        self.reducers.dispatch(&mut self.state, message);
    }

    /// Decode and fold one event. Undecodable events are logged and dropped.
    pub fn handle_event(&mut self, event: &str, data: Value) {
        match ServerMessage::decode(event, data) {
            Ok(message) => self.handle(&message),
            Err(err) => warn!(event, %err, "dropping server message"),
        }
    }

    /// Decode and fold a JSON envelope. Undecodable input is logged and dropped.
    pub fn handle_json(&mut self, text: &str) {
        match ServerMessage::from_json(text) {
            Ok(message) => self.handle(&message),
            Err(err) => warn!(%err, "dropping server message"),
        }
    }

    // === Room and purchase ===

    /// Choose a room to play in.
    pub fn select_room(&mut self, room: Room) -> Result<(), SessionError> {
        if self.state.holds_cards() {
            return Err(SessionError::AlreadyInRoom);
        }
        info!(room = %room.id, name = %room.name, "room selected");
        self.state.selected_room = Some(room);
        self.state.rejection = None;
        Ok(())
    }

    /// Choose a room from the catalog.
    pub fn select_room_by_id(&mut self, id: RoomId) -> Result<(), SessionError> {
        let room = Room::from_catalog(id).ok_or(SessionError::UnknownRoom(id))?;
        self.select_room(room)
    }

    /// Name the player and buy `quantity` freshly generated cards.
    ///
    /// Queues `setPlayerName` then `purchaseCards`.
    pub fn purchase_cards(&mut self, name: &str, quantity: u32) -> Result<(), SessionError> {
        let name = name.trim();
        let chars = name.chars().count();
        if !(MIN_PLAYER_NAME..=MAX_PLAYER_NAME).contains(&chars) {
            return Err(SessionError::InvalidPlayerName {
                min: MIN_PLAYER_NAME,
                max: MAX_PLAYER_NAME,
            });
        }
        if !(MIN_CARD_QUANTITY..=MAX_CARD_QUANTITY).contains(&quantity) {
            return Err(SessionError::InvalidCardQuantity {
                min: MIN_CARD_QUANTITY,
                max: MAX_CARD_QUANTITY,
            });
        }
        let room = self
            .state
            .selected_room
            .clone()
            .ok_or(SessionError::NoRoomSelected)?;
        let client_id = self.state.client_id.clone().ok_or(SessionError::NotConnected)?;

        let generator = CardGenerator::from_config(&self.state.config);
        let cards = generator.generate_many(quantity as usize, &mut self.rng)?;

        self.state.player_name = name.to_string();
        self.state.card_quantity = quantity;
        self.state.cards = cards;
        self.state.current_card = 0;
        self.state.marked.clear();
        self.state.pending_claim = None;

        let total_price = room.total_price(quantity);
        info!(room = %room.id, quantity, total_price, "cards purchased");

        self.outbox
            .push(ClientMessage::SetPlayerName(SetPlayerNameRequest {
                client_id: client_id.clone(),
                player_name: name.to_string(),
            }));
        self.outbox.push(ClientMessage::PurchaseCards(PurchaseRequest {
            client_id,
            player_name: name.to_string(),
            room_id: room.id,
            room_name: room.name,
            card_quantity: quantity,
            total_price,
        }));
        Ok(())
    }

    /// Show a different held card.
    pub fn select_card(&mut self, index: usize) -> Result<(), SessionError> {
        let len = self.state.cards.len();
        if index >= len {
            return Err(SessionError::CardIndexOutOfRange { index, len });
        }
        self.state.current_card = index;
        Ok(())
    }

    /// Leave the room. Queues `leaveRoom` and clears the session.
    pub fn leave_room(&mut self) -> Result<(), SessionError> {
        let room_id = self
            .state
            .selected_room
            .as_ref()
            .map(|room| room.id)
            .ok_or(SessionError::NoRoomSelected)?;
        self.outbox
            .push(ClientMessage::LeaveRoom(LeaveRoomRequest { room_id }));
        self.state.leave();
        info!(%room_id, "left room");
        Ok(())
    }

    // === Marking ===

    /// The host finished revealing the latest draw.
    ///
    /// Auto-marks the armed number if the game accepts marks and a held card
    /// carries it. Returns the number marked, if any. Safe to call any
    /// number of times.
    pub fn reveal_complete(&mut self) -> Option<u32> {
        let number = self.state.gate.release()?;
        if !self.state.accepts_marks() {
            debug!(number, "reveal outside a running game");
            return None;
        }
        if !self.state.holds_number(number) || !self.state.marked.insert(number) {
            return None;
        }
        debug!(number, "auto-marked");
        self.check_for_win();
        Some(number)
    }

    /// Mark a drawn number by hand.
    pub fn mark_number(&mut self, number: u32) -> Result<(), SessionError> {
        if !self.state.accepts_marks() {
            return Err(SessionError::GameNotRunning);
        }
        if !self.state.is_drawn(number) {
            return Err(SessionError::NumberNotDrawn(number));
        }
        if !self.state.holds_number(number) {
            return Err(SessionError::NumberNotOnCard(number));
        }
        if !self.state.marked.insert(number) {
            return Err(SessionError::AlreadyMarked(number));
        }
        debug!(number, "marked");
        self.check_for_win();
        Ok(())
    }

    /// Claim the first winning held card, once per game.
    fn check_for_win(&mut self) {
        if self.state.pending_claim.is_some() {
            return;
        }
        let found = self.state.cards.iter().enumerate().find_map(|(index, card)| {
            find_winning_line(card, &self.state.marked).map(|line| (index, card.clone(), line))
        });
        let Some((index, card, line)) = found else {
            return;
        };

        let client_id = self.state.client_id.clone().unwrap_or_default();
        let player_name = if self.state.player_name.is_empty() {
            fallback_player_name(&client_id)
        } else {
            self.state.player_name.clone()
        };
        let claim = WinClaim {
            client_id,
            player_name,
            room_id: self.state.selected_room.as_ref().map(|room| room.id),
            victory_type: line.kind,
            card: self.state.marked.to_vec(),
            card_matrix: card,
            winning_cells: line.cells.to_vec(),
            winning_numbers: line.numbers.to_vec(),
        };

        info!(card = index, victory = %line.kind, "local win, claiming");
        self.state.current_card = index;
        self.state.pending_claim = Some(claim.clone());
        self.outbox.push(ClientMessage::PlayerWon(claim));
    }

    // === Chat ===

    /// Send a chat line as the current player.
    pub fn send_chat(&mut self, text: &str) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyChatMessage);
        }
        if self.state.player_name.is_empty() {
            return Err(SessionError::NoPlayerName);
        }
        self.outbox.push(ClientMessage::ChatMessage(ChatRequest {
            player_name: self.state.player_name.clone(),
            message: text.to_string(),
        }));
        Ok(())
    }

    pub fn set_chat_minimized(&mut self, minimized: bool) {
        self.state.chat.set_minimized(minimized);
    }

    // === Game control ===
    //
    // The server owns game flow; these only ask.

    pub fn start_game(&mut self) {
        self.outbox.push(ClientMessage::StartGame);
    }

    pub fn stop_game(&mut self) {
        self.outbox.push(ClientMessage::StopGame);
    }

    pub fn reset_game(&mut self) {
        self.outbox.push(ClientMessage::ResetGame);
    }

    pub fn request_rooms_status(&mut self) {
        self.outbox.push(ClientMessage::GetRoomsStatus);
    }

    // === Timers ===

    /// Advance the closing countdown by one second.
    ///
    /// On expiry queues `leaveRoom` and clears the session, exactly once.
    /// Returns true on that call.
    pub fn tick(&mut self) -> bool {
        let Some(countdown) = self.state.closing.as_mut() else {
            return false;
        };
        if !countdown.tick() {
            return false;
        }
        let room_id = countdown.room_id();
        info!(%room_id, "room closed");
        self.outbox
            .push(ClientMessage::LeaveRoom(LeaveRoomRequest { room_id }));
        self.state.leave();
        true
    }

    // === Checkpoints ===

    /// Serialize the session state and RNG position.
    pub fn checkpoint(&self) -> Result<Vec<u8>, SessionError> {
        let checkpoint = Checkpoint {
            state: self.state.clone(),
            rng: self.rng.state(),
        };
        Ok(bincode::serialize(&checkpoint)?)
    }

    /// Rebuild a session from [`Reconciler::checkpoint`] output.
    ///
    /// The reducer table is the standard one and the outbox starts empty.
    pub fn restore(bytes: &[u8]) -> Result<Self, SessionError> {
        let checkpoint: Checkpoint = bincode::deserialize(bytes)?;
        Ok(Self {
            state: checkpoint.state,
            reducers: ReducerTable::standard(),
            rng: GameRng::from_state(&checkpoint.rng),
            outbox: Vec::new(),
        })
    }
}
