//! Session state: everything one client knows about its room and game.
//!
//! ## Ownership
//!
//! Server-owned data (drawn numbers, running/ended flags, winners, roster)
//! is only changed by reducers. Player-owned data (cards, marks, name,
//! chat visibility) is only changed by user actions on the reconciler,
//! except that a full reset or leave clears it.
//!
//! The phase is never stored. [`SessionState::phase`] derives it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::chat::ChatLog;
use super::countdown::ClosingCountdown;
use super::draw_gate::DrawGate;
use super::phase::SessionPhase;
use super::winners::{LocalWinner, WinnerRecord};
use crate::cards::Card;
use crate::core::{ClientId, GameConfig, PlayerInfo, Room};
use crate::net::{RosterPayload, WinClaim};
use crate::win::MarkedSet;

/// State of one client session.
///
/// Uses `im` collections so checkpoints and test snapshots clone cheaply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    // === Connection ===
    /// Server-assigned id, known after `connected`.
    pub client_id: Option<ClientId>,

    /// Clients connected to the server.
    pub total_clients: u32,

    /// Draw configuration, overridden by the server on `connected`.
    pub config: GameConfig,

    // === Room ===
    pub selected_room: Option<Room>,

    /// Clients in the selected room.
    pub room_clients: u32,

    pub players: Vec<PlayerInfo>,

    /// Message from the last rejected room join.
    pub rejection: Option<String>,

    // === Player ===
    pub player_name: String,

    /// Cards bought in the last purchase.
    pub card_quantity: u32,

    pub cards: Vec<Card>,

    /// Index into `cards` of the card on display.
    pub current_card: usize,

    /// Numbers marked across all held cards.
    pub marked: MarkedSet,

    // === Game ===
    /// Drawn numbers, in draw order, without duplicates.
    pub drawn: Vector<u32>,

    /// Latest drawn number.
    pub current_number: Option<u32>,

    pub running: bool,
    pub ended: bool,

    /// Authoritative winners, in server order.
    pub winners: Vec<WinnerRecord>,

    /// This client's advisory claim for the current game.
    pub pending_claim: Option<WinClaim>,

    pub gate: DrawGate,

    // === Room lifecycle ===
    pub chat: ChatLog,

    pub closing: Option<ClosingCountdown>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl SessionState {
    /// Create a fresh session with no room.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            client_id: None,
            total_clients: 0,
            config,
            selected_room: None,
            room_clients: 0,
            players: Vec::new(),
            rejection: None,
            player_name: String::new(),
            card_quantity: 1,
            cards: Vec::new(),
            current_card: 0,
            marked: MarkedSet::new(),
            drawn: Vector::new(),
            current_number: None,
            running: false,
            ended: false,
            winners: Vec::new(),
            pending_claim: None,
            gate: DrawGate::new(),
            chat: ChatLog::new(),
            closing: None,
        }
    }

    /// Current phase, derived from the data.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.selected_room.is_none() {
            SessionPhase::NoRoom
        } else if self.closing.is_some() {
            SessionPhase::Closing
        } else if self.ended {
            SessionPhase::Ended
        } else if self.cards.is_empty() {
            SessionPhase::RoomSelected
        } else if self.running {
            SessionPhase::InProgress
        } else {
            SessionPhase::NamedAndPurchased
        }
    }

    #[must_use]
    pub fn holds_cards(&self) -> bool {
        !self.cards.is_empty()
    }

    /// Card on display.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_card)
    }

    /// First authoritative winner.
    #[must_use]
    pub fn winner(&self) -> Option<&WinnerRecord> {
        self.winners.first()
    }

    #[must_use]
    pub fn is_drawn(&self, number: u32) -> bool {
        self.drawn.contains(&number)
    }

    /// Is `number` on any held card?
    #[must_use]
    pub fn holds_number(&self, number: u32) -> bool {
        self.cards.iter().any(|card| card.contains(number))
    }

    /// Can marks be placed right now?
    #[must_use]
    pub fn accepts_marks(&self) -> bool {
        self.running && !self.ended
    }

    /// Record a drawn number. Returns false if it was already drawn.
    pub fn push_drawn(&mut self, number: u32) -> bool {
        if self.is_drawn(number) {
            return false;
        }
        self.drawn.push_back(number);
        self.current_number = Some(number);
        true
    }

    /// Set-union drawn numbers from a snapshot, keeping local order.
    pub fn union_drawn(&mut self, numbers: &[u32]) {
        for &number in numbers {
            if !self.is_drawn(number) {
                self.drawn.push_back(number);
            }
        }
    }

    /// Replace drawn numbers wholesale, dropping duplicates.
    pub fn replace_drawn(&mut self, numbers: &[u32]) {
        self.drawn = Vector::new();
        self.union_drawn(numbers);
        self.current_number = self.drawn.last().copied();
    }

    /// Adopt authoritative winners. An empty list clears them.
    pub fn adopt_winners(&mut self, winners: Vec<WinnerRecord>) {
        if winners.is_empty() {
            self.clear_winners();
            return;
        }
        self.winners = winners;
        self.ended = true;
        self.running = false;
    }

    /// Forget winners. Cancels any closing countdown.
    pub fn clear_winners(&mut self) {
        self.winners.clear();
        self.closing = None;
    }

    /// Apply whichever roster fields are present.
    pub fn apply_roster(&mut self, roster: &RosterPayload) {
        if let Some(total) = roster.total_clients.or(roster.room_clients) {
            self.total_clients = total;
        }
        if let Some(room_clients) = roster.room_clients {
            self.room_clients = room_clients;
        }
        if let Some(players) = &roster.players {
            self.players.clone_from(players);
        }
    }

    /// Clear the game: draws, marks, flags, winners, claim and cards.
    pub fn reset_game(&mut self) {
        self.drawn = Vector::new();
        self.current_number = None;
        self.marked.clear();
        self.running = false;
        self.ended = false;
        self.pending_claim = None;
        self.gate.clear();
        self.cards.clear();
        self.current_card = 0;
        self.clear_winners();
    }

    /// Leave the room: clear everything except the connection.
    pub fn leave(&mut self) {
        let client_id = self.client_id.take();
        let config = self.config.clone();
        let total_clients = self.total_clients;

        *self = Self::new(config);
        self.client_id = client_id;
        self.total_clients = total_clients;
    }

    /// Local identity, card and marks, for filling gaps in winner payloads.
    #[must_use]
    pub fn local_winner(&self) -> LocalWinner {
        LocalWinner {
            client_id: self.client_id.clone(),
            player_name: self.player_name.clone(),
            card: self.current_card().cloned(),
            marked: self.marked.clone(),
        }
    }
}
