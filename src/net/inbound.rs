//! Server → client messages.
//!
//! Every payload field is optional. A missing field and a field of the
//! wrong shape both decode as `None`, so one bad field never discards the
//! rest of a message. Only an unknown event name or a payload that is not
//! an object fails to decode.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::protocol::MessageKind;
use crate::cards::{Card, Coord};
use crate::core::{ClientId, PlayerInfo, RoomId};
use crate::win::{LineKind, MarkedSet};

/// Decoding failure for an inbound message.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode an optional field, turning shape errors into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Draw configuration as sent on `connected`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Milliseconds between draws.
    #[serde(deserialize_with = "lenient")]
    pub delay: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub min_number: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub max_number: Option<u32>,
}

/// A card as it appears inside winner payloads.
///
/// Servers send either the column matrix or a flat list of marked numbers
/// under the same field names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardShape {
    Matrix(Vec<Vec<i64>>),
    Flat(Vec<i64>),
}

impl CardShape {
    /// The card, when this is a well-formed matrix.
    #[must_use]
    pub fn as_card(&self) -> Option<Card> {
        match self {
            CardShape::Matrix(matrix) => Card::from_wire_matrix(matrix),
            CardShape::Flat(_) => None,
        }
    }

    /// The marked numbers, when this is a flat list.
    #[must_use]
    pub fn as_marks(&self) -> Option<MarkedSet> {
        match self {
            CardShape::Flat(values) => Some(MarkedSet::from_wire_numbers(values)),
            CardShape::Matrix(_) => None,
        }
    }
}

/// Prize split attached to a win.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrizeInfo {
    #[serde(deserialize_with = "lenient")]
    pub prize_per_winner: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub total_prize: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub house_cut: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub total_pool: Option<f64>,
}

/// One winner entry, exactly as the server sent it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawWinner {
    #[serde(deserialize_with = "lenient")]
    pub client_id: Option<ClientId>,
    #[serde(deserialize_with = "lenient")]
    pub player_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub winner_name: Option<String>,

    /// Usually the flat list of marked numbers.
    #[serde(deserialize_with = "lenient")]
    pub card: Option<CardShape>,
    /// Usually the card's column matrix.
    #[serde(deserialize_with = "lenient")]
    pub card_matrix: Option<CardShape>,

    #[serde(deserialize_with = "lenient")]
    pub victory_type: Option<LineKind>,
    #[serde(deserialize_with = "lenient")]
    pub winning_cells: Option<Vec<Coord>>,
    #[serde(deserialize_with = "lenient")]
    pub winning_numbers: Option<Vec<u32>>,

    /// Opaque; passed through untouched.
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub prize: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub total_prize: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub house_cut: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub total_pool: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub prize_info: Option<PrizeInfo>,
}

impl RawWinner {
    /// Does the entry carry anything that identifies a winner?
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.client_id.is_some()
            || self.player_name.is_some()
            || self.winner_name.is_some()
            || self.card_matrix.is_some()
            || self.card.is_some()
    }
}

/// Payload of `gameEnded` and `playerWon`.
///
/// Winners arrive as a `winners` list, a single `winner` object, or inline
/// at the top level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WinnersPayload {
    #[serde(deserialize_with = "lenient")]
    pub winners: Option<Vec<RawWinner>>,
    #[serde(deserialize_with = "lenient")]
    pub winner: Option<RawWinner>,
    #[serde(flatten)]
    pub inline: RawWinner,
}

impl WinnersPayload {
    /// Every winner entry, in server order.
    ///
    /// A non-empty `winners` list takes precedence, then `winner`, then the
    /// inline entry.
    #[must_use]
    pub fn entries(&self) -> Vec<RawWinner> {
        match (&self.winners, &self.winner) {
            (Some(list), _) if !list.is_empty() => list.clone(),
            (_, Some(single)) => vec![single.clone()],
            _ if self.inline.is_present() => vec![self.inline.clone()],
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectedPayload {
    #[serde(deserialize_with = "lenient")]
    pub client_id: Option<ClientId>,
    #[serde(deserialize_with = "lenient")]
    pub is_game_running: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub game_ended: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub generated_numbers: Option<Vec<u32>>,
    #[serde(deserialize_with = "lenient")]
    pub total_clients: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub config: Option<ServerConfig>,
    #[serde(deserialize_with = "lenient")]
    pub winner: Option<RawWinner>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusPayload {
    #[serde(deserialize_with = "lenient")]
    pub is_game_running: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub game_ended: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub total_clients: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub room_clients: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub winner: Option<RawWinner>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewNumberPayload {
    #[serde(deserialize_with = "lenient")]
    pub number: Option<u32>,
}

/// Roster update carried by connection and room membership events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterPayload {
    #[serde(deserialize_with = "lenient")]
    pub total_clients: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub room_clients: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub players: Option<Vec<PlayerInfo>>,
}

/// Room game state attached to `roomJoined`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomGameState {
    #[serde(deserialize_with = "lenient")]
    pub is_game_running: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub game_ended: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub generated_numbers: Option<Vec<u32>>,
    #[serde(deserialize_with = "lenient")]
    pub winners: Option<Vec<RawWinner>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomJoinedPayload {
    #[serde(deserialize_with = "lenient")]
    pub room_id: Option<RoomId>,
    #[serde(deserialize_with = "lenient")]
    pub room_clients: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub players: Option<Vec<PlayerInfo>>,
    #[serde(deserialize_with = "lenient")]
    pub game_state: Option<RoomGameState>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomLeftPayload {
    #[serde(deserialize_with = "lenient")]
    pub room_id: Option<RoomId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomJoinRejectedPayload {
    #[serde(deserialize_with = "lenient")]
    pub room_id: Option<RoomId>,
    #[serde(deserialize_with = "lenient")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomClosingPayload {
    #[serde(deserialize_with = "lenient")]
    pub room_id: Option<RoomId>,
    /// Seconds until the room closes.
    #[serde(deserialize_with = "lenient")]
    pub countdown: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatPayload {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub player_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<String>,
}

/// A decoded server message.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerMessage {
    Connected(ConnectedPayload),
    Status(StatusPayload),
    NewNumber(NewNumberPayload),
    GameStarted,
    GameStopped,
    GameReset,
    RoomJoined(RoomJoinedPayload),
    RoomLeft(RoomLeftPayload),
    RoomJoinRejected(RoomJoinRejectedPayload),
    RoomStatusChanged,
    ClientConnected(RosterPayload),
    ClientDisconnected(RosterPayload),
    PlayerJoinedRoom(RosterPayload),
    PlayerLeftRoom(RosterPayload),
    RoomPlayersUpdated(RosterPayload),
    CardsPurchased(RosterPayload),
    GameEnded(WinnersPayload),
    PlayerWon(WinnersPayload),
    VictoryConfirmed(RawWinner),
    ShowRoomClosingModal(RoomClosingPayload),
    ChatMessage(ChatPayload),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

fn payload<T: DeserializeOwned + Default>(data: Value) -> Result<T, serde_json::Error> {
    if data.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(data)
    }
}

impl ServerMessage {
    /// Decode an event name and its payload.
    pub fn decode(event: &str, data: Value) -> Result<Self, DecodeError> {
        let kind = MessageKind::from_name(event)
            .ok_or_else(|| DecodeError::UnknownEvent(event.to_string()))?;

        let message = match kind {
            MessageKind::Connected => ServerMessage::Connected(payload(data)?),
            MessageKind::Status => ServerMessage::Status(payload(data)?),
            MessageKind::NewNumber => ServerMessage::NewNumber(payload(data)?),
            MessageKind::GameStarted => ServerMessage::GameStarted,
            MessageKind::GameStopped => ServerMessage::GameStopped,
            MessageKind::GameReset => ServerMessage::GameReset,
            MessageKind::RoomJoined => ServerMessage::RoomJoined(payload(data)?),
            MessageKind::RoomLeft => ServerMessage::RoomLeft(payload(data)?),
            MessageKind::RoomJoinRejected => ServerMessage::RoomJoinRejected(payload(data)?),
            MessageKind::RoomStatusChanged => ServerMessage::RoomStatusChanged,
            MessageKind::ClientConnected => ServerMessage::ClientConnected(payload(data)?),
            MessageKind::ClientDisconnected => ServerMessage::ClientDisconnected(payload(data)?),
            MessageKind::PlayerJoinedRoom => ServerMessage::PlayerJoinedRoom(payload(data)?),
            MessageKind::PlayerLeftRoom => ServerMessage::PlayerLeftRoom(payload(data)?),
            MessageKind::RoomPlayersUpdated => ServerMessage::RoomPlayersUpdated(payload(data)?),
            MessageKind::CardsPurchased => ServerMessage::CardsPurchased(payload(data)?),
            MessageKind::GameEnded => ServerMessage::GameEnded(payload(data)?),
            MessageKind::PlayerWon => ServerMessage::PlayerWon(payload(data)?),
            MessageKind::VictoryConfirmed => ServerMessage::VictoryConfirmed(payload(data)?),
            MessageKind::ShowRoomClosingModal => {
                ServerMessage::ShowRoomClosingModal(payload(data)?)
            }
            MessageKind::ChatMessage => ServerMessage::ChatMessage(payload(data)?),
        };
        Ok(message)
    }

    /// Decode a `{"event": ..., "data": ...}` envelope.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        Self::decode(&envelope.event, envelope.data)
    }

    /// The message's kind.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            ServerMessage::Connected(_) => MessageKind::Connected,
            ServerMessage::Status(_) => MessageKind::Status,
            ServerMessage::NewNumber(_) => MessageKind::NewNumber,
            ServerMessage::GameStarted => MessageKind::GameStarted,
            ServerMessage::GameStopped => MessageKind::GameStopped,
            ServerMessage::GameReset => MessageKind::GameReset,
            ServerMessage::RoomJoined(_) => MessageKind::RoomJoined,
            ServerMessage::RoomLeft(_) => MessageKind::RoomLeft,
            ServerMessage::RoomJoinRejected(_) => MessageKind::RoomJoinRejected,
            ServerMessage::RoomStatusChanged => MessageKind::RoomStatusChanged,
            ServerMessage::ClientConnected(_) => MessageKind::ClientConnected,
            ServerMessage::ClientDisconnected(_) => MessageKind::ClientDisconnected,
            ServerMessage::PlayerJoinedRoom(_) => MessageKind::PlayerJoinedRoom,
            ServerMessage::PlayerLeftRoom(_) => MessageKind::PlayerLeftRoom,
            ServerMessage::RoomPlayersUpdated(_) => MessageKind::RoomPlayersUpdated,
            ServerMessage::CardsPurchased(_) => MessageKind::CardsPurchased,
            ServerMessage::GameEnded(_) => MessageKind::GameEnded,
            ServerMessage::PlayerWon(_) => MessageKind::PlayerWon,
            ServerMessage::VictoryConfirmed(_) => MessageKind::VictoryConfirmed,
            ServerMessage::ShowRoomClosingModal(_) => MessageKind::ShowRoomClosingModal,
            ServerMessage::ChatMessage(_) => MessageKind::ChatMessage,
        }
    }

    /// Roster carried by the message, if it is a roster update.
    #[must_use]
    pub fn roster(&self) -> Option<&RosterPayload> {
        match self {
            ServerMessage::ClientConnected(roster)
            | ServerMessage::ClientDisconnected(roster)
            | ServerMessage::PlayerJoinedRoom(roster)
            | ServerMessage::PlayerLeftRoom(roster)
            | ServerMessage::RoomPlayersUpdated(roster)
            | ServerMessage::CardsPurchased(roster) => Some(roster),
            _ => None,
        }
    }
}
