//! Client → server messages.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Coord};
use crate::core::{ClientId, RoomId};
use crate::win::LineKind;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRoomRequest {
    pub room_id: RoomId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPlayerNameRequest {
    pub client_id: ClientId,
    pub player_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub client_id: ClientId,
    pub player_name: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub card_quantity: u32,
    pub total_price: f64,
}

/// A locally detected win, sent to the server for confirmation.
///
/// Advisory only: the server decides who won.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinClaim {
    pub client_id: ClientId,
    pub player_name: String,
    pub room_id: Option<RoomId>,
    pub victory_type: LineKind,
    /// Marked numbers, ascending.
    pub card: Vec<u32>,
    pub card_matrix: Card,
    pub winning_cells: Vec<Coord>,
    pub winning_numbers: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub player_name: String,
    pub message: String,
}

/// A message for the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    StartGame,
    StopGame,
    ResetGame,
    GetRoomsStatus,
    LeaveRoom(LeaveRoomRequest),
    SetPlayerName(SetPlayerNameRequest),
    PurchaseCards(PurchaseRequest),
    PlayerWon(WinClaim),
    ChatMessage(ChatRequest),
}

impl ClientMessage {
    /// Wire event name.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::StartGame => "startGame",
            ClientMessage::StopGame => "stopGame",
            ClientMessage::ResetGame => "resetGame",
            ClientMessage::GetRoomsStatus => "getRoomsStatus",
            ClientMessage::LeaveRoom(_) => "leaveRoom",
            ClientMessage::SetPlayerName(_) => "setPlayerName",
            ClientMessage::PurchaseCards(_) => "purchaseCards",
            ClientMessage::PlayerWon(_) => "playerWon",
            ClientMessage::ChatMessage(_) => "chatMessage",
        }
    }

    /// Encode as a `{"event": ..., "data": ...}` envelope.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_unit_message_envelope() {
        let json = ClientMessage::StartGame.to_json().unwrap();
        assert_eq!(json, r#"{"event":"startGame"}"#);
    }

    #[test]
    fn test_event_names_match_serde() {
        let messages = [
            ClientMessage::StopGame,
            ClientMessage::GetRoomsStatus,
            ClientMessage::LeaveRoom(LeaveRoomRequest { room_id: RoomId::new(2) }),
            ClientMessage::ChatMessage(ChatRequest {
                player_name: "Ana".into(),
                message: "hola".into(),
            }),
        ];
        for message in messages {
            let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
            assert_eq!(value["event"], message.event_name());
        }
    }

    #[test]
    fn test_purchase_payload() {
        let message = ClientMessage::PurchaseCards(PurchaseRequest {
            client_id: ClientId::new("c1"),
            player_name: "Ana".into(),
            room_id: RoomId::new(3),
            room_name: "Sala Premium".into(),
            card_quantity: 3,
            total_price: 6.0,
        });
        let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "purchaseCards",
                "data": {
                    "clientId": "c1",
                    "playerName": "Ana",
                    "roomId": 3,
                    "roomName": "Sala Premium",
                    "cardQuantity": 3,
                    "totalPrice": 6.0
                }
            })
        );
    }

    #[test]
    fn test_claim_payload_uses_wire_card() {
        let card = Card::from_wire_matrix(&[vec![1, 2], vec![16, -1]]).unwrap();
        let claim = WinClaim {
            client_id: ClientId::new("c1"),
            player_name: "Ana".into(),
            room_id: None,
            victory_type: LineKind::Column,
            card: vec![1, 2],
            card_matrix: card,
            winning_cells: vec![Coord::new(0, 0), Coord::new(0, 1)],
            winning_numbers: vec![1, 2],
        };
        let value: Value =
            serde_json::from_str(&ClientMessage::PlayerWon(claim).to_json().unwrap()).unwrap();
        let data = &value["data"];
        assert_eq!(data["victoryType"], "column");
        assert_eq!(data["cardMatrix"], json!([[1, 2], [16, -1]]));
        assert_eq!(data["winningCells"][1], json!({"col": 0, "row": 1}));
        assert_eq!(data["roomId"], Value::Null);
    }
}
