//! Winner records.
//!
//! Server winner payloads come in several shapes. They are normalized here
//! into [`WinnerRecord`] as soon as they arrive; nothing past this module
//! looks at the raw shapes.
//!
//! ## Highlighting
//!
//! Each record carries its own winning line. When the server sent the
//! winning cells they are used as-is. Otherwise the line is recomputed from
//! that record's card matrix and the marks recovered from its flat card
//! list. Numbers that repeat across positions can highlight the wrong cell
//! in that fallback; this is accepted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Coord};
use crate::core::{fallback_player_name, ClientId};
use crate::net::{CardShape, RawWinner};
use crate::win::{find_winning_line, LineKind, MarkedSet, WinningLine};

/// Name used when a winner entry carries no name and no client id.
pub const ANONYMOUS_WINNER: &str = "Jugador";

/// A normalized winner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub client_id: Option<ClientId>,
    pub player_name: String,

    /// The winning card, when the server sent its matrix.
    pub card: Option<Card>,
    /// The winner's marks, recovered from the flat card list.
    pub marked: MarkedSet,

    pub victory_type: LineKind,
    /// Highlight data for the winning line.
    pub line: Option<WinningLine>,

    /// Opaque server timestamp.
    pub timestamp: Option<String>,

    pub prize: Option<f64>,
    pub total_prize: Option<f64>,
    pub house_cut: Option<f64>,
    pub total_pool: Option<f64>,
}

/// Local session details used to fill gaps in a `victoryConfirmed`.
#[derive(Clone, Debug, Default)]
pub struct LocalWinner {
    pub client_id: Option<ClientId>,
    pub player_name: String,
    pub card: Option<Card>,
    pub marked: MarkedSet,
}

impl WinnerRecord {
    /// Normalize a broadcast winner entry.
    #[must_use]
    pub fn from_raw(raw: &RawWinner) -> Self {
        Self::normalize(raw, None)
    }

    /// Normalize a winner entry, filling missing identity, card and marks
    /// from the local session.
    #[must_use]
    pub fn from_raw_with_local(raw: &RawWinner, local: &LocalWinner) -> Self {
        Self::normalize(raw, Some(local))
    }

    fn normalize(raw: &RawWinner, local: Option<&LocalWinner>) -> Self {
        let client_id = raw
            .client_id
            .clone()
            .filter(|id| !id.as_str().is_empty())
            .or_else(|| local.and_then(|l| l.client_id.clone()));

        let player_name = raw
            .player_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| raw.winner_name.clone().filter(|name| !name.is_empty()))
            .or_else(|| local.map(|l| l.player_name.clone()).filter(|name| !name.is_empty()))
            .or_else(|| client_id.as_ref().map(fallback_player_name))
            .unwrap_or_else(|| ANONYMOUS_WINNER.to_string());

        let card = raw
            .card_matrix
            .as_ref()
            .and_then(CardShape::as_card)
            .or_else(|| raw.card.as_ref().and_then(CardShape::as_card))
            .or_else(|| local.and_then(|l| l.card.clone()));

        let marked = raw
            .card
            .as_ref()
            .and_then(CardShape::as_marks)
            .or_else(|| local.map(|l| l.marked.clone()))
            .unwrap_or_default();

        let line = server_line(raw, card.as_ref())
            .or_else(|| card.as_ref().and_then(|card| find_winning_line(card, &marked)));

        let victory_type = raw
            .victory_type
            .or_else(|| line.as_ref().map(|line| line.kind))
            .unwrap_or_default();

        let info = raw.prize_info.clone().unwrap_or_default();

        Self {
            client_id,
            player_name,
            card,
            marked,
            victory_type,
            line,
            timestamp: raw.timestamp.clone(),
            prize: raw.prize.or(info.prize_per_winner),
            total_prize: raw.total_prize.or(info.total_prize),
            house_cut: raw.house_cut.or(info.house_cut),
            total_pool: raw.total_pool.or(info.total_pool),
        }
    }

    /// Is this record about `client_id`?
    #[must_use]
    pub fn is_client(&self, client_id: &ClientId) -> bool {
        self.client_id.as_ref() == Some(client_id)
    }

    /// Cells to highlight on the winner's card.
    #[must_use]
    pub fn winning_cells(&self) -> &[Coord] {
        self.line.as_ref().map(|line| line.cells.as_slice()).unwrap_or_default()
    }

    /// Numbers on the winning line.
    #[must_use]
    pub fn winning_numbers(&self) -> &[u32] {
        self.line.as_ref().map(|line| line.numbers.as_slice()).unwrap_or_default()
    }
}

/// Winning line as reported by the server, if it sent cells.
fn server_line(raw: &RawWinner, card: Option<&Card>) -> Option<WinningLine> {
    let cells: SmallVec<[Coord; 5]> = raw
        .winning_cells
        .as_ref()
        .filter(|cells| !cells.is_empty())?
        .iter()
        .copied()
        .collect();

    let kind = raw.victory_type.unwrap_or_default();
    let numbers = match &raw.winning_numbers {
        Some(numbers) => numbers.iter().copied().collect(),
        None => cells
            .iter()
            .filter_map(|&coord| card.and_then(|card| card.get(coord)))
            .filter_map(|cell| cell.number())
            .collect(),
    };

    Some(WinningLine {
        kind,
        index: line_index(kind, &cells),
        cells,
        numbers,
    })
}

/// Row or column index shared by every cell, for straight lines.
fn line_index(kind: LineKind, cells: &[Coord]) -> Option<usize> {
    let key = |coord: &Coord| match kind {
        LineKind::Row => Some(coord.row),
        LineKind::Column => Some(coord.column),
        LineKind::Diagonal => None,
    };
    let first = key(cells.first()?)?;
    cells.iter().all(|c| key(c) == Some(first)).then_some(first)
}

/// Normalize every entry of a winner list, keeping server order.
#[must_use]
pub fn normalize_winners(entries: &[RawWinner]) -> Vec<WinnerRecord> {
    entries.iter().map(WinnerRecord::from_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::PrizeInfo;

    fn matrix() -> Vec<Vec<i64>> {
        vec![
            vec![1, 2, 3, 4, 5],
            vec![16, 17, 18, 19, 20],
            vec![31, 32, -1, 33, 34],
            vec![46, 47, 48, 49, 50],
            vec![61, 62, 63, 64, 65],
        ]
    }

    #[test]
    fn test_highlight_computed_from_own_card() {
        let raw = RawWinner {
            client_id: Some(ClientId::new("a")),
            player_name: Some("Ana".into()),
            card: Some(CardShape::Flat(vec![3, 18, 48, 63])),
            card_matrix: Some(CardShape::Matrix(matrix())),
            ..Default::default()
        };
        let record = WinnerRecord::from_raw(&raw);
        assert_eq!(record.victory_type, LineKind::Row);
        assert_eq!(record.winning_numbers(), &[3, 18, 48, 63]);
        assert_eq!(record.winning_cells().len(), 5);
        assert_eq!(record.line.as_ref().and_then(|l| l.index), Some(2));
    }

    #[test]
    fn test_server_cells_take_precedence() {
        let raw = RawWinner {
            card: Some(CardShape::Flat(vec![3, 18, 48, 63])),
            card_matrix: Some(CardShape::Matrix(matrix())),
            victory_type: Some(LineKind::Column),
            winning_cells: Some((0..5).map(|r| Coord::new(0, r)).collect()),
            ..Default::default()
        };
        let record = WinnerRecord::from_raw(&raw);
        assert_eq!(record.victory_type, LineKind::Column);
        assert_eq!(record.winning_numbers(), &[1, 2, 3, 4, 5]);
        assert_eq!(record.line.as_ref().and_then(|l| l.index), Some(0));
    }

    #[test]
    fn test_name_fallbacks() {
        let raw = RawWinner {
            winner_name: Some("Beto".into()),
            ..Default::default()
        };
        assert_eq!(WinnerRecord::from_raw(&raw).player_name, "Beto");

        let raw = RawWinner {
            client_id: Some(ClientId::new("abcdef0123")),
            ..Default::default()
        };
        assert_eq!(WinnerRecord::from_raw(&raw).player_name, "Jugador abcdef01");

        assert_eq!(WinnerRecord::from_raw(&RawWinner::default()).player_name, ANONYMOUS_WINNER);
    }

    #[test]
    fn test_prize_info_fallback() {
        let raw = RawWinner {
            total_prize: Some(100.0),
            prize_info: Some(PrizeInfo {
                prize_per_winner: Some(45.0),
                total_prize: Some(90.0),
                house_cut: Some(10.0),
                total_pool: None,
            }),
            ..Default::default()
        };
        let record = WinnerRecord::from_raw(&raw);
        assert_eq!(record.prize, Some(45.0));
        assert_eq!(record.total_prize, Some(100.0));
        assert_eq!(record.house_cut, Some(10.0));
        assert_eq!(record.total_pool, None);
    }

    #[test]
    fn test_local_fills_gaps() {
        let card = Card::from_wire_matrix(&matrix()).unwrap();
        let local = LocalWinner {
            client_id: Some(ClientId::new("me")),
            player_name: "Ana".into(),
            card: Some(card.clone()),
            marked: [46, 47, 48, 49, 50].into_iter().collect(),
        };
        let record = WinnerRecord::from_raw_with_local(&RawWinner::default(), &local);
        assert_eq!(record.client_id, Some(ClientId::new("me")));
        assert_eq!(record.player_name, "Ana");
        assert_eq!(record.card, Some(card));
        assert_eq!(record.victory_type, LineKind::Column);
        assert!(record.is_client(&ClientId::new("me")));
    }

    #[test]
    fn test_no_card_no_highlight() {
        let record = WinnerRecord::from_raw(&RawWinner {
            client_id: Some(ClientId::new("a")),
            ..Default::default()
        });
        assert!(record.winning_cells().is_empty());
        assert_eq!(record.victory_type, LineKind::Row);
    }
}
