//! Bingo cards.
//!
//! A `Card` is stored column-major: `columns[c][r]` is the cell in column
//! `c` (B, I, N, G, O) and row `r`. Generated cards are always 5×5, but
//! cards rebuilt from server payloads may be ragged, so every accessor
//! returns `Option` instead of indexing.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Position of a cell on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column index (0 = B ... 4 = O).
    #[serde(rename = "col")]
    pub column: usize,
    /// Row index (0 = top).
    pub row: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// A player's card.
///
/// Immutable once created; marking state lives in a separate set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card {
    columns: Vec<Vec<Cell>>,
}

impl Card {
    /// Build a card from its columns. No shape checks are made.
    #[must_use]
    pub fn from_columns(columns: Vec<Vec<Cell>>) -> Self {
        Self { columns }
    }

    /// Rebuild a card from a wire matrix (`-1` = FREE).
    ///
    /// Returns `None` if any cell is not a valid wire value or the matrix
    /// is empty.
    #[must_use]
    pub fn from_wire_matrix(matrix: &[Vec<i64>]) -> Option<Self> {
        if matrix.is_empty() {
            return None;
        }
        let columns = matrix
            .iter()
            .map(|column| column.iter().map(|&v| Cell::from_wire(v)).collect::<Option<Vec<_>>>())
            .collect::<Option<Vec<_>>>()?;
        Some(Self { columns })
    }

    /// Encode as a wire matrix.
    #[must_use]
    pub fn to_wire_matrix(&self) -> Vec<Vec<i64>> {
        self.columns
            .iter()
            .map(|column| column.iter().map(|cell| cell.to_wire()).collect())
            .collect()
    }

    /// All columns.
    #[must_use]
    pub fn columns(&self) -> &[Vec<Cell>] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Is the card empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get one column.
    #[must_use]
    pub fn column(&self, column: usize) -> Option<&[Cell]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Get the cell at a coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.columns.get(coord.column)?.get(coord.row).copied()
    }

    /// Is `number` printed on this card?
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.columns
            .iter()
            .any(|column| column.contains(&Cell::Number(number)))
    }

    /// Is `cell` on this card as a searchable number?
    ///
    /// Always false for FREE: it is a structural marker, not a number.
    #[must_use]
    pub fn contains_cell(&self, cell: Cell) -> bool {
        match cell {
            Cell::Number(n) => self.contains(n),
            Cell::Free => false,
        }
    }

    /// Where `number` sits on the card, if present.
    #[must_use]
    pub fn position_of(&self, number: u32) -> Option<Coord> {
        self.columns.iter().enumerate().find_map(|(c, column)| {
            column
                .iter()
                .position(|&cell| cell == Cell::Number(number))
                .map(|r| Coord::new(c, r))
        })
    }

    /// Iterate over the playable numbers, column by column.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns
            .iter()
            .flat_map(|column| column.iter().filter_map(|cell| cell.number()))
    }
}

impl std::fmt::Display for Card {
    /// Render row by row, the way the card is printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self.columns.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..rows {
            let line: Vec<String> = self
                .columns
                .iter()
                .map(|column| match column.get(row) {
                    Some(cell) => format!("{:>4}", cell.to_string()),
                    None => "    ".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card::from_wire_matrix(&[
            vec![1, 2, 3, 4, 5],
            vec![16, 17, 18, 19, 20],
            vec![31, 32, -1, 33, 34],
            vec![46, 47, 48, 49, 50],
            vec![61, 62, 63, 64, 65],
        ])
        .unwrap()
    }

    #[test]
    fn test_get() {
        let card = sample_card();
        assert_eq!(card.get(Coord::new(0, 0)), Some(Cell::Number(1)));
        assert_eq!(card.get(Coord::new(2, 2)), Some(Cell::Free));
        assert_eq!(card.get(Coord::new(5, 0)), None);
        assert_eq!(card.get(Coord::new(0, 5)), None);
    }

    #[test]
    fn test_contains() {
        let card = sample_card();
        assert!(card.contains(33));
        assert!(!card.contains(35));
        assert!(card.contains_cell(Cell::Number(61)));
        assert!(!card.contains_cell(Cell::Free));
    }

    #[test]
    fn test_position_of() {
        let card = sample_card();
        assert_eq!(card.position_of(48), Some(Coord::new(3, 2)));
        assert_eq!(card.position_of(33), Some(Coord::new(2, 3)));
        assert_eq!(card.position_of(99), None);
    }

    #[test]
    fn test_numbers_skip_free() {
        let card = sample_card();
        let numbers: Vec<u32> = card.numbers().collect();
        assert_eq!(numbers.len(), 24);
        assert!(numbers.contains(&34));
    }

    #[test]
    fn test_from_wire_matrix_rejects_bad_cells() {
        assert!(Card::from_wire_matrix(&[vec![1, 0, 3]]).is_none());
        assert!(Card::from_wire_matrix(&[]).is_none());
    }

    #[test]
    fn test_ragged_card_allowed() {
        let card = Card::from_wire_matrix(&[vec![1, 2], vec![16]]).unwrap();
        assert_eq!(card.column_count(), 2);
        assert_eq!(card.column(1).map(<[Cell]>::len), Some(1));
    }

    #[test]
    fn test_wire_roundtrip() {
        let card = sample_card();
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.starts_with("[[1,2,3,4,5],"));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
        assert_eq!(Card::from_wire_matrix(&card.to_wire_matrix()), Some(card));
    }

    #[test]
    fn test_coord_wire_form() {
        let json = serde_json::to_string(&Coord::new(2, 4)).unwrap();
        assert_eq!(json, r#"{"col":2,"row":4}"#);
    }

    #[test]
    fn test_display_rows() {
        let text = sample_card().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first.split_whitespace().collect::<Vec<_>>(), ["1", "16", "31", "46", "61"]);
        assert!(text.lines().nth(2).unwrap().contains("FREE"));
    }
}
