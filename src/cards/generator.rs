//! Card generation.
//!
//! Each column draws from its own slice of the number range:
//!
//! | Column | Range (defaults) |
//! |--------|------------------|
//! | B      | 1..=15           |
//! | I      | 16..=30          |
//! | N      | 31..=45          |
//! | G      | 46..=60          |
//! | O      | 61..=75          |
//!
//! The N column draws one number fewer and gets the FREE square inserted
//! at its middle row. Numbers within a column are sorted ascending.

use thiserror::Error;
use tracing::debug;

use super::card::Card;
use super::cell::Cell;
use crate::core::config::{GameConfig, CARD_SIZE, NUMBERS_PER_COLUMN};
use crate::core::rng::GameRng;

/// Column holding the FREE square.
pub const FREE_COLUMN: usize = 2;

/// Row holding the FREE square.
pub const FREE_ROW: usize = 2;

/// Card generation failures. Fatal to the call; retrying with the same
/// parameters fails the same way.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardError {
    /// Only 5×5 cards are supported.
    #[error("unsupported card size {0}, only 5x5 cards are supported")]
    InvalidSize(usize),

    /// A column's sub-range cannot supply enough distinct numbers.
    #[error("column {column} range {low}..={high} holds {available} numbers, {required} required")]
    InsufficientRange {
        column: usize,
        low: u32,
        high: u32,
        available: u32,
        required: usize,
    },

    /// Numbers start at 1; 0 collides with the FREE wire marker.
    #[error("minimum number must be at least 1")]
    ZeroMinimum,
}

/// The numeric sub-range of one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnRange {
    /// First number in the column.
    pub low: u32,
    /// Last number in the column. Below `low` when the range is empty.
    pub high: u32,
}

impl ColumnRange {
    /// Sub-range of `column` for the bounds `min..=max`.
    ///
    /// `[min + c*15, min(min + (c+1)*15 - 1, max)]`
    #[must_use]
    pub fn for_column(column: usize, min: u32, max: u32) -> Self {
        let offset = u32::try_from(column)
            .unwrap_or(u32::MAX)
            .saturating_mul(NUMBERS_PER_COLUMN);
        let low = min.saturating_add(offset);
        let high = low.saturating_add(NUMBERS_PER_COLUMN - 1).min(max);
        Self { low, high }
    }

    /// How many numbers the range holds.
    #[must_use]
    pub fn len(&self) -> u32 {
        if self.high >= self.low {
            self.high - self.low + 1
        } else {
            0
        }
    }

    /// Is the range empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does the range contain `number`?
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        (self.low..=self.high).contains(&number)
    }

    /// Every number in the range, ascending.
    #[must_use]
    pub fn numbers(&self) -> Vec<u32> {
        (self.low..=self.high).collect()
    }
}

/// Column a number belongs to, clamped to `0..=4`.
///
/// Numbers below `min` map to column 0.
#[must_use]
pub fn column_for_number(number: u32, min: u32) -> usize {
    if number < min {
        return 0;
    }
    let column = ((number - min) / NUMBERS_PER_COLUMN) as usize;
    column.min(CARD_SIZE - 1)
}

/// Every number of every column: the reference board the caller draws from.
#[must_use]
pub fn full_board(min: u32, max: u32) -> Vec<Vec<u32>> {
    (0..CARD_SIZE)
        .map(|column| ColumnRange::for_column(column, min, max).numbers())
        .collect()
}

/// Generate one card.
///
/// ```
/// use bingo_sync::cards::{generate_card, Cell, Coord};
/// use bingo_sync::core::GameRng;
///
/// let mut rng = GameRng::new(42);
/// let card = generate_card(1, 75, 5, &mut rng).unwrap();
/// assert_eq!(card.get(Coord::new(2, 2)), Some(Cell::Free));
/// ```
pub fn generate_card(min: u32, max: u32, size: usize, rng: &mut GameRng) -> Result<Card, CardError> {
    if size != CARD_SIZE {
        return Err(CardError::InvalidSize(size));
    }
    if min == 0 {
        return Err(CardError::ZeroMinimum);
    }

    // Check every column before drawing so a failure consumes no randomness.
    let ranges: Vec<ColumnRange> = (0..CARD_SIZE)
        .map(|column| ColumnRange::for_column(column, min, max))
        .collect();
    for (column, range) in ranges.iter().enumerate() {
        let required = numbers_needed(column, size);
        if (range.len() as usize) < required {
            return Err(CardError::InsufficientRange {
                column,
                low: range.low,
                high: range.high,
                available: range.len(),
                required,
            });
        }
    }

    let columns = ranges
        .iter()
        .enumerate()
        .map(|(column, range)| {
            let mut picks = rng.sample_distinct(range.low, range.high, numbers_needed(column, size));
            picks.sort_unstable();

            let mut cells: Vec<Cell> = picks.into_iter().map(Cell::Number).collect();
            if column == FREE_COLUMN {
                cells.insert(FREE_ROW, Cell::Free);
            }
            cells
        })
        .collect();

    Ok(Card::from_columns(columns))
}

fn numbers_needed(column: usize, size: usize) -> usize {
    if column == FREE_COLUMN {
        size - 1
    } else {
        size
    }
}

/// Card factory bound to a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardGenerator {
    min: u32,
    max: u32,
    size: usize,
}

impl CardGenerator {
    /// Create a generator for the given bounds and size.
    #[must_use]
    pub const fn new(min: u32, max: u32, size: usize) -> Self {
        Self { min, max, size }
    }

    /// Create a generator from a game configuration.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.min_number, config.max_number, config.card_size)
    }

    /// Generate one card.
    pub fn generate(&self, rng: &mut GameRng) -> Result<Card, CardError> {
        generate_card(self.min, self.max, self.size, rng)
    }

    /// Generate one card per purchased unit.
    pub fn generate_many(&self, count: usize, rng: &mut GameRng) -> Result<Vec<Card>, CardError> {
        let cards = (0..count)
            .map(|_| self.generate(rng))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count, min = self.min, max = self.max, "generated cards");
        Ok(cards)
    }

    /// Sub-range of one column under this generator's bounds.
    #[must_use]
    pub fn column_range(&self, column: usize) -> ColumnRange {
        ColumnRange::for_column(column, self.min, self.max)
    }
}

impl Default for CardGenerator {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Coord;

    #[test]
    fn test_column_ranges_default() {
        let ranges: Vec<(u32, u32)> = (0..5)
            .map(|c| {
                let r = ColumnRange::for_column(c, 1, 75);
                (r.low, r.high)
            })
            .collect();
        assert_eq!(ranges, vec![(1, 15), (16, 30), (31, 45), (46, 60), (61, 75)]);
    }

    #[test]
    fn test_column_range_clamped_to_max() {
        let range = ColumnRange::for_column(4, 1, 70);
        assert_eq!((range.low, range.high), (61, 70));
        assert_eq!(range.len(), 10);

        let empty = ColumnRange::for_column(4, 1, 50);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_column_for_number() {
        assert_eq!(column_for_number(1, 1), 0);
        assert_eq!(column_for_number(15, 1), 0);
        assert_eq!(column_for_number(16, 1), 1);
        assert_eq!(column_for_number(45, 1), 2);
        assert_eq!(column_for_number(75, 1), 4);
        assert_eq!(column_for_number(90, 1), 4);
        assert_eq!(column_for_number(0, 1), 0);
    }

    #[test]
    fn test_full_board() {
        let board = full_board(1, 75);
        assert_eq!(board.len(), 5);
        assert!(board.iter().all(|column| column.len() == 15));
        assert_eq!(board[2][0], 31);
        assert_eq!(board[4][14], 75);
    }

    #[test]
    fn test_generate_card_shape() {
        let mut rng = GameRng::new(42);
        let card = generate_card(1, 75, 5, &mut rng).unwrap();

        assert_eq!(card.column_count(), 5);
        for column in card.columns() {
            assert_eq!(column.len(), 5);
        }
        assert_eq!(card.get(Coord::new(FREE_COLUMN, FREE_ROW)), Some(Cell::Free));
        assert_eq!(card.numbers().count(), 24);
    }

    #[test]
    fn test_generate_card_columns_sorted_and_in_range() {
        let mut rng = GameRng::new(3);
        let card = generate_card(1, 75, 5, &mut rng).unwrap();

        for (c, column) in card.columns().iter().enumerate() {
            let range = ColumnRange::for_column(c, 1, 75);
            let numbers: Vec<u32> = column.iter().filter_map(|cell| cell.number()).collect();
            assert!(numbers.iter().all(|&n| range.contains(n)));
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_generate_card_invalid_size() {
        let mut rng = GameRng::new(42);
        assert_eq!(generate_card(1, 75, 4, &mut rng), Err(CardError::InvalidSize(4)));
        assert_eq!(generate_card(1, 75, 6, &mut rng), Err(CardError::InvalidSize(6)));
    }

    #[test]
    fn test_generate_card_insufficient_range() {
        let mut rng = GameRng::new(42);
        let err = generate_card(1, 63, 5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            CardError::InsufficientRange {
                column: 4,
                low: 61,
                high: 63,
                available: 3,
                required: 5,
            }
        );
    }

    #[test]
    fn test_generate_card_inverted_bounds() {
        let mut rng = GameRng::new(42);
        let err = generate_card(50, 10, 5, &mut rng).unwrap_err();
        assert!(matches!(err, CardError::InsufficientRange { column: 0, available: 0, .. }));
    }

    #[test]
    fn test_generate_card_zero_minimum() {
        let mut rng = GameRng::new(42);
        let before = rng.state();
        assert_eq!(generate_card(0, 74, 5, &mut rng), Err(CardError::ZeroMinimum));
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_centre_column_needs_one_fewer() {
        assert_eq!(numbers_needed(FREE_COLUMN, 5), 4);
        assert_eq!(numbers_needed(0, 5), 5);
        assert_eq!(numbers_needed(4, 5), 5);
    }

    #[test]
    fn test_generate_deterministic() {
        let generator = CardGenerator::default();
        let a = generator.generate(&mut GameRng::new(9)).unwrap();
        let b = generator.generate(&mut GameRng::new(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_many() {
        let generator = CardGenerator::default();
        let mut rng = GameRng::new(11);
        let cards = generator.generate_many(3, &mut rng).unwrap();
        assert_eq!(cards.len(), 3);
        assert_ne!(cards[0], cards[1]);
    }

    #[test]
    fn test_error_display() {
        let err = CardError::InvalidSize(3);
        assert_eq!(err.to_string(), "unsupported card size 3, only 5x5 cards are supported");
    }
}
