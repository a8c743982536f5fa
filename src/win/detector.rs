//! Win detection.
//!
//! Lines are scanned in a fixed order and the first complete one wins:
//!
//! 1. Rows 0 → 4
//! 2. Columns 0 → 4 (each over its actual length)
//! 3. Main diagonal, `(i, i)`
//! 4. Anti-diagonal, `(4 - i, i)`
//!
//! A line that runs off a ragged card is simply not complete.

use smallvec::SmallVec;

use super::line::{LineKind, WinningLine};
use super::marked::MarkedSet;
use crate::cards::{Card, Coord};
use crate::core::config::CARD_SIZE;

/// Find the first complete line on `card`, if any.
///
/// Pure: neither argument is modified and repeated calls agree.
#[must_use]
pub fn find_winning_line(card: &Card, marked: &MarkedSet) -> Option<WinningLine> {
    for row in 0..CARD_SIZE {
        let coords = (0..CARD_SIZE).map(|column| Coord::new(column, row));
        if let Some(line) = scan_line(card, marked, LineKind::Row, Some(row), coords) {
            return Some(line);
        }
    }

    for column in 0..CARD_SIZE {
        let len = card.column(column).map_or(0, <[_]>::len);
        if len == 0 {
            continue;
        }
        let coords = (0..len).map(|row| Coord::new(column, row));
        if let Some(line) = scan_line(card, marked, LineKind::Column, Some(column), coords) {
            return Some(line);
        }
    }

    let main = (0..CARD_SIZE).map(|i| Coord::new(i, i));
    if let Some(line) = scan_line(card, marked, LineKind::Diagonal, None, main) {
        return Some(line);
    }

    let anti = (0..CARD_SIZE).map(|i| Coord::new(CARD_SIZE - 1 - i, i));
    scan_line(card, marked, LineKind::Diagonal, None, anti)
}

/// Does `card` have any complete line?
#[must_use]
pub fn check_bingo(card: &Card, marked: &MarkedSet) -> bool {
    find_winning_line(card, marked).is_some()
}

/// Kind of the winning line, `Row` when none is found.
///
/// Only for callers that already know a line exists.
#[must_use]
pub fn classify_victory(card: &Card, marked: &MarkedSet) -> LineKind {
    find_winning_line(card, marked).map_or(LineKind::Row, |line| line.kind)
}

fn scan_line(
    card: &Card,
    marked: &MarkedSet,
    kind: LineKind,
    index: Option<usize>,
    coords: impl Iterator<Item = Coord>,
) -> Option<WinningLine> {
    let mut cells = SmallVec::new();
    let mut numbers = SmallVec::new();

    for coord in coords {
        let cell = card.get(coord)?;
        if !marked.is_satisfied(cell) {
            return None;
        }
        cells.push(coord);
        if let Some(n) = cell.number() {
            numbers.push(n);
        }
    }

    Some(WinningLine {
        kind,
        index,
        cells,
        numbers,
    })
}
