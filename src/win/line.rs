//! Winning line descriptions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Coord;

/// Which kind of line completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// A horizontal line.
    #[default]
    Row,
    /// A vertical line.
    Column,
    /// Either diagonal.
    Diagonal,
}

impl LineKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LineKind::Row => "row",
            LineKind::Column => "column",
            LineKind::Diagonal => "diagonal",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed line on a card.
///
/// Used to highlight the win and as the detail sent with a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Row, column or diagonal.
    pub kind: LineKind,

    /// Row or column index. `None` for diagonals.
    pub index: Option<usize>,

    /// Cells spanning the line, in scan order.
    pub cells: SmallVec<[Coord; 5]>,

    /// Non-FREE numbers on the line, in scan order.
    pub numbers: SmallVec<[u32; 5]>,
}

impl WinningLine {
    /// Does the line pass through `coord`?
    #[must_use]
    pub fn covers(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_string(&LineKind::Row).unwrap(), "\"row\"");
        assert_eq!(serde_json::to_string(&LineKind::Diagonal).unwrap(), "\"diagonal\"");

        let kind: LineKind = serde_json::from_str("\"column\"").unwrap();
        assert_eq!(kind, LineKind::Column);
        assert_eq!(kind.to_string(), "column");
    }

    #[test]
    fn test_default_kind_is_row() {
        assert_eq!(LineKind::default(), LineKind::Row);
    }

    #[test]
    fn test_covers() {
        let line = WinningLine {
            kind: LineKind::Column,
            index: Some(1),
            cells: (0..5).map(|r| Coord::new(1, r)).collect(),
            numbers: smallvec![16, 17, 18, 19, 20],
        };
        assert!(line.covers(Coord::new(1, 3)));
        assert!(!line.covers(Coord::new(2, 3)));
    }
}
