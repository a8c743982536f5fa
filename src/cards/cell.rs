//! Card cells.
//!
//! A cell is either a playable number or the FREE centre square. On the
//! wire both are plain integers, with `-1` standing for FREE.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire value of the FREE square.
pub const FREE_WIRE_VALUE: i64 = -1;

/// One square of a bingo card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A playable number (always positive).
    Number(u32),
    /// The FREE centre square; always counts as marked.
    Free,
}

impl Cell {
    /// Decode a wire integer. Returns `None` for values that are neither
    /// positive numbers nor the FREE marker.
    #[must_use]
    pub fn from_wire(value: i64) -> Option<Self> {
        if value == FREE_WIRE_VALUE {
            Some(Cell::Free)
        } else if value > 0 {
            u32::try_from(value).ok().map(Cell::Number)
        } else {
            None
        }
    }

    /// Encode as a wire integer.
    #[must_use]
    pub fn to_wire(self) -> i64 {
        match self {
            Cell::Number(n) => i64::from(n),
            Cell::Free => FREE_WIRE_VALUE,
        }
    }

    /// The number on this cell, if any.
    #[must_use]
    pub fn number(self) -> Option<u32> {
        match self {
            Cell::Number(n) => Some(n),
            Cell::Free => None,
        }
    }

    /// Is this the FREE square?
    #[must_use]
    pub fn is_free(self) -> bool {
        matches!(self, Cell::Free)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Free => f.write_str("FREE"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Cell::from_wire(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid card cell value {}", value)))
    }
}
