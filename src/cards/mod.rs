//! Cards: cells, card layout, and generation.
//!
//! ## Key Types
//!
//! - `Cell`: A number or the FREE square (`-1` on the wire)
//! - `Card`: Column-major 5×5 grid, immutable once generated
//! - `Coord`: Column/row address of a cell
//! - `CardGenerator`: Draws cards from per-column number ranges
//!
//! Marking state is not part of a card; see [`crate::win::MarkedSet`].

pub mod card;
pub mod cell;
pub mod generator;

pub use card::{Card, Coord};
pub use cell::{Cell, FREE_WIRE_VALUE};
pub use generator::{
    column_for_number, full_board, generate_card, CardError, CardGenerator, ColumnRange,
    FREE_COLUMN, FREE_ROW,
};
