//! Win detection.
//!
//! - [`MarkedSet`]: numbers the player has acknowledged (FREE always counts)
//! - [`WinningLine`]: which line completed, its cells and numbers
//! - [`find_winning_line`]: deterministic first-match scan
//!
//! [`check_bingo`] and [`classify_victory`] are thin views over
//! [`find_winning_line`], so the three can never disagree.

mod detector;
mod line;
mod marked;

pub use detector::{check_bingo, classify_victory, find_winning_line};
pub use line::{LineKind, WinningLine};
pub use marked::MarkedSet;
