//! Draw-acknowledgement gate.
//!
//! A drawn number is armed when it arrives and released for auto-marking
//! only once the host reports that the reveal finished. Each number is
//! released at most once, however many reveal signals or duplicate draws
//! arrive.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawGate {
    armed: Option<u32>,
    processed: FxHashSet<u32>,
}

impl DrawGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a freshly drawn number.
    ///
    /// A number still armed from an earlier draw is superseded and will not
    /// be auto-marked. Returns false if `number` was already released.
    pub fn arm(&mut self, number: u32) -> bool {
        if self.processed.contains(&number) {
            return false;
        }
        self.armed = Some(number);
        true
    }

    /// Release the armed number for marking.
    ///
    /// Returns `None` when nothing is armed or the number was released
    /// before.
    pub fn release(&mut self) -> Option<u32> {
        let number = self.armed.take()?;
        self.processed.insert(number).then_some(number)
    }

    /// Number waiting for its reveal, if any.
    #[must_use]
    pub fn armed(&self) -> Option<u32> {
        self.armed
    }

    /// Has `number` already been released?
    #[must_use]
    pub fn is_processed(&self, number: u32) -> bool {
        self.processed.contains(&number)
    }

    pub fn clear(&mut self) {
        self.armed = None;
        self.processed.clear();
    }
}
