//! The set of numbers a player has marked.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::cards::Cell;

/// Numbers confirmed as drawn and acknowledged.
///
/// FREE is never stored but always counts as marked. The set only grows
/// during a game; it is cleared on reset or when leaving the room.
/// Backed by a persistent ordered set: clones are O(1) and iteration is
/// ascending, which keeps claim payloads deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkedSet {
    numbers: OrdSet<u32>,
}

impl MarkedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a flat wire list, keeping only positive numbers.
    ///
    /// Server payloads send a winner's marks as a plain array that may
    /// include the FREE marker or padding.
    #[must_use]
    pub fn from_wire_numbers(values: &[i64]) -> Self {
        values
            .iter()
            .filter(|&&v| v > 0)
            .filter_map(|&v| u32::try_from(v).ok())
            .collect()
    }

    /// Mark a number. Returns true if it was not marked before.
    pub fn insert(&mut self, number: u32) -> bool {
        self.numbers.insert(number).is_none()
    }

    /// Is `number` marked?
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        self.numbers.contains(&number)
    }

    /// Does `cell` count as marked? FREE always does.
    #[must_use]
    pub fn is_satisfied(&self, cell: Cell) -> bool {
        match cell {
            Cell::Free => true,
            Cell::Number(n) => self.contains(n),
        }
    }

    /// Number of marked numbers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Is nothing marked?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.numbers.iter().copied()
    }

    /// Ascending list of marked numbers.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Forget every mark.
    pub fn clear(&mut self) {
        self.numbers = OrdSet::new();
    }
}

impl FromIterator<u32> for MarkedSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            numbers: iter.into_iter().collect(),
        }
    }
}

impl Extend<u32> for MarkedSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for number in iter {
            self.numbers.insert(number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_new() {
        let mut marked = MarkedSet::new();
        assert!(marked.insert(7));
        assert!(!marked.insert(7));
        assert_eq!(marked.len(), 1);
    }

    #[test]
    fn test_free_always_satisfied() {
        let marked = MarkedSet::new();
        assert!(marked.is_satisfied(Cell::Free));
        assert!(!marked.is_satisfied(Cell::Number(3)));
    }

    #[test]
    fn test_iteration_is_ascending() {
        let marked: MarkedSet = [40, 3, 17].into_iter().collect();
        assert_eq!(marked.to_vec(), vec![3, 17, 40]);
    }

    #[test]
    fn test_from_wire_numbers_drops_non_positive() {
        let marked = MarkedSet::from_wire_numbers(&[5, -1, 0, 12, 5]);
        assert_eq!(marked.to_vec(), vec![5, 12]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a: MarkedSet = [1, 2].into_iter().collect();
        let b = a.clone();
        a.insert(3);
        assert_eq!(b.len(), 2);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut marked: MarkedSet = [1, 2].into_iter().collect();
        marked.clear();
        assert!(marked.is_empty());
    }

    #[test]
    fn test_serde() {
        let marked: MarkedSet = [9, 4].into_iter().collect();
        let json = serde_json::to_string(&marked).unwrap();
        assert_eq!(json, "[4,9]");
        let back: MarkedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, marked);
    }
}
