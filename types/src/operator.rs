//! Operator identity and the range of chunks assigned to each operator.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::hash::fixed_hash;

fixed_hash!(
    /// Identifies a registered network operator.
    OperatorId
);

/// A contiguous range of chunk indices held by one operator for one blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub start_index: u32,
    pub num_chunks: u32,
}

impl Assignment {
    pub fn new(start_index: u32, num_chunks: u32) -> Self {
        Self {
            start_index,
            num_chunks,
        }
    }

    /// One past the last assigned chunk index.
    pub fn end_index(&self) -> u32 {
        self.start_index.saturating_add(self.num_chunks)
    }

    pub fn indices(&self) -> Range<u32> {
        self.start_index..self.end_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_cover_assigned_range() {
        let a = Assignment::new(4, 3);
        assert_eq!(a.indices().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(a.end_index(), 7);
    }

    #[test]
    fn empty_assignment() {
        assert_eq!(Assignment::new(9, 0).indices().count(), 0);
    }

    #[test]
    fn operator_id_parses_hex() {
        let id = OperatorId::new([0x42; 32]);
        assert_eq!(id.to_string().parse::<OperatorId>().unwrap(), id);
    }
}
