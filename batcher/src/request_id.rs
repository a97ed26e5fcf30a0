//! Composite identity of one encoding job: a blob encoded for one quorum.

use disperser_types::{BlobKey, QuorumId};
use std::fmt;

/// Identifies an encoding request. Two requests are the same iff both the
/// blob key and the quorum match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId {
    pub blob_key: BlobKey,
    pub quorum_id: QuorumId,
}

impl RequestId {
    pub fn new(blob_key: BlobKey, quorum_id: QuorumId) -> Self {
        Self {
            blob_key,
            quorum_id,
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.blob_key, self.quorum_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disperser_types::{BlobHash, MetadataHash};
    use std::collections::HashSet;

    fn key(n: u8) -> BlobKey {
        BlobKey::new(BlobHash::new([n; 32]), MetadataHash::new([n; 32]))
    }

    #[test]
    fn same_blob_different_quorum_is_different_request() {
        assert_ne!(RequestId::new(key(1), 0), RequestId::new(key(1), 1));
    }

    #[test]
    fn equal_components_hash_equal() {
        let mut set = HashSet::new();
        set.insert(RequestId::new(key(2), 3));
        assert!(set.contains(&RequestId::new(key(2), 3)));
        assert!(!set.contains(&RequestId::new(key(3), 3)));
    }

    #[test]
    fn display_appends_quorum() {
        let id = RequestId::new(key(0xAA), 7);
        assert!(id.to_string().ends_with("-7"));
        assert!(id.to_string().starts_with(&key(0xAA).to_string()));
    }
}
