//! Admission control for the encoder, driven by the store's size accounting.

use crate::{BatcherConfig, EncodedBlobStore};

/// Decides whether more encoding work may be dispatched, and whether enough
/// encoded data has piled up to assemble a batch early.
///
/// Each decision reads one consistent `(count, bytes)` snapshot of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backpressure {
    max_encoded_results: usize,
    max_encoded_result_bytes: u64,
    encoded_size_threshold: u64,
}

impl Backpressure {
    pub fn new(
        max_encoded_results: usize,
        max_encoded_result_bytes: u64,
        encoded_size_threshold: u64,
    ) -> Self {
        Self {
            max_encoded_results,
            max_encoded_result_bytes,
            encoded_size_threshold,
        }
    }

    pub fn from_config(config: &BatcherConfig) -> Self {
        Self::new(
            config.max_encoded_results,
            config.max_encoded_result_bytes,
            config.encoded_size_threshold,
        )
    }

    /// True while both the result count and the byte total are below their limits.
    pub fn admits(&self, store: &EncodedBlobStore) -> bool {
        let (count, bytes) = store.get_encoded_result_size();
        let admitted = count < self.max_encoded_results && bytes < self.max_encoded_result_bytes;
        if !admitted {
            tracing::debug!(count, bytes, "encoded blob store full, holding back encoding");
        }
        admitted
    }

    /// True once the held bytes reach the configured threshold. Never true
    /// when the threshold is zero.
    pub fn threshold_reached(&self, store: &EncodedBlobStore) -> bool {
        if self.encoded_size_threshold == 0 {
            return false;
        }
        let (_, bytes) = store.get_encoded_result_size();
        bytes >= self.encoded_size_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodingResult;
    use disperser_types::{
        BlobCommitments, BlobHash, BlobKey, BlobMetadata, BlobQuorumInfo, Coefficient, Frame,
        MetadataHash, SecurityParam, Timestamp,
    };
    use std::collections::HashMap;

    /// Store one result per entry of `symbols`, each with a single chunk.
    fn store_with(symbols: &[usize]) -> EncodedBlobStore {
        let store = EncodedBlobStore::new();
        for (i, &n) in symbols.iter().enumerate() {
            let key = BlobKey::new(BlobHash::new([i as u8; 32]), MetadataHash::ZERO);
            store.put_encoding_request(key, 0);
            store
                .put_encoding_result(EncodingResult {
                    blob_metadata: BlobMetadata::new(key, 0, Timestamp::EPOCH),
                    reference_block_number: 1,
                    blob_quorum_info: BlobQuorumInfo::new(SecurityParam::new(0, 33, 67), 1),
                    commitment: BlobCommitments::default(),
                    chunks: vec![Frame::new(Vec::new(), vec![Coefficient::default(); n])],
                    assignments: HashMap::new(),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn empty_store_is_admitted() {
        let bp = Backpressure::from_config(&BatcherConfig::default());
        assert!(bp.admits(&EncodedBlobStore::new()));
    }

    #[test]
    fn count_limit_blocks_admission() {
        let bp = Backpressure::new(2, u64::MAX, 0);
        assert!(bp.admits(&store_with(&[1])));
        assert!(!bp.admits(&store_with(&[1, 1])));
    }

    #[test]
    fn byte_limit_blocks_admission() {
        // One symbol: 256 + 512 bytes.
        let bp = Backpressure::new(usize::MAX, 768, 0);
        assert!(!bp.admits(&store_with(&[1])));
        assert!(bp.admits(&store_with(&[])));
    }

    #[test]
    fn zero_threshold_never_fires() {
        let bp = Backpressure::new(usize::MAX, u64::MAX, 0);
        assert!(!bp.threshold_reached(&store_with(&[100, 100])));
    }

    #[test]
    fn threshold_fires_at_footprint() {
        let bp = Backpressure::new(usize::MAX, u64::MAX, 2 * 768);
        assert!(!bp.threshold_reached(&store_with(&[1])));
        assert!(bp.threshold_reached(&store_with(&[1, 1])));
    }
}
