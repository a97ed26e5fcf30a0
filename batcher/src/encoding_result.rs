//! Encoded blob records held by the batcher between encoding and dispersal.

use disperser_types::{
    Assignment, BlobCommitments, BlobKey, BlobMetadata, BlobQuorumInfo, Frame, OperatorId,
    QuorumId,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::RequestId;

/// Bytes accounted per encoded symbol.
pub const BYTES_PER_SYMBOL: u64 = 256;
/// Fixed per-result allowance for proof data.
pub const PROOF_OVERHEAD_BYTES: u64 = 2 * BYTES_PER_SYMBOL;

/// Where an encoded blob sits in the dispersal lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncodingStatus {
    /// Encoded, waiting to be picked up by a batch.
    #[default]
    PendingDispersal,
    /// Included in a dispersed batch, waiting for on-chain confirmation.
    PendingConfirmation,
}

impl fmt::Display for EncodingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingDispersal => write!(f, "pending_dispersal"),
            Self::PendingConfirmation => write!(f, "pending_confirmation"),
        }
    }
}

/// The encoder's output for one blob in one quorum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingResult {
    pub blob_metadata: BlobMetadata,
    /// Block height the operator assignments were computed against.
    pub reference_block_number: u64,
    pub blob_quorum_info: BlobQuorumInfo,
    pub commitment: BlobCommitments,
    pub chunks: Vec<Frame>,
    pub assignments: HashMap<OperatorId, Assignment>,
}

impl EncodingResult {
    pub fn blob_key(&self) -> BlobKey {
        self.blob_metadata.blob_key()
    }

    pub fn quorum_id(&self) -> QuorumId {
        self.blob_quorum_info.quorum_id()
    }

    pub fn request_id(&self) -> RequestId {
        RequestId::new(self.blob_key(), self.quorum_id())
    }

    /// Memory footprint charged against the store for this result.
    pub fn chunks_size(&self) -> u64 {
        let symbols: u64 = self.chunks.iter().map(|c| c.len() as u64).sum();
        symbols * BYTES_PER_SYMBOL + PROOF_OVERHEAD_BYTES
    }
}

/// A stored result together with its lifecycle status at the time it was read.
///
/// Cloning is cheap: the encoded payload is shared.
#[derive(Clone, Debug)]
pub struct EncodedBlob {
    pub result: Arc<EncodingResult>,
    pub status: EncodingStatus,
}

impl EncodedBlob {
    pub fn reference_block_number(&self) -> u64 {
        self.result.reference_block_number
    }

    pub fn request_id(&self) -> RequestId {
        self.result.request_id()
    }
}

/// Why an encoding job produced no result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingFailure {
    pub blob_key: BlobKey,
    pub quorum_id: QuorumId,
    pub reason: String,
}

impl EncodingFailure {
    pub fn request_id(&self) -> RequestId {
        RequestId::new(self.blob_key, self.quorum_id)
    }
}

/// What the encoder hands back for a dispatched request.
#[derive(Clone, Debug)]
pub enum EncodingOutcome {
    Encoded(EncodingResult),
    Failed(EncodingFailure),
}

impl From<EncodingResult> for EncodingOutcome {
    fn from(result: EncodingResult) -> Self {
        Self::Encoded(result)
    }
}

impl From<EncodingFailure> for EncodingOutcome {
    fn from(failure: EncodingFailure) -> Self {
        Self::Failed(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disperser_types::{BlobHash, Coefficient, MetadataHash, SecurityParam, Timestamp};

    fn result_with_chunks(chunk_lens: &[usize]) -> EncodingResult {
        let key = BlobKey::new(BlobHash::new([1; 32]), MetadataHash::new([2; 32]));
        EncodingResult {
            blob_metadata: BlobMetadata::new(key, 4096, Timestamp::new(0)),
            reference_block_number: 10,
            blob_quorum_info: BlobQuorumInfo::new(SecurityParam::new(3, 33, 67), 8),
            commitment: BlobCommitments::default(),
            chunks: chunk_lens
                .iter()
                .map(|&n| Frame::new(Vec::new(), vec![Coefficient::default(); n]))
                .collect(),
            assignments: HashMap::new(),
        }
    }

    #[test]
    fn size_of_result_without_chunks_is_proof_overhead() {
        assert_eq!(result_with_chunks(&[]).chunks_size(), 512);
    }

    #[test]
    fn size_counts_every_symbol() {
        // (4 + 4 + 2) symbols * 256 + 512
        assert_eq!(result_with_chunks(&[4, 4, 2]).chunks_size(), 10 * 256 + 512);
    }

    #[test]
    fn proof_bytes_do_not_change_size() {
        let mut result = result_with_chunks(&[3]);
        let before = result.chunks_size();
        result.chunks[0].proof = vec![0xFF; 1000];
        assert_eq!(result.chunks_size(), before);
    }

    #[test]
    fn request_id_comes_from_metadata_and_quorum() {
        let result = result_with_chunks(&[1]);
        let id = result.request_id();
        assert_eq!(id.blob_key, result.blob_metadata.blob_key());
        assert_eq!(id.quorum_id, 3);
    }

    #[test]
    fn default_status_is_pending_dispersal() {
        assert_eq!(EncodingStatus::default(), EncodingStatus::PendingDispersal);
        assert_eq!(
            EncodingStatus::PendingConfirmation.to_string(),
            "pending_confirmation"
        );
    }
}
