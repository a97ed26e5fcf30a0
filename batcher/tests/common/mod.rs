//! Fixtures shared by the batcher integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use disperser_batcher::EncodingResult;
use disperser_types::{
    Assignment, BlobCommitments, BlobHash, BlobKey, BlobMetadata, BlobQuorumInfo, Coefficient,
    Frame, MetadataHash, OperatorId, QuorumId, SecurityParam, Timestamp,
};

pub fn blob_key(n: u16) -> BlobKey {
    let mut blob = [0u8; 32];
    blob[..2].copy_from_slice(&n.to_be_bytes());
    let mut metadata = [0xEEu8; 32];
    metadata[..2].copy_from_slice(&n.to_be_bytes());
    BlobKey::new(BlobHash::new(blob), MetadataHash::new(metadata))
}

/// An encoded blob with one chunk per entry of `chunk_lens`, spread over two operators.
pub fn encoding_result(
    blob_key: BlobKey,
    quorum_id: QuorumId,
    reference_block_number: u64,
    chunk_lens: &[usize],
) -> EncodingResult {
    let chunks: Vec<Frame> = chunk_lens
        .iter()
        .map(|&n| Frame::new(vec![0xAB; 64], vec![Coefficient([7; 32]); n]))
        .collect();
    let half = (chunks.len() / 2) as u32;
    let total = chunks.len() as u32;
    let assignments = HashMap::from([
        (OperatorId::new([1; 32]), Assignment::new(0, half)),
        (OperatorId::new([2; 32]), Assignment::new(half, total - half)),
    ]);
    EncodingResult {
        blob_metadata: BlobMetadata::new(blob_key, 2048, Timestamp::new(1_700_000_000)),
        reference_block_number,
        blob_quorum_info: BlobQuorumInfo::new(SecurityParam::new(quorum_id, 33, 67), 4),
        commitment: BlobCommitments {
            commitment: vec![1; 64],
            length_commitment: vec![2; 128],
            length_proof: vec![3; 128],
            length: 16,
        },
        chunks,
        assignments,
    }
}
