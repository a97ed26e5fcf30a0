//! Output of the erasure encoder: chunk frames and the blob commitments.
//!
//! The batcher never inspects these values beyond counting symbols; the
//! encoding and commitment algorithms live outside this workspace.

use serde::{Deserialize, Serialize};

/// Width in bytes of one serialized field element.
pub const COEFFICIENT_LEN: usize = 32;

/// A single erasure-coded symbol (a serialized field element).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coefficient(pub [u8; COEFFICIENT_LEN]);

/// One chunk of an encoded blob, together with its opening proof.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Serialized multi-reveal proof for this chunk.
    pub proof: Vec<u8>,
    pub coeffs: Vec<Coefficient>,
}

impl Frame {
    pub fn new(proof: Vec<u8>, coeffs: Vec<Coefficient>) -> Self {
        Self { proof, coeffs }
    }

    /// Number of symbols carried by this chunk.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

/// Commitments binding the encoded blob, opaque to the batcher.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobCommitments {
    pub commitment: Vec<u8>,
    pub length_commitment: Vec<u8>,
    pub length_proof: Vec<u8>,
    /// Blob length in symbols.
    pub length: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_len_counts_symbols() {
        let frame = Frame::new(vec![0; 48], vec![Coefficient::default(); 5]);
        assert_eq!(frame.len(), 5);
        assert!(!frame.is_empty());
        assert!(Frame::default().is_empty());
    }
}
