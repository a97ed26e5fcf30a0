//! Errors raised while parsing or validating disperser value types.

use thiserror::Error;

use crate::QuorumId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("malformed blob key: {0}")]
    MalformedBlobKey(String),

    #[error("invalid security parameters for quorum {quorum_id}: {reason}")]
    InvalidSecurityParam { quorum_id: QuorumId, reason: String },
}
