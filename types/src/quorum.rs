//! Quorum identifiers and the security parameters a blob is dispersed under.

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Identifies a quorum of operators. A blob is encoded once per quorum.
pub type QuorumId = u8;

/// Security thresholds (percentages of quorum stake) requested for a quorum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityParam {
    pub quorum_id: QuorumId,
    /// Maximum share of stake assumed to be adversarial.
    pub adversary_threshold: u8,
    /// Share of stake that must sign for the blob to be confirmed.
    pub confirmation_threshold: u8,
}

impl SecurityParam {
    pub fn new(quorum_id: QuorumId, adversary_threshold: u8, confirmation_threshold: u8) -> Self {
        Self {
            quorum_id,
            adversary_threshold,
            confirmation_threshold,
        }
    }

    /// Thresholds must be percentages and leave a gap between adversary and
    /// confirmation stake, otherwise no chunk length can satisfy them.
    pub fn validate(&self) -> Result<(), TypesError> {
        let invalid = |reason: &str| TypesError::InvalidSecurityParam {
            quorum_id: self.quorum_id,
            reason: reason.to_string(),
        };
        if self.adversary_threshold > 100 || self.confirmation_threshold > 100 {
            return Err(invalid("thresholds must not exceed 100"));
        }
        if self.confirmation_threshold <= self.adversary_threshold {
            return Err(invalid(
                "confirmation threshold must exceed adversary threshold",
            ));
        }
        Ok(())
    }
}

/// Per-quorum encoding parameters attached to an encoded blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobQuorumInfo {
    pub security_param: SecurityParam,
    /// Number of symbols in each chunk for this quorum.
    pub chunk_length: u32,
}

impl BlobQuorumInfo {
    pub fn new(security_param: SecurityParam, chunk_length: u32) -> Self {
        Self {
            security_param,
            chunk_length,
        }
    }

    pub fn quorum_id(&self) -> QuorumId {
        self.security_param.quorum_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_params() {
        assert!(SecurityParam::new(0, 33, 67).validate().is_ok());
    }

    #[test]
    fn confirmation_must_exceed_adversary() {
        let err = SecurityParam::new(1, 50, 50).validate().unwrap_err();
        assert!(matches!(
            err,
            TypesError::InvalidSecurityParam { quorum_id: 1, .. }
        ));
    }

    #[test]
    fn thresholds_are_percentages() {
        assert!(SecurityParam::new(0, 10, 101).validate().is_err());
    }

    #[test]
    fn quorum_info_exposes_quorum_id() {
        let info = BlobQuorumInfo::new(SecurityParam::new(2, 33, 67), 16);
        assert_eq!(info.quorum_id(), 2);
    }
}
