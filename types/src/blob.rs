//! Blob identity and the descriptive metadata the disperser keeps per blob.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hash::{BlobHash, MetadataHash};
use crate::time::Timestamp;
use crate::TypesError;

/// Identity of a submitted blob: its content hash paired with its metadata hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlobKey {
    pub blob_hash: BlobHash,
    pub metadata_hash: MetadataHash,
}

impl BlobKey {
    pub fn new(blob_hash: BlobHash, metadata_hash: MetadataHash) -> Self {
        Self {
            blob_hash,
            metadata_hash,
        }
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.blob_hash, self.metadata_hash)
    }
}

impl FromStr for BlobKey {
    type Err = TypesError;

    /// Parse the `"<blob hash>-<metadata hash>"` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (blob, metadata) = s
            .split_once('-')
            .ok_or_else(|| TypesError::MalformedBlobKey(s.to_string()))?;
        Ok(Self {
            blob_hash: blob.parse()?,
            metadata_hash: metadata.parse()?,
        })
    }
}

/// Metadata recorded for a blob when it was accepted by the disperser.
///
/// Only the two hashes matter to the batcher; the rest is carried through
/// unchanged for downstream stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetadata {
    pub blob_hash: BlobHash,
    pub metadata_hash: MetadataHash,
    /// Size of the unencoded blob in bytes.
    pub blob_size: u64,
    /// Number of times dispersal of this blob has been retried.
    pub num_retries: u32,
    /// When the client submitted the blob.
    pub requested_at: Timestamp,
}

impl BlobMetadata {
    pub fn new(blob_key: BlobKey, blob_size: u64, requested_at: Timestamp) -> Self {
        Self {
            blob_hash: blob_key.blob_hash,
            metadata_hash: blob_key.metadata_hash,
            blob_size,
            num_retries: 0,
            requested_at,
        }
    }

    pub fn blob_key(&self) -> BlobKey {
        BlobKey::new(self.blob_hash, self.metadata_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(a: u8, b: u8) -> BlobKey {
        BlobKey::new(BlobHash::new([a; 32]), MetadataHash::new([b; 32]))
    }

    #[test]
    fn display_joins_hashes_with_dash() {
        let k = key(0x0f, 0xf0);
        assert_eq!(k.to_string(), format!("{}-{}", "0f".repeat(32), "f0".repeat(32)));
    }

    #[test]
    fn parse_display_form() {
        let k = key(7, 9);
        let parsed: BlobKey = k.to_string().parse().expect("valid key");
        assert_eq!(parsed, k);
    }

    #[test]
    fn parse_without_separator_fails() {
        let err = "ab".repeat(64).parse::<BlobKey>().unwrap_err();
        assert!(matches!(err, TypesError::MalformedBlobKey(_)));
    }

    #[test]
    fn keys_differing_only_in_metadata_are_distinct() {
        assert_ne!(key(1, 2), key(1, 3));
    }

    #[test]
    fn metadata_blob_key() {
        let k = key(3, 4);
        let meta = BlobMetadata::new(k, 1024, Timestamp::new(1_700_000_000));
        assert_eq!(meta.blob_key(), k);
        assert_eq!(meta.num_retries, 0);
    }
}
