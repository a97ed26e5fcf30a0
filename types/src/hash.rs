//! Fixed-width 32-byte identifiers: blob hashes, metadata hashes, operator ids.

use crate::TypesError;

/// Width in bytes of every hash-like identifier in the disperser.
pub const HASH_LEN: usize = 32;

/// Decode a 64-character hex string into a 32-byte array.
pub(crate) fn decode_hash(s: &str) -> Result<[u8; HASH_LEN], TypesError> {
    let bytes = hex::decode(s).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| TypesError::InvalidLength {
        expected: HASH_LEN,
        actual,
    })
}

macro_rules! fixed_hash {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        pub struct $name([u8; $crate::hash::HASH_LEN]);

        impl $name {
            pub const ZERO: Self = Self([0u8; $crate::hash::HASH_LEN]);

            pub fn new(bytes: [u8; $crate::hash::HASH_LEN]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $crate::hash::HASH_LEN] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $crate::hash::HASH_LEN]
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({}\u{2026})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::hash::decode_hash(s).map(Self)
            }
        }
    };
}

pub(crate) use fixed_hash;

fixed_hash!(
    /// Hash of a blob's content, as assigned by the disperser API.
    BlobHash
);

fixed_hash!(
    /// Hash of a blob's request metadata.
    MetadataHash
);
