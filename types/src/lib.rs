//! Value types shared by the disperser pipeline.
//!
//! Blob identities, quorum and operator parameters, and the shape of the
//! encoder's output. Everything here is plain data: no locking, no I/O.

pub mod blob;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod operator;
pub mod quorum;
pub mod time;

pub use blob::{BlobKey, BlobMetadata};
pub use encoding::{BlobCommitments, Coefficient, Frame};
pub use error::TypesError;
pub use hash::{BlobHash, MetadataHash};
pub use operator::{Assignment, OperatorId};
pub use quorum::{BlobQuorumInfo, QuorumId, SecurityParam};
pub use time::Timestamp;
