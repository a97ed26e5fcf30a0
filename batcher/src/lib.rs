//! Disperser batcher — holds encoding state between the encoder and batch
//! assembly.
//!
//! The batcher:
//! - Deduplicates encoding requests per (blob, quorum)
//! - Holds encoded results until a batch picks them up
//! - Evicts results made stale by chain progress
//! - Tracks the memory held by encoded chunks for admission control

pub mod backpressure;
pub mod config;
pub mod encoded_blob_store;
pub mod encoding_result;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod request_id;

pub use backpressure::Backpressure;
pub use config::BatcherConfig;
pub use encoded_blob_store::EncodedBlobStore;
pub use encoding_result::{
    EncodedBlob, EncodingFailure, EncodingOutcome, EncodingResult, EncodingStatus,
    BYTES_PER_SYMBOL, PROOF_OVERHEAD_BYTES,
};
pub use error::BatcherError;
pub use logging::{init_from_config, init_logging, LogFormat};
pub use metrics::{BatcherMetrics, StoreSnapshot};
pub use request_id::RequestId;
