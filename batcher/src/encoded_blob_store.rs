//! Encoded blob store — the batcher's in-memory hand-off point between the
//! encoder and batch assembly.
//!
//! The encoder registers a request before it starts work on a (blob, quorum)
//! pair and later delivers the result. Batch assembly sweeps the store once per
//! observed block: results computed against that block are returned, older
//! ones are dropped. Results that made it into a dispersed batch are marked
//! pending confirmation and stay until the confirmer deletes them.
//!
//! Both collections and the byte counter live behind one lock so that a
//! request id is never both in flight and encoded, and the counter always
//! matches the results held.

use disperser_types::{BlobKey, QuorumId};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::encoding_result::{EncodedBlob, EncodingOutcome, EncodingResult, EncodingStatus};
use crate::metrics::{BatcherMetrics, StoreSnapshot};
use crate::{BatcherConfig, BatcherError, RequestId};

struct StoredResult {
    result: Arc<EncodingResult>,
    status: EncodingStatus,
    /// Footprint charged on insertion; exactly this is released on removal.
    size: u64,
}

impl StoredResult {
    fn snapshot(&self) -> EncodedBlob {
        EncodedBlob {
            result: Arc::clone(&self.result),
            status: self.status,
        }
    }
}

#[derive(Default)]
struct Inner {
    requested: HashSet<RequestId>,
    encoded: HashMap<RequestId, StoredResult>,
    /// Sum of `size` over `encoded`.
    encoded_result_size: u64,
    /// Bumped on every snapshot so metrics can drop out-of-order ones.
    seq: u64,
}

impl Inner {
    fn remove_result(&mut self, id: &RequestId) -> Option<StoredResult> {
        let removed = self.encoded.remove(id)?;
        self.encoded_result_size -= removed.size;
        Some(removed)
    }

    fn snapshot(&mut self) -> StoreSnapshot {
        self.seq += 1;
        StoreSnapshot {
            seq: self.seq,
            encoded_results: self.encoded.len(),
            encoded_result_bytes: self.encoded_result_size,
            requests_in_flight: self.requested.len(),
        }
    }
}

/// Tally of one sweep, logged once the lock is released.
#[derive(Debug, Default)]
struct SweepSummary {
    fetched: usize,
    stale: usize,
    pending_confirmation: usize,
    /// Results whose reference block is ahead of the sweep.
    future: Vec<(RequestId, u64, EncodingStatus)>,
}

/// Thread-safe store of in-flight encoding requests and encoded results.
///
/// Share it between the encoder, batch assembly and the confirmer behind an
/// `Arc`. Every method completes without blocking on anything but the store's
/// own lock.
pub struct EncodedBlobStore {
    inner: RwLock<Inner>,
    metrics: Option<Arc<BatcherMetrics>>,
}

impl EncodedBlobStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            metrics: None,
        }
    }

    /// Store that refreshes `metrics` after every mutation and sweep.
    pub fn with_metrics(metrics: Arc<BatcherMetrics>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            metrics: Some(metrics),
        }
    }

    /// Store configured by `config`, with fresh metrics when they are enabled.
    pub fn from_config(config: &BatcherConfig) -> Self {
        if config.enable_metrics {
            Self::with_metrics(Arc::new(BatcherMetrics::new()))
        } else {
            Self::new()
        }
    }

    /// Metrics this store refreshes, if any.
    pub fn metrics(&self) -> Option<&Arc<BatcherMetrics>> {
        self.metrics.as_ref()
    }

    /// Mark `(blob_key, quorum_id)` as being encoded. Repeated calls are no-ops.
    ///
    /// Returns whether the request is in flight afterwards. While a result is
    /// held for the same pair the request is not registered: the held result
    /// leaves only through the sweep or explicit deletion, after which the
    /// pair can be requested again.
    pub fn put_encoding_request(&self, blob_key: BlobKey, quorum_id: QuorumId) -> bool {
        let id = RequestId::new(blob_key, quorum_id);
        let snapshot = {
            let mut inner = self.inner.write();
            let held = inner
                .encoded
                .get(&id)
                .map(|stored| (stored.status, stored.result.reference_block_number));
            if let Some((status, reference_block)) = held {
                drop(inner);
                tracing::debug!(
                    request = %id,
                    %status,
                    ref_block_number = reference_block,
                    "result already held, ignoring encoding request"
                );
                return false;
            }
            if !inner.requested.insert(id) {
                return true;
            }
            inner.snapshot()
        };
        self.observe(snapshot);
        true
    }

    /// Whether encoding `(blob_key, quorum_id)` for `reference_block_number`
    /// would duplicate work the store already knows about.
    ///
    /// True while a request is in flight, or when a result exists that is
    /// either pending confirmation or was computed for the same block.
    pub fn has_encoding_requested(
        &self,
        blob_key: BlobKey,
        quorum_id: QuorumId,
        reference_block_number: u64,
    ) -> bool {
        let id = RequestId::new(blob_key, quorum_id);
        let inner = self.inner.read();
        if inner.requested.contains(&id) {
            return true;
        }
        inner.encoded.get(&id).is_some_and(|stored| {
            stored.status == EncodingStatus::PendingConfirmation
                || stored.result.reference_block_number == reference_block_number
        })
    }

    /// Drop the in-flight marker, if any.
    pub fn delete_encoding_request(&self, blob_key: BlobKey, quorum_id: QuorumId) {
        let snapshot = {
            let mut inner = self.inner.write();
            if !inner.requested.remove(&RequestId::new(blob_key, quorum_id)) {
                return;
            }
            inner.snapshot()
        };
        self.observe(snapshot);
    }

    /// Move a request from in flight to encoded.
    ///
    /// Fails with [`BatcherError::NoSuchRequest`], leaving the store untouched,
    /// when no matching request is in flight. A result carrying invalid
    /// security parameters is rejected with [`BatcherError::Types`] and its
    /// request stays in flight.
    pub fn put_encoding_result(&self, result: EncodingResult) -> Result<(), BatcherError> {
        result.blob_quorum_info.security_param.validate()?;
        let id = result.request_id();
        let size = result.chunks_size();
        let snapshot = {
            let mut inner = self.inner.write();
            if !inner.requested.remove(&id) {
                return Err(BatcherError::NoSuchRequest(id));
            }
            let stored = StoredResult {
                result: Arc::new(result),
                status: EncodingStatus::PendingDispersal,
                size,
            };
            // First insertion while exclusivity holds. A replaced entry gives
            // back what it was charged.
            if let Some(old) = inner.encoded.insert(id, stored) {
                inner.encoded_result_size -= old.size;
            }
            inner.encoded_result_size += size;
            inner.snapshot()
        };
        self.observe(snapshot);
        Ok(())
    }

    pub fn get_encoding_result(
        &self,
        blob_key: BlobKey,
        quorum_id: QuorumId,
    ) -> Result<EncodedBlob, BatcherError> {
        let id = RequestId::new(blob_key, quorum_id);
        self.inner
            .read()
            .encoded
            .get(&id)
            .map(StoredResult::snapshot)
            .ok_or(BatcherError::ResultNotFound(id))
    }

    /// Remove an encoded result and release its footprint. No-op if absent.
    pub fn delete_encoding_result(&self, blob_key: BlobKey, quorum_id: QuorumId) {
        let snapshot = {
            let mut inner = self.inner.write();
            if inner
                .remove_result(&RequestId::new(blob_key, quorum_id))
                .is_none()
            {
                return;
            }
            inner.snapshot()
        };
        self.observe(snapshot);
    }

    /// Exempt a result from staleness eviction until it is deleted explicitly.
    pub fn mark_encoded_result_pending_confirmation(
        &self,
        blob_key: BlobKey,
        quorum_id: QuorumId,
    ) -> Result<(), BatcherError> {
        let id = RequestId::new(blob_key, quorum_id);
        let mut inner = self.inner.write();
        let stored = inner
            .encoded
            .get_mut(&id)
            .ok_or(BatcherError::ResultNotFound(id))?;
        stored.status = EncodingStatus::PendingConfirmation;
        Ok(())
    }

    /// Return every result pending dispersal that was computed for
    /// `block_number`, and evict those computed for an earlier block.
    ///
    /// Returned results stay in the store; sweeping the same block again
    /// returns them again until they are marked pending confirmation. Results
    /// referencing a later block are left alone and reported as a warning.
    pub fn get_new_and_delete_stale_encoding_results(
        &self,
        block_number: u64,
    ) -> Vec<EncodedBlob> {
        let mut fetched = Vec::new();
        let mut summary = SweepSummary::default();
        let snapshot = {
            let mut inner = self.inner.write();
            let mut released = 0u64;
            inner.encoded.retain(|id, stored| {
                if stored.status == EncodingStatus::PendingConfirmation {
                    summary.pending_confirmation += 1;
                    return true;
                }
                let reference_block = stored.result.reference_block_number;
                match reference_block.cmp(&block_number) {
                    Ordering::Equal => {
                        fetched.push(stored.snapshot());
                        true
                    }
                    Ordering::Less => {
                        summary.stale += 1;
                        released += stored.size;
                        false
                    }
                    Ordering::Greater => {
                        summary.future.push((*id, reference_block, stored.status));
                        true
                    }
                }
            });
            inner.encoded_result_size -= released;
            inner.snapshot()
        };
        summary.fetched = fetched.len();

        for &(id, reference_block, status) in &summary.future {
            tracing::warn!(
                request = %id,
                ref_block_number = reference_block,
                block_number,
                %status,
                "encoded result references a block ahead of the current block"
            );
        }
        tracing::debug!(
            fetched = summary.fetched,
            stale = summary.stale,
            pending_confirmation = summary.pending_confirmation,
            block_number,
            encoded_size = snapshot.encoded_result_bytes,
            "consumed encoded results"
        );
        if let Some(metrics) = &self.metrics {
            metrics.observe_sweep(summary.fetched, summary.stale, summary.future.len());
        }
        self.observe(snapshot);
        fetched
    }

    /// Number of encoded results held and their total footprint in bytes.
    pub fn get_encoded_result_size(&self) -> (usize, u64) {
        let inner = self.inner.read();
        (inner.encoded.len(), inner.encoded_result_size)
    }

    /// Record what the encoder produced for a dispatched request.
    ///
    /// A failure clears the in-flight marker so the blob can be requested again.
    pub fn apply_outcome(&self, outcome: EncodingOutcome) -> Result<(), BatcherError> {
        match outcome {
            EncodingOutcome::Encoded(result) => self.put_encoding_result(result),
            EncodingOutcome::Failed(failure) => {
                tracing::debug!(
                    request = %failure.request_id(),
                    reason = %failure.reason,
                    "encoding failed, releasing request"
                );
                self.delete_encoding_request(failure.blob_key, failure.quorum_id);
                Ok(())
            }
        }
    }

    /// Lifecycle status of a stored result, if there is one.
    pub fn status(&self, blob_key: BlobKey, quorum_id: QuorumId) -> Option<EncodingStatus> {
        self.inner
            .read()
            .encoded
            .get(&RequestId::new(blob_key, quorum_id))
            .map(|stored| stored.status)
    }

    /// Number of requests dispatched to the encoder and not yet resolved.
    pub fn in_flight_count(&self) -> usize {
        self.inner.read().requested.len()
    }

    /// Snapshots are applied outside the lock; the sequence number lets the
    /// metrics ignore one overtaken by a later mutation.
    fn observe(&self, snapshot: StoreSnapshot) {
        if let Some(metrics) = &self.metrics {
            metrics.observe_store(snapshot);
        }
    }
}

impl Default for EncodedBlobStore {
    fn default() -> Self {
        Self::new()
    }
}
