//! Prometheus metrics for the batcher's encoded blob store.
//!
//! [`BatcherMetrics`] owns a dedicated [`Registry`]; whatever serves the
//! node's `/metrics` endpoint can render it with [`BatcherMetrics::encode_text`].
//! One instance serves one store: store snapshots are ordered by a per-store
//! sequence number.

use parking_lot::Mutex;
use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, IntCounter,
    IntGauge, Opts, Registry, TextEncoder,
};

use crate::BatcherError;

/// Point-in-time sizes of the store, captured under its lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Orders snapshots of the same store; later mutations carry larger values.
    pub seq: u64,
    pub encoded_results: usize,
    pub encoded_result_bytes: u64,
    pub requests_in_flight: usize,
}

pub struct BatcherMetrics {
    pub registry: Registry,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Encoded results currently held.
    pub encoded_results: IntGauge,
    /// Aggregate chunk footprint of the held results, in bytes.
    pub encoded_result_bytes: IntGauge,
    /// Encoding requests dispatched but not yet resolved.
    pub encoding_requests_in_flight: IntGauge,

    // ── Counters ────────────────────────────────────────────────────────
    pub encoded_results_fetched: IntCounter,
    pub encoded_results_stale: IntCounter,
    /// Results skipped because their reference block is ahead of the sweep.
    pub encoded_results_future: IntCounter,

    /// Sequence number of the newest snapshot applied to the gauges.
    last_seq: Mutex<u64>,
}

impl BatcherMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let encoded_results = register_int_gauge_with_registry!(
            Opts::new(
                "batcher_encoded_results",
                "Encoded results held by the batcher"
            ),
            registry
        )
        .expect("failed to register encoded_results gauge");

        let encoded_result_bytes = register_int_gauge_with_registry!(
            Opts::new(
                "batcher_encoded_result_bytes",
                "Total chunk footprint of encoded results in bytes"
            ),
            registry
        )
        .expect("failed to register encoded_result_bytes gauge");

        let encoding_requests_in_flight = register_int_gauge_with_registry!(
            Opts::new(
                "batcher_encoding_requests_in_flight",
                "Encoding requests awaiting a result"
            ),
            registry
        )
        .expect("failed to register encoding_requests_in_flight gauge");

        let encoded_results_fetched = register_int_counter_with_registry!(
            Opts::new(
                "batcher_encoded_results_fetched_total",
                "Fresh encoded results returned by sweeps"
            ),
            registry
        )
        .expect("failed to register encoded_results_fetched counter");

        let encoded_results_stale = register_int_counter_with_registry!(
            Opts::new(
                "batcher_encoded_results_stale_total",
                "Encoded results evicted as stale"
            ),
            registry
        )
        .expect("failed to register encoded_results_stale counter");

        let encoded_results_future = register_int_counter_with_registry!(
            Opts::new(
                "batcher_encoded_results_future_total",
                "Encoded results referencing a block ahead of the sweep"
            ),
            registry
        )
        .expect("failed to register encoded_results_future counter");

        Self {
            registry,
            encoded_results,
            encoded_result_bytes,
            encoding_requests_in_flight,
            encoded_results_fetched,
            encoded_results_stale,
            encoded_results_future,
            last_seq: Mutex::new(0),
        }
    }

    /// Set the gauges from `snapshot` unless a newer one was already applied.
    pub fn observe_store(&self, snapshot: StoreSnapshot) {
        let mut last_seq = self.last_seq.lock();
        if snapshot.seq < *last_seq {
            return;
        }
        *last_seq = snapshot.seq;
        self.encoded_results.set(snapshot.encoded_results as i64);
        self.encoded_result_bytes
            .set(i64::try_from(snapshot.encoded_result_bytes).unwrap_or(i64::MAX));
        self.encoding_requests_in_flight
            .set(snapshot.requests_in_flight as i64);
    }

    pub fn observe_sweep(&self, fetched: usize, stale: usize, future: usize) {
        self.encoded_results_fetched.inc_by(fetched as u64);
        self.encoded_results_stale.inc_by(stale as u64);
        self.encoded_results_future.inc_by(future as u64);
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode_text(&self) -> Result<String, BatcherError> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|e| BatcherError::Metrics(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| BatcherError::Metrics(e.to_string()))
    }
}

impl Default for BatcherMetrics {
    fn default() -> Self {
        Self::new()
    }
}
