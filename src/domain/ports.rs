use std::time::Duration;

use async_trait::async_trait;

use crate::domain::health::HealthState;
use crate::domain::payment::{PaymentRequest, Processor};

/// Time-indexed persistence abstraction: one sorted set per processor plus
/// a single-slot health blob. Members of the sorted set are the encoded
/// record bytes themselves, so the index doubles as storage (§4.1).
#[async_trait]
pub trait PaymentStore: Send + Sync + 'static {
	async fn index_payment(
		&self,
		processor: Processor,
		record_bytes: Vec<u8>,
		score: f64,
	) -> Result<(), Box<dyn std::error::Error + Send>>;

	/// Inclusive on both ends.
	async fn range_by_score(
		&self,
		processor: Processor,
		from_score: f64,
		to_score: f64,
	) -> Result<Vec<Vec<u8>>, Box<dyn std::error::Error + Send>>;

	async fn purge_all(&self) -> Result<(), Box<dyn std::error::Error + Send>>;

	async fn get_health(
		&self,
	) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send>>;

	async fn set_health(
		&self,
		bytes: Vec<u8>,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
}

/// Result of one upstream POST attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
	Success,
	HttpError(u16),
	TransportError,
}

/// HTTP boundary to a payment processor. Concurrency across all in-flight
/// calls (both processors, all workers) is bounded by the implementation,
/// never by the caller (§4.2).
#[async_trait]
pub trait UpstreamClient: Send + Sync + 'static {
	async fn post_payment(
		&self,
		processor: Processor,
		payload_bytes: Vec<u8>,
		timeout: Duration,
	) -> UpstreamOutcome;

	async fn probe_health(&self, processor: Processor) -> Option<HealthState>;
}

/// One item flowing through the ingest queue: either a request awaiting
/// dispatch, carried untouched from the client (`requested_at` is stamped
/// only once a worker picks it up), or an in-band termination marker.
#[derive(Debug, Clone)]
pub enum QueueItem {
	Work(PaymentRequest),
	Shutdown,
}

/// In-process MPMC buffer between HTTP handlers (producers) and workers
/// (consumers). Unbounded: ingest never backpressures the client (§4.5).
#[async_trait]
pub trait IngestQueue: Send + Sync + 'static {
	async fn push(
		&self,
		item: QueueItem,
	) -> Result<(), Box<dyn std::error::Error + Send>>;

	/// Blocks until an item is available. `None` means every sender has
	/// been dropped (the process is tearing down).
	async fn pop(&self) -> Option<QueueItem>;
}

#[allow(unused)]
pub(crate) fn _assert_object_safe(_: &dyn PaymentStore) {}
