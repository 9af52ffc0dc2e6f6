use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::error;
use serde::Serialize;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::payment::{Payment, PaymentRequest, Processor, to_cents};
use crate::domain::ports::{PaymentStore, UpstreamClient, UpstreamOutcome};

/// Per-processor timeouts and the default-attempt retry policy (§4.4).
#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
	pub max_attempts: u32,
	pub default_timeout: Duration,
	pub fallback_timeout: Duration,
	pub retry_delay: Duration,
}

impl Default for DispatchConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			default_timeout: Duration::from_secs(1),
			fallback_timeout: Duration::from_secs(10),
			retry_delay: Duration::from_millis(100),
		}
	}
}

/// Both default attempts and the single fallback attempt were exhausted.
/// The caller (the worker) is responsible for re-enqueueing; the
/// dispatcher itself never retries across processor rounds.
#[derive(Debug)]
pub struct DispatchFailed {
	pub request: PaymentRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamPayload {
	correlation_id: Uuid,
	amount: f64,
	requested_at: String,
}

/// The retry/fallback policy: turns one `PaymentRequest` into at most one
/// persisted `Payment`. This is the core of the system (§2, §4.4).
#[derive(Clone)]
pub struct DispatchPaymentUseCase<S: PaymentStore, U: UpstreamClient> {
	store: Arc<S>,
	upstream: Arc<U>,
	config: DispatchConfig,
}

impl<S: PaymentStore, U: UpstreamClient> DispatchPaymentUseCase<S, U> {
	pub fn new(store: Arc<S>, upstream: Arc<U>, config: DispatchConfig) -> Self {
		Self {
			store,
			upstream,
			config,
		}
	}

	pub async fn execute(
		&self,
		request: PaymentRequest,
	) -> Result<Payment, DispatchFailed> {
		let requested_at = Utc::now();
		let payload = serde_json::to_vec(&UpstreamPayload {
			correlation_id: request.correlation_id,
			amount: request.amount,
			requested_at: requested_at.to_rfc3339(),
		})
		.expect("payload serialization cannot fail");

		if let Some(processor) = self
			.attempt_default(&payload)
			.await
		{
			return Ok(self.persist(request, requested_at, processor).await);
		}

		if self.attempt(Processor::Fallback, &payload, self.config.fallback_timeout).await {
			return Ok(self.persist(request, requested_at, Processor::Fallback).await);
		}

		Err(DispatchFailed { request })
	}

	/// Attempts the default processor up to `max_attempts` times, sleeping
	/// `retry_delay` between attempts. Returns `Some(Processor::Default)`
	/// on the first success.
	async fn attempt_default(&self, payload: &[u8]) -> Option<Processor> {
		for attempt in 1..=self.config.max_attempts {
			if self
				.attempt(Processor::Default, payload, self.config.default_timeout)
				.await
			{
				return Some(Processor::Default);
			}
			if attempt < self.config.max_attempts {
				sleep(self.config.retry_delay).await;
			}
		}
		None
	}

	/// A single attempt. Status 200 is the sole success criterion; any
	/// other status, or a timeout/transport failure, counts as a failure.
	async fn attempt(
		&self,
		processor: Processor,
		payload: &[u8],
		timeout: Duration,
	) -> bool {
		matches!(
			self.upstream
				.post_payment(processor, payload.to_vec(), timeout)
				.await,
			UpstreamOutcome::Success
		)
	}

	async fn persist(
		&self,
		request: PaymentRequest,
		requested_at: chrono::DateTime<Utc>,
		processor: Processor,
	) -> Payment {
		let payment = Payment {
			correlation_id: request.correlation_id,
			amount: to_cents(request.amount),
			requested_at,
			payment_processor: processor,
		};

		let bytes = serde_json::to_vec(&payment).expect("payment serialization cannot fail");
		let score = payment.requested_at_epoch_seconds();

		if let Err(e) = self.store.index_payment(processor, bytes, score).await {
			error!(
				"payment {} accepted by {processor} but failed to index: {e}",
				payment.correlation_id
			);
		}

		payment
	}
}
