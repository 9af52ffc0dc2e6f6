use std::sync::Arc;

use chrono::{Duration, Utc};
use log::warn;

use crate::domain::payment::{Payment, Processor, cents_to_major_units};
use crate::domain::ports::PaymentStore;
use crate::use_cases::dto::{
	GetPaymentSummaryQuery, PaymentSummaryResult, PaymentsSummaryResponse,
};

/// Range-scans both per-processor indexes and sums. Records that fail to
/// decode are silently skipped and not counted (§4.6, §7).
#[derive(Clone)]
pub struct GetPaymentSummaryUseCase<S: PaymentStore> {
	store: Arc<S>,
}

impl<S: PaymentStore> GetPaymentSummaryUseCase<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	pub async fn execute(
		&self,
		query: GetPaymentSummaryQuery,
	) -> Result<PaymentsSummaryResponse, Box<dyn std::error::Error + Send>> {
		let now = Utc::now();
		let from = query.from.unwrap_or(now - Duration::days(30));
		let to = query.to.unwrap_or(now);

		let default = self
			.summarize(Processor::Default, from.timestamp() as f64, to.timestamp() as f64)
			.await?;
		let fallback = self
			.summarize(
				Processor::Fallback,
				from.timestamp() as f64,
				to.timestamp() as f64,
			)
			.await?;

		Ok(PaymentsSummaryResponse { default, fallback })
	}

	async fn summarize(
		&self,
		processor: Processor,
		from_score: f64,
		to_score: f64,
	) -> Result<PaymentSummaryResult, Box<dyn std::error::Error + Send>> {
		let members = self
			.store
			.range_by_score(processor, from_score, to_score)
			.await?;

		let mut total_requests = 0usize;
		let mut total_cents: i64 = 0;

		for bytes in members {
			match serde_json::from_slice::<Payment>(&bytes) {
				Ok(payment) => {
					total_requests += 1;
					total_cents += payment.amount;
				}
				Err(e) => {
					warn!("skipping undecodable payment record for {processor}: {e}");
				}
			}
		}

		Ok(PaymentSummaryResult {
			total_requests,
			total_amount: cents_to_major_units(total_cents),
		})
	}
}
