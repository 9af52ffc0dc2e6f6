use std::sync::Arc;

use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{IngestQueue, QueueItem};
use crate::use_cases::dto::CreatePaymentCommand;

/// Ingest side of the pipeline: enqueues the request verbatim and returns.
/// No upstream I/O happens here — that is the whole point of buffering
/// (§4.6, property 1).
#[derive(Clone)]
pub struct CreatePaymentUseCase<Q: IngestQueue> {
	queue: Arc<Q>,
}

impl<Q: IngestQueue> CreatePaymentUseCase<Q> {
	pub fn new(queue: Arc<Q>) -> Self {
		Self { queue }
	}

	pub async fn execute(
		&self,
		command: CreatePaymentCommand,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let request = PaymentRequest {
			correlation_id: command.correlation_id,
			amount: command.amount,
		};

		self.queue.push(QueueItem::Work(request)).await
	}
}
