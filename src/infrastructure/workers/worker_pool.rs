use std::sync::Arc;

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::domain::ports::{IngestQueue, PaymentStore, QueueItem, UpstreamClient};
use crate::use_cases::dispatch_payment::DispatchPaymentUseCase;

/// One worker's loop: dequeue, dispatch, repeat. Terminates on a shutdown
/// sentinel or once every queue sender has been dropped (§4.5).
async fn run_worker<Q, S, U>(
	id: usize,
	queue: Arc<Q>,
	dispatcher: DispatchPaymentUseCase<S, U>,
) where
	Q: IngestQueue,
	S: PaymentStore,
	U: UpstreamClient,
{
	loop {
		let item = match queue.pop().await {
			Some(item) => item,
			None => {
				info!("worker {id} stopping: queue closed");
				return;
			}
		};

		let request = match item {
			QueueItem::Shutdown => {
				info!("worker {id} received shutdown sentinel");
				return;
			}
			QueueItem::Work(request) => request,
		};

		let correlation_id = request.correlation_id;
		match dispatcher.execute(request).await {
			Ok(payment) => {
				info!(
					"worker {id} dispatched payment {correlation_id} via \
					 {}",
					payment.payment_processor
				);
			}
			Err(failed) => {
				warn!(
					"worker {id} could not dispatch payment {correlation_id} \
					 to any processor; re-enqueueing"
				);
				if let Err(e) = queue.push(QueueItem::Work(failed.request)).await {
					warn!("worker {id} failed to re-enqueue {correlation_id}: {e}");
				}
			}
		}
	}
}

/// Spawns `num_workers` long-running tasks, each running `run_worker`.
pub fn spawn_workers<Q, S, U>(
	num_workers: usize,
	queue: Arc<Q>,
	dispatcher: DispatchPaymentUseCase<S, U>,
) -> Vec<JoinHandle<()>>
where
	Q: IngestQueue,
	S: PaymentStore,
	U: UpstreamClient,
{
	(0..num_workers)
		.map(|id| {
			let queue = queue.clone();
			let dispatcher = dispatcher.clone();
			tokio::spawn(run_worker(id, queue, dispatcher))
		})
		.collect()
}

/// Pushes one sentinel per worker, then awaits every worker's completion
/// (§4.7's shutdown sequence, step 1–2).
pub async fn shutdown<Q: IngestQueue>(
	queue: Arc<Q>,
	handles: Vec<JoinHandle<()>>,
) {
	for _ in 0..handles.len() {
		let _ = queue.push(QueueItem::Shutdown).await;
	}
	for handle in handles {
		let _ = handle.await;
	}
}
