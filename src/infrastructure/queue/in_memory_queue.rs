use async_channel::{Receiver, Sender, unbounded};
use async_trait::async_trait;

use crate::domain::ports::{IngestQueue, QueueItem};

/// In-process MPMC ingest queue (§4.5, §5). `async_channel` gives us a
/// cloneable sender and receiver, so any number of HTTP handlers can push
/// and any number of workers can race to pop from the same queue — the
/// property a single-consumer `tokio::mpsc` channel can't express.
#[derive(Clone)]
pub struct InMemoryQueue {
	tx: Sender<QueueItem>,
	rx: Receiver<QueueItem>,
}

impl InMemoryQueue {
	pub fn new() -> Self {
		let (tx, rx) = unbounded();
		Self { tx, rx }
	}
}

impl Default for InMemoryQueue {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl IngestQueue for InMemoryQueue {
	async fn push(
		&self,
		item: QueueItem,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.tx
			.send(item)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}

	async fn pop(&self) -> Option<QueueItem> {
		self.rx.recv().await.ok()
	}
}
