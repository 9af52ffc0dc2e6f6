use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::payment::Processor;
use crate::domain::ports::PaymentStore;

/// In-process stand-in for [`super::redis_store::RedisStore`], used by unit
/// tests that exercise the use cases without a live Redis instance.
#[derive(Default)]
pub struct InMemoryStore {
	indexes: Mutex<HashMap<Processor, Vec<(f64, Vec<u8>)>>>,
	health: Mutex<Option<Vec<u8>>>,
}

impl InMemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl PaymentStore for InMemoryStore {
	async fn index_payment(
		&self,
		processor: Processor,
		record_bytes: Vec<u8>,
		score: f64,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut indexes = self.indexes.lock().unwrap();
		let entries = indexes.entry(processor).or_default();
		if !entries.iter().any(|(_, bytes)| bytes == &record_bytes) {
			entries.push((score, record_bytes));
		}
		Ok(())
	}

	async fn range_by_score(
		&self,
		processor: Processor,
		from_score: f64,
		to_score: f64,
	) -> Result<Vec<Vec<u8>>, Box<dyn std::error::Error + Send>> {
		let indexes = self.indexes.lock().unwrap();
		let entries = match indexes.get(&processor) {
			Some(entries) => entries,
			None => return Ok(Vec::new()),
		};

		Ok(entries
			.iter()
			.filter(|(score, _)| *score >= from_score && *score <= to_score)
			.map(|(_, bytes)| bytes.clone())
			.collect())
	}

	async fn purge_all(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.indexes.lock().unwrap().clear();
		*self.health.lock().unwrap() = None;
		Ok(())
	}

	async fn get_health(
		&self,
	) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send>> {
		Ok(self.health.lock().unwrap().clone())
	}

	async fn set_health(
		&self,
		bytes: Vec<u8>,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		*self.health.lock().unwrap() = Some(bytes);
		Ok(())
	}
}
