use async_trait::async_trait;
use redis::AsyncCommands;

use crate::domain::payment::Processor;
use crate::domain::ports::PaymentStore;

const HEALTH_KEY: &str = "payment_processor_health";

fn index_key(processor: Processor) -> String {
	format!("payments_index:{processor}")
}

/// Redis-backed [`PaymentStore`]. One sorted set per processor, scored by
/// `requested_at` epoch seconds, whose members are the record's own JSON
/// bytes (§4.1) — so a range query needs no secondary lookup, unlike the
/// hash-per-record layout this was generalized from.
#[derive(Clone)]
pub struct RedisStore {
	client: redis::Client,
}

impl RedisStore {
	pub fn new(client: redis::Client) -> Self {
		Self { client }
	}

	async fn connection(
		&self,
	) -> Result<redis::aio::MultiplexedConnection, Box<dyn std::error::Error + Send>> {
		self.client
			.get_multiplexed_async_connection()
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}
}

#[async_trait]
impl PaymentStore for RedisStore {
	async fn index_payment(
		&self,
		processor: Processor,
		record_bytes: Vec<u8>,
		score: f64,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;
		con.zadd::<_, _, _, ()>(index_key(processor), record_bytes, score)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}

	async fn range_by_score(
		&self,
		processor: Processor,
		from_score: f64,
		to_score: f64,
	) -> Result<Vec<Vec<u8>>, Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;
		con.zrangebyscore::<_, _, _, Vec<Vec<u8>>>(
			index_key(processor),
			from_score,
			to_score,
		)
		.await
		.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}

	async fn purge_all(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;
		redis::pipe()
			.atomic()
			.del(index_key(Processor::Default))
			.del(index_key(Processor::Fallback))
			.del(HEALTH_KEY)
			.query_async::<()>(&mut con)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}

	async fn get_health(
		&self,
	) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;
		con.get(HEALTH_KEY)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}

	async fn set_health(
		&self,
		bytes: Vec<u8>,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = self.connection().await?;
		con.set::<_, _, ()>(HEALTH_KEY, bytes)
			.await
			.map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send>)
	}
}

#[cfg(test)]
mod tests {
	use testcontainers::GenericImage;
	use testcontainers::core::{ContainerPort, WaitFor};
	use testcontainers::runners::AsyncRunner;

	use super::*;

	async fn redis_container()
	-> (redis::Client, testcontainers::ContainerAsync<GenericImage>) {
		let container = GenericImage::new("redis", "alpine3.21")
			.with_exposed_port(ContainerPort::Tcp(6379))
			.with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
			.start()
			.await
			.unwrap();
		let port = container.get_host_port_ipv4(6379).await.unwrap();
		let client =
			redis::Client::open(format!("redis://127.0.0.1:{port}")).unwrap();
		(client, container)
	}

	#[tokio::test]
	async fn indexes_and_ranges_by_score() {
		let (client, _container) = redis_container().await;
		let store = RedisStore::new(client);

		store
			.index_payment(Processor::Default, b"{\"a\":1}".to_vec(), 100.0)
			.await
			.unwrap();
		store
			.index_payment(Processor::Default, b"{\"a\":2}".to_vec(), 200.0)
			.await
			.unwrap();

		let members = store
			.range_by_score(Processor::Default, 100.0, 100.0)
			.await
			.unwrap();
		assert_eq!(members, vec![b"{\"a\":1}".to_vec()]);
	}

	#[tokio::test]
	async fn purge_empties_both_indexes_and_health() {
		let (client, _container) = redis_container().await;
		let store = RedisStore::new(client);

		store
			.index_payment(Processor::Fallback, b"{}".to_vec(), 1.0)
			.await
			.unwrap();
		store.set_health(b"{}".to_vec()).await.unwrap();

		store.purge_all().await.unwrap();
		store.purge_all().await.unwrap();

		let members = store
			.range_by_score(Processor::Fallback, f64::MIN, f64::MAX)
			.await
			.unwrap();
		assert!(members.is_empty());
		assert!(store.get_health().await.unwrap().is_none());
	}
}
