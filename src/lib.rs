use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;
use tokio::sync::RwLock;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

use crate::adapters::web::errors::{json_config, query_config};
use crate::adapters::web::handlers::{payments, payments_purge, payments_summary};
use crate::adapters::web::state::AppState;
use crate::domain::health::HealthSnapshot;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::health::health_sampler::health_sampler;
use crate::infrastructure::persistence::redis_store::RedisStore;
use crate::infrastructure::queue::in_memory_queue::InMemoryQueue;
use crate::infrastructure::upstream::http_upstream_client::HttpUpstreamClient;
use crate::infrastructure::workers::worker_pool::{shutdown, spawn_workers};
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::dispatch_payment::{DispatchConfig, DispatchPaymentUseCase};
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

/// Wires every port to its real adapter and runs the process until SIGINT
/// or SIGTERM, then drains the worker pool cleanly (§4.7).
pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let redis_client =
		redis::Client::open(config.redis_url.clone()).expect("invalid Redis URL");
	let store = Arc::new(RedisStore::new(redis_client));
	let queue = Arc::new(InMemoryQueue::new());
	let upstream = Arc::new(HttpUpstreamClient::new(
		config.payment_processor_url.clone(),
		config.fallback_payment_processor_url.clone(),
		config.upstream_concurrency,
	));
	let health_snapshot = Arc::new(RwLock::new(HealthSnapshot::default()));

	let dispatcher = DispatchPaymentUseCase::new(
		store.clone(),
		upstream.clone(),
		DispatchConfig {
			max_attempts: config.max_attempts,
			default_timeout: Duration::from_millis(config.default_timeout_ms),
			fallback_timeout: Duration::from_millis(config.fallback_timeout_ms),
			retry_delay: Duration::from_millis(config.retry_delay_ms),
		},
	);

	info!("starting {} dispatch workers...", config.num_workers);
	let worker_handles = spawn_workers(config.num_workers, queue.clone(), dispatcher);

	info!("starting health sampler...");
	let sampler_handle = tokio::spawn(health_sampler(
		upstream.clone(),
		health_snapshot.clone(),
		Duration::from_secs(config.health_sample_interval_secs),
	));

	let app_state = AppState {
		create_payment: CreatePaymentUseCase::new(queue.clone()),
		get_payment_summary: GetPaymentSummaryUseCase::new(store.clone()),
		purge_payments: PurgePaymentsUseCase::new(store.clone()),
	};

	info!("starting Actix-Web server on 0.0.0.0:9999...");
	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(app_state.clone()))
			.app_data(json_config())
			.app_data(query_config())
			.service(
				web::resource("/payments")
					.route(web::post().to(payments::<InMemoryQueue, RedisStore>)),
			)
			.service(
				web::resource("/payments-summary")
					.route(web::get().to(payments_summary::<InMemoryQueue, RedisStore>)),
			)
			.service(
				web::resource("/purge-payments")
					.route(web::post().to(payments_purge::<InMemoryQueue, RedisStore>)),
			)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(("0.0.0.0", 9999))?
	.run();

	let server_handle = server.handle();

	tokio::select! {
		result = server => result?,
		_ = tokio::signal::ctrl_c() => {
			info!("shutdown signal received, draining in-flight requests...");
			server_handle.stop(true).await;
		}
	}

	sampler_handle.abort();
	info!("stopping {} dispatch workers...", worker_handles.len());
	shutdown(queue, worker_handles).await;

	Ok(())
}
