use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, test, web};
use payment_dispatch::adapters::web::handlers::{payments, payments_summary};
use payment_dispatch::adapters::web::schema::PaymentRequestBody;
use payment_dispatch::adapters::web::state::AppState;
use payment_dispatch::infrastructure::persistence::redis_store::RedisStore;
use payment_dispatch::infrastructure::queue::in_memory_queue::InMemoryQueue;
use payment_dispatch::infrastructure::upstream::http_upstream_client::HttpUpstreamClient;
use payment_dispatch::infrastructure::workers::worker_pool::{shutdown, spawn_workers};
use payment_dispatch::use_cases::create_payment::CreatePaymentUseCase;
use payment_dispatch::use_cases::dispatch_payment::{DispatchConfig, DispatchPaymentUseCase};
use payment_dispatch::use_cases::dto::{CreatePaymentCommand, GetPaymentSummaryQuery};
use payment_dispatch::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use payment_dispatch::use_cases::purge_payments::PurgePaymentsUseCase;
use uuid::Uuid;

#[path = "support/mod.rs"]
mod support;

use support::payment_processor_container::start_payment_processors;
use support::redis_container::start_redis;

async fn poll_until<F>(mut predicate: F, attempts: u32, delay: Duration)
where
	F: AsyncFnMut() -> bool,
{
	for _ in 0..attempts {
		if predicate().await {
			return;
		}
		tokio::time::sleep(delay).await;
	}
	panic!("condition not met within {attempts} attempts");
}

/// Exercises the full ingest -> dispatch -> persist -> summarize pipeline
/// against a real Redis instance and a real payment-processor image, with
/// no mocks anywhere in the path.
#[actix_web::test]
async fn a_payment_posted_over_http_is_dispatched_and_reflected_in_the_summary() {
	let (redis_client, _redis_node) = start_redis().await;
	let (default_url, fallback_url, _default_node, _fallback_node) =
		start_payment_processors().await;

	let store = Arc::new(RedisStore::new(redis_client));
	let queue = Arc::new(InMemoryQueue::new());
	let upstream =
		Arc::new(HttpUpstreamClient::new(default_url, fallback_url, 50));

	let dispatcher = DispatchPaymentUseCase::new(
		store.clone(),
		upstream,
		DispatchConfig {
			max_attempts: 3,
			default_timeout: Duration::from_secs(2),
			fallback_timeout: Duration::from_secs(2),
			retry_delay: Duration::from_millis(100),
		},
	);
	let worker_handles = spawn_workers(2, queue.clone(), dispatcher);

	let state = AppState {
		create_payment: CreatePaymentUseCase::new(queue.clone()),
		get_payment_summary: GetPaymentSummaryUseCase::new(store.clone()),
		purge_payments: PurgePaymentsUseCase::new(store.clone()),
	};

	let app = test::init_service(
		App::new()
			.app_data(web::Data::new(state))
			.service(
				web::resource("/payments")
					.route(web::post().to(payments::<InMemoryQueue, RedisStore>)),
			)
			.service(
				web::resource("/payments-summary").route(
					web::get().to(payments_summary::<InMemoryQueue, RedisStore>),
				),
			),
	)
	.await;

	let correlation_id = Uuid::new_v4();
	let req = test::TestRequest::post()
		.uri("/payments")
		.set_json(PaymentRequestBody {
			correlation_id,
			amount: 19.90,
		})
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 201);

	let summary_use_case = GetPaymentSummaryUseCase::new(store.clone());
	poll_until(
		async || {
			let summary = summary_use_case
				.execute(GetPaymentSummaryQuery::default())
				.await
				.unwrap();
			summary.default.total_requests + summary.fallback.total_requests == 1
		},
		50,
		Duration::from_millis(100),
	)
	.await;

	shutdown(queue, worker_handles).await;
}

/// A payment dispatched and indexed, then purged, must no longer appear
/// in the summary.
#[actix_web::test]
async fn purge_removes_every_previously_dispatched_payment() {
	let (redis_client, _redis_node) = start_redis().await;
	let (default_url, fallback_url, _default_node, _fallback_node) =
		start_payment_processors().await;

	let store = Arc::new(RedisStore::new(redis_client));
	let queue = Arc::new(InMemoryQueue::new());
	let upstream =
		Arc::new(HttpUpstreamClient::new(default_url, fallback_url, 50));

	let dispatcher = DispatchPaymentUseCase::new(
		store.clone(),
		upstream,
		DispatchConfig {
			max_attempts: 3,
			default_timeout: Duration::from_secs(2),
			fallback_timeout: Duration::from_secs(2),
			retry_delay: Duration::from_millis(100),
		},
	);
	let worker_handles = spawn_workers(2, queue.clone(), dispatcher);

	let create_payment = CreatePaymentUseCase::new(queue.clone());
	create_payment
		.execute(CreatePaymentCommand {
			correlation_id: Uuid::new_v4(),
			amount: 5.0,
		})
		.await
		.unwrap();

	let summary_use_case = GetPaymentSummaryUseCase::new(store.clone());
	poll_until(
		async || {
			let summary = summary_use_case
				.execute(GetPaymentSummaryQuery::default())
				.await
				.unwrap();
			summary.default.total_requests + summary.fallback.total_requests == 1
		},
		50,
		Duration::from_millis(100),
	)
	.await;

	let purge = PurgePaymentsUseCase::new(store.clone());
	purge.execute().await.unwrap();

	let summary = summary_use_case
		.execute(GetPaymentSummaryQuery::default())
		.await
		.unwrap();
	assert_eq!(summary.default.total_requests, 0);
	assert_eq!(summary.fallback.total_requests, 0);

	shutdown(queue, worker_handles).await;
}
