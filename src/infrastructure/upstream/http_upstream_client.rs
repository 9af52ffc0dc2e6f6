use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use tokio::sync::Semaphore;

use crate::domain::health::HealthState;
use crate::domain::payment::Processor;
use crate::domain::ports::{UpstreamClient, UpstreamOutcome};

/// HTTP boundary to the two upstream processors. `dispatch_client` is
/// shared across every worker and gated by `semaphore`; `health_client` is
/// a wholly separate pool used only by the health sampler, so a burst of
/// payment dispatch never starves a health probe and vice versa (§4.2).
pub struct HttpUpstreamClient {
	dispatch_client: Client,
	health_client: Client,
	semaphore: Arc<Semaphore>,
	default_url: String,
	fallback_url: String,
}

impl HttpUpstreamClient {
	pub fn new(
		default_url: String,
		fallback_url: String,
		concurrency: usize,
	) -> Self {
		Self {
			dispatch_client: Client::new(),
			health_client: Client::new(),
			semaphore: Arc::new(Semaphore::new(concurrency)),
			default_url,
			fallback_url,
		}
	}

	fn base_url(&self, processor: Processor) -> &str {
		match processor {
			Processor::Default => &self.default_url,
			Processor::Fallback => &self.fallback_url,
		}
	}
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
	async fn post_payment(
		&self,
		processor: Processor,
		payload_bytes: Vec<u8>,
		timeout: Duration,
	) -> UpstreamOutcome {
		let _permit = match self.semaphore.acquire().await {
			Ok(permit) => permit,
			Err(_) => return UpstreamOutcome::TransportError,
		};

		let url = format!("{}/payments", self.base_url(processor));
		let response = self
			.dispatch_client
			.post(&url)
			.header("Content-Type", "application/json")
			.timeout(timeout)
			.body(payload_bytes)
			.send()
			.await;

		match response {
			Ok(resp) if resp.status().as_u16() == 200 => UpstreamOutcome::Success,
			Ok(resp) => UpstreamOutcome::HttpError(resp.status().as_u16()),
			Err(e) => {
				debug!("transport error posting to {processor} processor: {e}");
				UpstreamOutcome::TransportError
			}
		}
	}

	async fn probe_health(&self, processor: Processor) -> Option<HealthState> {
		let url = format!("{}/payments/service-health", self.base_url(processor));
		match self.health_client.get(&url).send().await {
			Ok(resp) if resp.status().is_success() => {
				match resp.json::<HealthState>().await {
					Ok(mut state) => {
						state.sampled_at = Some(std::time::Instant::now());
						Some(state)
					}
					Err(e) => {
						warn!("failed to parse health response for {processor}: {e}");
						None
					}
				}
			}
			Ok(resp) => {
				warn!(
					"health probe for {processor} returned status {}",
					resp.status()
				);
				None
			}
			Err(e) => {
				warn!("health probe for {processor} failed: {e}");
				None
			}
		}
	}
}
