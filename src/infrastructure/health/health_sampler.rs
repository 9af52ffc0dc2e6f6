use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::sleep;

use crate::domain::health::{HealthSnapshot, HealthState};
use crate::domain::payment::Processor;
use crate::domain::ports::UpstreamClient;

/// Periodically probes both processors and publishes the latest snapshot.
/// Never blocks dispatch and never crashes the process on a probe failure
/// — a failed probe simply leaves the prior snapshot in place (§4.3, §7).
pub async fn health_sampler<U: UpstreamClient>(
	upstream: Arc<U>,
	snapshot: Arc<RwLock<HealthSnapshot>>,
	interval: Duration,
) {
	loop {
		if let Some(state) = upstream.probe_health(Processor::Default).await {
			snapshot.write().await.default = state;
		}
		if let Some(state) = upstream.probe_health(Processor::Fallback).await {
			snapshot.write().await.fallback = state;
		}

		sleep(interval).await;
	}
}
