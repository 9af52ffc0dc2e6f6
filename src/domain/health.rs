use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Latest known liveness/latency snapshot for one processor, as reported by
/// `GET /payments/service-health`. Written only by the health sampler; read
/// by the dispatcher and by nothing else.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthState {
	pub failing: bool,
	#[serde(rename = "minResponseTime")]
	pub min_response_time_ms: u64,
	#[serde(skip)]
	pub sampled_at: Option<Instant>,
}

impl HealthState {
	pub fn unknown() -> Self {
		Self {
			failing: true,
			min_response_time_ms: 0,
			sampled_at: None,
		}
	}
}

/// Both processors' latest snapshots, behind a single writer / many readers
/// lock. Readers must tolerate an `unknown()` default until the first
/// sample completes.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
	pub default: HealthState,
	pub fallback: HealthState,
}

impl Default for HealthSnapshot {
	fn default() -> Self {
		Self {
			default: HealthState::unknown(),
			fallback: HealthState::unknown(),
		}
	}
}
