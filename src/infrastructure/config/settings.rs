use config::Environment;
use serde::Deserialize;

fn default_num_workers() -> usize {
	8
}
fn default_redis_url() -> String {
	"redis://127.0.0.1:6379".to_string()
}
fn default_upstream_concurrency() -> usize {
	100
}
fn default_default_timeout_ms() -> u64 {
	1_000
}
fn default_fallback_timeout_ms() -> u64 {
	10_000
}
fn default_max_attempts() -> u32 {
	3
}
fn default_retry_delay_ms() -> u64 {
	100
}
fn default_health_sample_interval_secs() -> u64 {
	5
}
fn default_server_keepalive() -> u64 {
	75
}

/// Process-wide configuration, loaded once at startup (§4.7). The three
/// fields without a `#[serde(default)]` are required: startup fails if
/// either processor URL or the worker count is absent from the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub num_workers: usize,
	pub payment_processor_url: String,
	pub fallback_payment_processor_url: String,

	#[serde(default = "default_redis_url")]
	pub redis_url: String,
	#[serde(default = "default_upstream_concurrency")]
	pub upstream_concurrency: usize,
	#[serde(default = "default_default_timeout_ms")]
	pub default_timeout_ms: u64,
	#[serde(default = "default_fallback_timeout_ms")]
	pub fallback_timeout_ms: u64,
	#[serde(default = "default_max_attempts")]
	pub max_attempts: u32,
	#[serde(default = "default_retry_delay_ms")]
	pub retry_delay_ms: u64,
	#[serde(default = "default_health_sample_interval_secs")]
	pub health_sample_interval_secs: u64,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive: u64,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		Self::load_from(Environment::default().try_parsing(true))
	}

	fn load_from(environment: Environment) -> Result<Self, config::ConfigError> {
		let config_builder =
			config::Config::builder().add_source(environment).build()?;

		config_builder.try_deserialize()
	}
}
