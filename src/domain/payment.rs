use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the two upstream payment processors.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
	Default,
	Fallback,
}

impl Processor {
	pub fn as_str(&self) -> &'static str {
		match self {
			Processor::Default => "default",
			Processor::Fallback => "fallback",
		}
	}
}

impl std::fmt::Display for Processor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Client-provided submission. `amount` is validated positive at the web
/// boundary; the dispatcher does not re-validate it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequest {
	#[serde(rename = "correlationId")]
	pub correlation_id: Uuid,
	pub amount: f64,
}

/// Authoritative persisted record. Constructed only once the upstream has
/// accepted the payment; never mutated afterwards.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Payment {
	pub correlation_id: Uuid,
	pub amount: i64,
	pub requested_at: DateTime<Utc>,
	pub payment_processor: Processor,
}

impl Payment {
	pub fn requested_at_epoch_seconds(&self) -> f64 {
		self.requested_at.timestamp() as f64
			+ self.requested_at.timestamp_subsec_nanos() as f64 / 1_000_000_000.0
	}
}

/// Converts a major-unit amount into an integer number of cents, rounding
/// half away from zero so summed cents are exact (invariant: every
/// persisted `Payment.amount` equals `round(request.amount * 100)`).
pub fn to_cents(amount: f64) -> i64 {
	(amount * 100.0).round() as i64
}

/// Converts cents back to major units for the summary response, rounded to
/// 2 decimal places.
pub fn cents_to_major_units(cents: i64) -> f64 {
	((cents as f64 / 100.0) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rounds_half_away_from_zero() {
		assert_eq!(to_cents(19.90), 1990);
		assert_eq!(to_cents(10.005), 1001);
		assert_eq!(to_cents(0.005), 1);
		assert_eq!(to_cents(-0.005), -1);
	}

	#[test]
	fn major_units_round_trip() {
		assert_eq!(cents_to_major_units(1990), 19.90);
		assert_eq!(cents_to_major_units(0), 0.0);
	}

	#[test]
	fn processor_serializes_lowercase() {
		let json = serde_json::to_string(&Processor::Fallback).unwrap();
		assert_eq!(json, "\"fallback\"");
	}
}
