use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePaymentCommand {
	pub correlation_id: Uuid,
	pub amount: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GetPaymentSummaryQuery {
	pub from: Option<DateTime<Utc>>,
	pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummaryResult {
	pub total_requests: usize,
	pub total_amount: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PaymentsSummaryResponse {
	pub default: PaymentSummaryResult,
	pub fallback: PaymentSummaryResult,
}
