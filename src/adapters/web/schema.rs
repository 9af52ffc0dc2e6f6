use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::use_cases::dto::{GetPaymentSummaryQuery, PaymentsSummaryResponse};

/// `POST /payments` request body.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequestBody {
	#[serde(rename = "correlationId")]
	pub correlation_id: Uuid,
	pub amount: f64,
}

/// `GET /payments-summary` query string.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PaymentsSummaryFilter {
	pub from: Option<DateTime<Utc>>,
	pub to: Option<DateTime<Utc>>,
}

impl From<PaymentsSummaryFilter> for GetPaymentSummaryQuery {
	fn from(filter: PaymentsSummaryFilter) -> Self {
		GetPaymentSummaryQuery {
			from: filter.from,
			to: filter.to,
		}
	}
}

pub type PaymentsSummaryResponseBody = PaymentsSummaryResponse;
