use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{PaymentRequestBody, PaymentsSummaryFilter};
use crate::adapters::web::state::AppState;
use crate::domain::ports::{IngestQueue, PaymentStore};
use crate::use_cases::dto::CreatePaymentCommand;

#[derive(Serialize)]
struct MessageResponse {
	msg: String,
}

/// `POST /payments` (§4.6, §6). Validates the amount is positive, then
/// enqueues and returns immediately — no upstream I/O on this path.
///
/// Generic over the store/queue ports, so this stays a plain fn registered
/// with `web::resource(...).route(web::post().to(payments::<Q, S>))` rather
/// than the `#[post]` macro, which can only generate a route for a
/// non-generic handler.
pub async fn payments<Q: IngestQueue, S: PaymentStore>(
	state: web::Data<AppState<Q, S>>,
	body: web::Json<PaymentRequestBody>,
) -> Result<impl Responder, ApiError> {
	let body = body.into_inner();
	if body.amount <= 0.0 {
		return Err(ApiError::BadClientDataError);
	}

	state
		.create_payment
		.execute(CreatePaymentCommand {
			correlation_id: body.correlation_id,
			amount: body.amount,
		})
		.await
		.map_err(|_| ApiError::QueueUnavailableError)?;

	Ok(HttpResponse::Created().json(MessageResponse {
		msg: "payment created".to_string(),
	}))
}

/// `GET /payments-summary` (§4.6, §6). Registered the same way as
/// `payments` — see its doc comment.
pub async fn payments_summary<Q: IngestQueue, S: PaymentStore>(
	state: web::Data<AppState<Q, S>>,
	filter: web::Query<PaymentsSummaryFilter>,
) -> Result<impl Responder, ApiError> {
	let response = state
		.get_payment_summary
		.execute(filter.into_inner().into())
		.await?;

	Ok(HttpResponse::Ok().json(response))
}

/// `POST /purge-payments` (§4.6, §6). Registered the same way as
/// `payments` — see its doc comment.
pub async fn payments_purge<Q: IngestQueue, S: PaymentStore>(
	state: web::Data<AppState<Q, S>>,
) -> Result<impl Responder, ApiError> {
	state.purge_payments.execute().await?;

	Ok(HttpResponse::Ok().json(MessageResponse {
		msg: "payments purged".to_string(),
	}))
}
