use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::web::{JsonConfig, QueryConfig};
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("Could not perform this operation.")]
	QueueUnavailableError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::QueueUnavailableError => "Service Unavailable".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::QueueUnavailableError => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

/// Default mapping for an unexpected store failure (summary scan, purge).
/// Ingest handlers that specifically want `QueueUnavailableError` map the
/// queue's error themselves rather than relying on this blanket `From`.
impl From<Box<dyn std::error::Error + Send>> for ApiError {
	fn from(_: Box<dyn std::error::Error + Send>) -> Self {
		ApiError::InternalServerError
	}
}

/// A malformed request body (missing field, wrong type, truncated JSON)
/// must still answer with the `{error}` shape (§6), not Actix's default
/// plain-text extractor rejection.
pub fn json_config() -> JsonConfig {
	JsonConfig::default().error_handler(|err, _req| {
		error::InternalError::from_response(
			err,
			ApiError::BadClientDataError.error_response(),
		)
		.into()
	})
}

/// A malformed `from`/`to` query parameter (not valid RFC-3339) must answer
/// 400 with the `{error}` shape too (§6), not Actix's default rejection.
pub fn query_config() -> QueryConfig {
	QueryConfig::default().error_handler(|err, _req| {
		error::InternalError::from_response(
			err,
			ApiError::BadClientDataError.error_response(),
		)
		.into()
	})
}
