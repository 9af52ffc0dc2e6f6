use crate::domain::ports::{IngestQueue, PaymentStore};
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

/// Everything an HTTP handler needs, bundled into one explicit value
/// instead of separate `web::Data<T>` globals (§9: "avoid hidden
/// globals").
pub struct AppState<Q: IngestQueue, S: PaymentStore> {
	pub create_payment: CreatePaymentUseCase<Q>,
	pub get_payment_summary: GetPaymentSummaryUseCase<S>,
	pub purge_payments: PurgePaymentsUseCase<S>,
}

impl<Q: IngestQueue, S: PaymentStore> Clone for AppState<Q, S> {
	fn clone(&self) -> Self {
		Self {
			create_payment: self.create_payment.clone(),
			get_payment_summary: self.get_payment_summary.clone(),
			purge_payments: self.purge_payments.clone(),
		}
	}
}
