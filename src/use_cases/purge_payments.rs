use std::error::Error;
use std::sync::Arc;

use crate::domain::ports::PaymentStore;

#[derive(Clone)]
pub struct PurgePaymentsUseCase<S: PaymentStore> {
	store: Arc<S>,
}

impl<S: PaymentStore> PurgePaymentsUseCase<S> {
	pub fn new(store: Arc<S>) -> Self {
		Self { store }
	}

	pub async fn execute(&self) -> Result<(), Box<dyn Error + Send>> {
		self.store.purge_all().await
	}
}
