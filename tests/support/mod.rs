pub mod payment_processor_container;
pub mod redis_container;
