pub mod worker_pool;
