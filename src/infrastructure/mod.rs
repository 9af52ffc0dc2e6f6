pub mod config;
pub mod health;
pub mod persistence;
pub mod queue;
pub mod upstream;
pub mod workers;
