use std::sync::Arc;

use payment_dispatch::infrastructure::config::settings::Config;
use payment_dispatch::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = Arc::new(Config::load().expect("failed to load configuration"));
	run(config).await
}
