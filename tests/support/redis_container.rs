use testcontainers::GenericImage;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;

/// Starts a throwaway Redis instance for one integration test. The
/// instance is fresh (no cleanup needed) since the container is created
/// per test and dropped at the end of it.
pub async fn start_redis()
-> (redis::Client, testcontainers::ContainerAsync<GenericImage>) {
	let container = GenericImage::new("redis", "8.0.3-alpine")
		.with_exposed_port(ContainerPort::Tcp(6379))
		.with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
		.start()
		.await
		.unwrap();
	let host_port = container.get_host_port_ipv4(6379).await.unwrap();
	let client = redis::Client::open(format!("redis://127.0.0.1:{host_port}"))
		.expect("invalid Redis URL");
	(client, container)
}
