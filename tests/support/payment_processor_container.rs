use testcontainers::GenericImage;
use testcontainers::core::wait::HttpWaitStrategy;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;

/// Two independent instances of the reference payment-processor image used
/// by the "rinha de backend" challenge, standing in for the real default
/// and fallback upstreams.
pub async fn start_payment_processors() -> (
	String,
	String,
	testcontainers::ContainerAsync<GenericImage>,
	testcontainers::ContainerAsync<GenericImage>,
) {
	let default_container = start_one().await;
	let fallback_container = start_one().await;

	let default_url = container_url(&default_container).await;
	let fallback_url = container_url(&fallback_container).await;

	(default_url, fallback_url, default_container, fallback_container)
}

async fn start_one() -> testcontainers::ContainerAsync<GenericImage> {
	GenericImage::new("zanfranceschi/payment-processor", "latest")
		.with_exposed_port(ContainerPort::Tcp(8080))
		.with_wait_for(WaitFor::http(
			HttpWaitStrategy::new("/payments/service-health")
				.with_expected_status_code(200_u16),
		))
		.start()
		.await
		.unwrap()
}

async fn container_url(container: &testcontainers::ContainerAsync<GenericImage>) -> String {
	let port = container.get_host_port_ipv4(8080).await.unwrap();
	format!("http://127.0.0.1:{port}")
}
