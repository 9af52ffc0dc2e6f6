pub mod http_upstream_client;
