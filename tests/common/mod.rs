//! Shared helpers for integration tests running against `httpmock` servers.

#![allow(dead_code)]

// std
use std::sync::Arc;
// self
use line_liff::{
	api::LiffClient,
	auth::{ChannelCredentials, ChannelId},
	cache::ChannelTokenCache,
	config,
	http::ReqwestHttpClient,
	reqwest::Client,
	url::Url,
};

/// Channel identifier used by integration tests.
pub const TEST_CHANNEL_ID: &str = "1234567890";
/// Channel secret used by integration tests.
pub const TEST_CHANNEL_SECRET: &str = "channel-secret";
/// Form body the token endpoint expects for the test credentials.
pub const EXPECTED_TOKEN_FORM: &str =
	"grant_type=client_credentials&client_id=1234567890&client_secret=channel-secret";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Test credentials built from [`TEST_CHANNEL_ID`] and [`TEST_CHANNEL_SECRET`].
pub fn test_credentials() -> ChannelCredentials {
	let channel_id =
		ChannelId::new(TEST_CHANNEL_ID).expect("Test channel identifier should be valid.");

	ChannelCredentials::new(channel_id, TEST_CHANNEL_SECRET)
}

/// Constructs a [`LiffClient`] pointed at `base_url` (typically `server.base_url()`) together
/// with its shared token cache.
pub fn build_test_client(base_url: &str) -> (LiffClient, Arc<ChannelTokenCache>) {
	let endpoint = config::normalize_endpoint(
		Url::parse(base_url).expect("Mock server base URL should parse successfully."),
	);
	let http_client = test_reqwest_http_client();
	let cache = Arc::new(
		ChannelTokenCache::new(http_client.clone(), &endpoint, test_credentials())
			.expect("Token cache should build against the mock endpoint."),
	);
	let client = LiffClient::with_parts(http_client, endpoint, cache.clone());

	(client, cache)
}
