//! Client configuration and its builder.
//!
//! The builder resolves the API endpoint, the per-request timeout, and the channel
//! credentials. Credentials left unset are read from `LINE_CHANNEL_ID` and
//! `LINE_CHANNEL_SECRET`; explicit values always win.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::ChannelCredentials, error::ConfigError};

/// Production endpoint of the LINE platform API.
pub const DEFAULT_ENDPOINT: &str = "https://api.line.me/";
/// Upper bound for a single HTTP exchange.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Validated configuration consumed by [`LiffClient::new`](crate::api::LiffClient::new).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base endpoint; always ends with `/`.
	pub endpoint: Url,
	/// Timeout applied to every request.
	pub timeout: StdDuration,
	/// Channel credentials used for token exchanges.
	pub credentials: ChannelCredentials,
}
impl ClientConfig {
	/// Creates a new builder seeded with the production endpoint and default timeout.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Endpoint override; defaults to [`DEFAULT_ENDPOINT`].
	pub endpoint: Option<Url>,
	/// Timeout override; defaults to [`DEFAULT_TIMEOUT`].
	pub timeout: Option<StdDuration>,
	/// Explicit channel identifier.
	pub channel_id: Option<String>,
	/// Explicit channel secret.
	pub channel_secret: Option<String>,
}
impl ClientConfigBuilder {
	/// Overrides the API endpoint.
	pub fn endpoint(mut self, url: Url) -> Self {
		self.endpoint = Some(url);

		self
	}

	/// Overrides the request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Sets the channel identifier, taking precedence over `LINE_CHANNEL_ID`.
	pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
		self.channel_id = Some(channel_id.into());

		self
	}

	/// Sets the channel secret, taking precedence over `LINE_CHANNEL_SECRET`.
	pub fn channel_secret(mut self, channel_secret: impl Into<String>) -> Self {
		self.channel_secret = Some(channel_secret.into());

		self
	}

	/// Consumes the builder, reading unset credentials from the process environment.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		self.build_with(|key| std::env::var(key).ok())
	}

	/// Consumes the builder using `lookup` in place of the process environment.
	pub fn build_with<F>(self, lookup: F) -> Result<ClientConfig, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let endpoint = match self.endpoint {
			Some(url) => url,
			None => Url::parse(DEFAULT_ENDPOINT)
				.map_err(|source| ConfigError::InvalidEndpoint { source })?,
		};
		let endpoint = normalize_endpoint(endpoint);

		validate_endpoint(&endpoint)?;

		let credentials = ChannelCredentials::resolve(self.channel_id, self.channel_secret, lookup)?;

		Ok(ClientConfig { endpoint, timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT), credentials })
	}
}

/// Appends a trailing `/` so relative paths join beneath the endpoint instead of replacing
/// its last segment.
pub fn normalize_endpoint(mut url: Url) -> Url {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url
}

fn validate_endpoint(url: &Url) -> Result<(), ConfigError> {
	let loopback = match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	};

	if url.scheme() == "https" || (url.scheme() == "http" && loopback) {
		Ok(())
	} else {
		Err(ConfigError::InsecureEndpoint { url: url.to_string() })
	}
}
