//! Channel credentials used for the client-credentials exchange.

// self
use crate::{
	_prelude::*,
	auth::{ChannelId, Secret},
	error::ConfigError,
};

/// Environment variable consulted when no channel identifier is configured.
pub const CHANNEL_ID_ENV: &str = "LINE_CHANNEL_ID";
/// Environment variable consulted when no channel secret is configured.
pub const CHANNEL_SECRET_ENV: &str = "LINE_CHANNEL_SECRET";

/// Channel identifier + secret pair; immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct ChannelCredentials {
	/// Channel identifier sent as `client_id`.
	pub channel_id: ChannelId,
	/// Channel secret sent as `client_secret`.
	pub channel_secret: Secret,
}
impl ChannelCredentials {
	/// Creates credentials from an already validated channel identifier.
	pub fn new(channel_id: ChannelId, channel_secret: impl Into<String>) -> Self {
		Self { channel_id, channel_secret: Secret::new(channel_secret) }
	}

	/// Resolves credentials from the process environment, letting explicit values win.
	pub fn from_env(
		channel_id: Option<String>,
		channel_secret: Option<String>,
	) -> Result<Self, ConfigError> {
		Self::resolve(channel_id, channel_secret, |key| std::env::var(key).ok())
	}

	/// Resolves credentials with an injectable variable lookup.
	///
	/// An explicit value is used as-is, even when empty; the lookup is only consulted for
	/// values that were not supplied. Empty results are rejected.
	pub fn resolve<F>(
		channel_id: Option<String>,
		channel_secret: Option<String>,
		lookup: F,
	) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let channel_id = channel_id.or_else(|| lookup(CHANNEL_ID_ENV)).unwrap_or_default();
		let channel_secret =
			channel_secret.or_else(|| lookup(CHANNEL_SECRET_ENV)).unwrap_or_default();

		if channel_id.is_empty() {
			return Err(ConfigError::MissingChannelId);
		}
		if channel_secret.is_empty() {
			return Err(ConfigError::MissingChannelSecret);
		}

		Ok(Self::new(ChannelId::new(channel_id)?, channel_secret))
	}
}
impl Debug for ChannelCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ChannelCredentials")
			.field("channel_id", &self.channel_id)
			.field("channel_secret", &"<redacted>")
			.finish()
	}
}
