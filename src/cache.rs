//! Channel access-token cache with single-flight refreshes.
//!
//! [`ChannelTokenCache::get_token`] returns the stored token while it is still valid and only
//! calls the token endpoint once the token has expired or was never issued. Refreshes are
//! serialized behind an async guard: concurrent callers that observe an expired token queue
//! on the guard, re-check the stored token, and piggy-back on the first caller's exchange
//! instead of stampeding the token endpoint.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ChannelCredentials},
	error::ConfigError,
	http::{self, ReqwestHttpClient},
	obs::{self, Operation, TokenCacheEvent},
};

const TOKEN_PATH: &str = "oauth2/v3/token";
const BEARER: &str = "Bearer";
const GRANT_TYPE: &str = "client_credentials";

/// Owned, explicitly scoped cache for the channel's bearer token.
pub struct ChannelTokenCache {
	http_client: ReqwestHttpClient,
	token_endpoint: Url,
	credentials: ChannelCredentials,
	current: Mutex<Option<AccessToken>>,
	refresh_guard: AsyncMutex<()>,
}
impl ChannelTokenCache {
	/// Creates an empty cache that exchanges `credentials` at `{endpoint}oauth2/v3/token`.
	pub fn new(
		http_client: ReqwestHttpClient,
		endpoint: &Url,
		credentials: ChannelCredentials,
	) -> Result<Self, ConfigError> {
		let token_endpoint =
			endpoint.join(TOKEN_PATH).map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Ok(Self {
			http_client,
			token_endpoint,
			credentials,
			current: Mutex::new(None),
			refresh_guard: AsyncMutex::new(()),
		})
	}

	/// Returns a valid bearer token, exchanging credentials only when none is usable.
	pub async fn get_token(&self) -> Result<AccessToken> {
		if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
			obs::record_token_cache_event(TokenCacheEvent::Hit);

			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited on the guard.
		if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
			obs::record_token_cache_event(TokenCacheEvent::Hit);

			return Ok(token);
		}

		let token = obs::observe(Operation::IssueToken, "get_token", self.issue()).await?;

		*self.current.lock() = Some(token.clone());

		Ok(token)
	}

	/// Returns the stored token without refreshing it, even when it has expired.
	pub fn cached(&self) -> Option<AccessToken> {
		self.current.lock().clone()
	}

	/// Drops the stored token so the next [`get_token`](Self::get_token) call refreshes.
	pub fn invalidate(&self) {
		self.current.lock().take();
	}

	/// Token endpoint used for exchanges.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	fn usable_token(&self, now: OffsetDateTime) -> Option<AccessToken> {
		self.current.lock().as_ref().filter(|token| token.is_valid_at(now)).cloned()
	}

	async fn issue(&self) -> Result<AccessToken> {
		const ENDPOINT: &str = Operation::IssueToken.as_str();

		obs::record_token_cache_event(TokenCacheEvent::Refresh);

		let form = [
			("grant_type", GRANT_TYPE),
			("client_id", self.credentials.channel_id.as_str()),
			("client_secret", self.credentials.channel_secret.expose()),
		];
		let request = self.http_client.post(self.token_endpoint.clone()).form(&form);
		let body = http::send_body(ENDPOINT, request).await?;
		let issued_at = OffsetDateTime::now_utc();
		// The token type decides the outcome before the remaining fields are looked at.
		let kind: TokenKind = http::decode(ENDPOINT, &body)?;
		let token_type = kind.token_type.unwrap_or_default();

		if token_type != BEARER {
			return Err(Error::UnexpectedTokenType { token_type });
		}

		let grant: TokenGrant = http::decode(ENDPOINT, &body)?;

		Ok(AccessToken::issued(grant.access_token, issued_at, Duration::seconds(grant.expires_in)))
	}
}
impl Debug for ChannelTokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ChannelTokenCache")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("credentials", &self.credentials)
			.field("current", &*self.current.lock())
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenKind {
	token_type: Option<String>,
}

#[derive(Deserialize)]
struct TokenGrant {
	access_token: String,
	expires_in: i64,
}
