//! REST client for the LIFF app management endpoints.
//!
//! Every call fetches a bearer token from the shared [`ChannelTokenCache`] and attaches it as
//! `Authorization: Bearer <token>`. Operations are independent request/response exchanges;
//! the client holds no state besides the cache it was given.

pub mod app;

pub use app::*;

// crates.io
use reqwest::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::LiffId,
	cache::ChannelTokenCache,
	config::ClientConfig,
	error::ConfigError,
	http::{self, ReqwestHttpClient},
	obs::{self, Operation},
};

const APPS_PATH: &str = "liff/v1/apps";

/// Client for `liff/v1/apps`.
#[derive(Clone)]
pub struct LiffClient {
	http_client: ReqwestHttpClient,
	endpoint: Url,
	tokens: Arc<ChannelTokenCache>,
}
impl LiffClient {
	/// Builds the HTTP client, token cache, and REST client described by `config`.
	pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
		let http_client = ReqwestHttpClient::new(config.timeout)?;
		let tokens = Arc::new(ChannelTokenCache::new(
			http_client.clone(),
			&config.endpoint,
			config.credentials,
		)?);

		Ok(Self::with_parts(http_client, config.endpoint, tokens))
	}

	/// Wires pre-built parts together; `endpoint` should end with `/`.
	pub fn with_parts(
		http_client: ReqwestHttpClient,
		endpoint: Url,
		tokens: Arc<ChannelTokenCache>,
	) -> Self {
		Self { http_client, endpoint, tokens }
	}

	/// Token cache shared by this client.
	pub fn token_cache(&self) -> &Arc<ChannelTokenCache> {
		&self.tokens
	}

	/// Lists every LIFF app on the channel.
	pub async fn list_apps(&self) -> Result<Vec<LiffApp>> {
		obs::observe(Operation::ListApps, "list_apps", self.fetch_apps()).await
	}

	/// Looks up one app by scanning the list result; a miss is [`Error::NotFound`].
	///
	/// The API offers no get-by-id endpoint, so every lookup downloads the full list.
	pub async fn get_app(&self, liff_id: &LiffId) -> Result<LiffApp> {
		obs::observe(Operation::GetApp, "get_app", async move {
			let apps = self.fetch_apps().await?;

			find_app(apps, liff_id)
		})
		.await
	}

	/// Creates an app and returns its server-assigned identifier.
	pub async fn create_app(&self, request: &CreateAppRequest) -> Result<LiffId> {
		const ENDPOINT: &str = Operation::CreateApp.as_str();

		obs::observe(Operation::CreateApp, "create_app", async move {
			let url = self.apps_url()?;
			let builder = self.authorized(self.http_client.post(url)).await?.json(request);
			let created: CreatedApp = http::send_json(ENDPOINT, builder).await?;

			Ok(created.liff_id)
		})
		.await
	}

	/// Sends a partial update; only populated fields of `request` are transmitted.
	pub async fn update_app(&self, liff_id: &LiffId, request: &UpdateAppRequest) -> Result<()> {
		const ENDPOINT: &str = Operation::UpdateApp.as_str();

		obs::observe(Operation::UpdateApp, "update_app", async move {
			let url = self.app_url(liff_id)?;
			let builder = self.authorized(self.http_client.put(url)).await?.json(request);

			http::send_empty(ENDPOINT, builder).await
		})
		.await
	}

	/// Deletes an app.
	pub async fn delete_app(&self, liff_id: &LiffId) -> Result<()> {
		const ENDPOINT: &str = Operation::DeleteApp.as_str();

		obs::observe(Operation::DeleteApp, "delete_app", async move {
			let url = self.app_url(liff_id)?;
			let builder = self.authorized(self.http_client.delete(url)).await?;

			http::send_empty(ENDPOINT, builder).await
		})
		.await
	}

	/// Creates an app and reads the stored record back.
	///
	/// Aborts on the first failing step; an app created before a failed read is not rolled
	/// back.
	pub async fn create_and_fetch(&self, request: &CreateAppRequest) -> Result<LiffApp> {
		let liff_id = self.create_app(request).await?;

		self.get_app(&liff_id).await
	}

	/// Updates an app and reads the reconciled record back.
	pub async fn update_and_fetch(
		&self,
		liff_id: &LiffId,
		request: &UpdateAppRequest,
	) -> Result<LiffApp> {
		self.update_app(liff_id, request).await?;
		self.get_app(liff_id).await
	}

	async fn fetch_apps(&self) -> Result<Vec<LiffApp>> {
		const ENDPOINT: &str = Operation::ListApps.as_str();

		let url = self.apps_url()?;
		let builder = self.authorized(self.http_client.get(url)).await?;
		let list: AppList = http::send_json(ENDPOINT, builder).await?;

		Ok(list.apps)
	}

	async fn authorized(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
		let token = self.tokens.get_token().await?;

		Ok(builder.header(AUTHORIZATION, token.bearer_header()))
	}

	fn apps_url(&self) -> Result<Url> {
		self.endpoint
			.join(APPS_PATH)
			.map_err(|source| ConfigError::InvalidEndpoint { source }.into())
	}

	fn app_url(&self, liff_id: &LiffId) -> Result<Url> {
		self.endpoint
			.join(&format!("{APPS_PATH}/{liff_id}"))
			.map_err(|source| ConfigError::InvalidEndpoint { source }.into())
	}
}
impl Debug for LiffClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LiffClient")
			.field("endpoint", &self.endpoint.as_str())
			.field("tokens", &self.tokens)
			.finish()
	}
}

/// Linear scan for the first record carrying `liff_id`.
fn find_app(apps: Vec<LiffApp>, liff_id: &LiffId) -> Result<LiffApp> {
	apps.into_iter()
		.find(|app| app.liff_id == *liff_id)
		.ok_or_else(|| Error::NotFound { liff_id: liff_id.to_string() })
}
