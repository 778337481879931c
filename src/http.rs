//! Transport primitives shared by the token cache and the REST client.
//!
//! [`ReqwestHttpClient`] wraps the underlying [`ReqwestClient`] so timeout and redirect policy
//! live in one place. The response helpers enforce the API contract every endpoint shares:
//! anything other than `200 OK` becomes [`Error::UnexpectedStatus`] without reading the body,
//! and successful bodies are decoded through `serde_path_to_error` so decode failures name
//! the offending JSON path.

// std
use std::{ops::Deref, time::Duration as StdDuration};
// crates.io
use reqwest::{RequestBuilder, Response, redirect::Policy};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError, TransportError},
};

/// Thin wrapper around [`ReqwestClient`].
///
/// Management endpoints answer directly, so redirects are never followed. A custom client
/// passed to [`ReqwestHttpClient::with_client`] should be configured the same way.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client with the provided per-request timeout and redirects disabled.
	pub fn new(timeout: StdDuration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout).redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Sends `request`, mapping transport failures and non-`200` statuses.
pub(crate) async fn send(endpoint: &'static str, request: RequestBuilder) -> Result<Response> {
	let response =
		request.send().await.map_err(|e| TransportError::from_reqwest(endpoint, e))?;
	let status = response.status();

	if status != StatusCode::OK {
		return Err(Error::UnexpectedStatus { endpoint, status: status.as_u16() });
	}

	Ok(response)
}

/// Sends `request` and returns its raw `200 OK` body.
pub(crate) async fn send_body(
	endpoint: &'static str,
	request: RequestBuilder,
) -> Result<Vec<u8>> {
	let response = send(endpoint, request).await?;
	let body = response.bytes().await.map_err(|e| TransportError::from_reqwest(endpoint, e))?;

	Ok(body.to_vec())
}

/// Sends `request` and decodes its `200 OK` body as `T`.
pub(crate) async fn send_json<T>(endpoint: &'static str, request: RequestBuilder) -> Result<T>
where
	T: DeserializeOwned,
{
	let body = send_body(endpoint, request).await?;

	decode(endpoint, &body)
}

/// Sends `request` and discards its `200 OK` body.
pub(crate) async fn send_empty(endpoint: &'static str, request: RequestBuilder) -> Result<()> {
	let response = send(endpoint, request).await?;

	response.bytes().await.map_err(|e| TransportError::from_reqwest(endpoint, e))?;

	Ok(())
}

/// Decodes a JSON body, recording the failing path on error.
pub(crate) fn decode<T>(endpoint: &'static str, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| DecodeError { endpoint, source }.into())
}
