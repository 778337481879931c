//! Client-level error types shared across the token cache, the REST client, and configuration.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Remote endpoint answered with anything other than `200 OK`.
	#[error("Endpoint `{endpoint}` returned unexpected HTTP status {status}.")]
	UnexpectedStatus {
		/// Logical endpoint label.
		endpoint: &'static str,
		/// HTTP status code exactly as received.
		status: u16,
	},
	/// Token endpoint issued a token type other than `Bearer`.
	#[error("Token endpoint issued an unexpected token type: {token_type}.")]
	UnexpectedTokenType {
		/// Token type reported by the token endpoint.
		token_type: String,
	},
	/// Requested LIFF app is absent from the channel's app list.
	#[error("LIFF app `{liff_id}` was not found.")]
	NotFound {
		/// Identifier that was looked up.
		liff_id: String,
	},
}
impl Error {
	/// Returns `true` when the failure is plausibly temporary (transport failures, 429, 5xx).
	///
	/// The client never retries on its own; the classification is a hint for callers.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::Transport(_) => true,
			Self::UnexpectedStatus { status, .. } => *status == 429 || (500..600).contains(status),
			_ => false,
		}
	}

	/// HTTP status code carried by [`Error::UnexpectedStatus`].
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::UnexpectedStatus { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint cannot be parsed or joined.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint must use HTTPS unless it targets a loopback host.
	#[error("The API endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// No channel identifier was configured or found in the environment.
	#[error("Channel identifier is required; set it explicitly or via `LINE_CHANNEL_ID`.")]
	MissingChannelId,
	/// No channel secret was configured or found in the environment.
	#[error("Channel secret is required; set it explicitly or via `LINE_CHANNEL_SECRET`.")]
	MissingChannelSecret,
	/// Identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the `{endpoint}` endpoint.")]
	Network {
		/// Logical endpoint label.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request to the `{endpoint}` endpoint timed out.")]
	Timeout {
		/// Logical endpoint label.
		endpoint: &'static str,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Classifies a reqwest failure raised while talking to `endpoint`.
	pub fn from_reqwest(endpoint: &'static str, e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::Timeout { endpoint, source: Box::new(e) }
		} else {
			Self::Network { endpoint, source: Box::new(e) }
		}
	}
}

/// Response body was not valid JSON or did not match the expected shape.
#[derive(Debug, ThisError)]
pub struct DecodeError {
	/// Logical endpoint label.
	pub endpoint: &'static str,
	/// Structured parsing failure, including the JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl Display for DecodeError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let path = self.source.path();
		let inner = self.source.inner();

		// An empty path means the document root failed; `Path` renders that as `.`.
		if path.iter().next().is_none() {
			write!(f, "Endpoint `{}` returned an undecodable body: {inner}.", self.endpoint)
		} else {
			write!(
				f,
				"Endpoint `{}` returned an undecodable body at `{path}`: {inner}.",
				self.endpoint
			)
		}
	}
}
