//! Gateway-level error types shared across the session, transport, and resource layers.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session-storage failure.
	#[error("{0}")]
	Store(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Authentication-class failure handled by the gateway before surfacing.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Transport failure (DNS, TCP, TLS). Never retried.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response payload could not be decoded.
	#[error(transparent)]
	Payload(#[from] PayloadError),

	/// Non-auth rejection passed through from the backend unmodified.
	#[error("Backend rejected the request with HTTP {status}.")]
	Backend {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Server-supplied `message` field, when the body carried one.
		message: Option<String>,
	},
}

/// Authentication failures the gateway converges onto the forced-logout path.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Backend rejected the bearer credential; the session has already been cleared.
	#[error("Backend rejected the bearer token with HTTP {status}.")]
	Unauthorized {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Server-supplied `message` field, when the body carried one.
		message: Option<String>,
	},
	/// Access-token refresh failed, so the guarded request was aborted before dispatch.
	///
	/// This is a local rejection, not a server response: the request this error aborts
	/// never reached the network.
	#[error("Access token refresh failed; the guarded request was aborted before dispatch.")]
	RefreshAborted {
		/// Failure that brought the refresh attempt down.
		#[source]
		source: Box<Error>,
	},
	/// Refresh was requested while no refreshable session exists (cleared or being torn down).
	#[error("No refreshable session is available.")]
	MissingSession,
	/// OAuth2 redirect URL did not carry an access token.
	#[error("OAuth2 redirect URL did not include an access token.")]
	MissingRedirectToken,
}

/// Configuration and request-construction failures raised by the gateway.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Endpoint path does not resolve against the backend base URL.
	#[error("Endpoint path `{path}` does not resolve against the base URL.")]
	InvalidEndpoint {
		/// Path that failed to resolve.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint paths must be rooted so they concatenate onto the base URL predictably.
	#[error("Endpoint path `{path}` must start with `/`.")]
	EndpointNotRooted {
		/// Offending path.
		path: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Body {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Payload decode failures for backend JSON responses.
#[derive(Debug, ThisError)]
pub enum PayloadError {
	/// Backend returned malformed JSON that could not be parsed.
	#[error("Backend returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::StoreError;

	#[test]
	fn store_error_converts_into_gateway_error_with_source() {
		let store_error = StoreError::Backend { message: "snapshot unreadable".into() };
		let gateway_error: Error = store_error.clone().into();

		assert!(matches!(gateway_error, Error::Store(_)));
		assert!(gateway_error.to_string().contains("snapshot unreadable"));

		let source = StdError::source(&gateway_error)
			.expect("Gateway error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn refresh_abort_keeps_the_underlying_failure_as_source() {
		let inner = Error::Backend { status: 502, message: None };
		let err: Error = AuthError::RefreshAborted { source: Box::new(inner) }.into();

		assert!(err.to_string().contains("aborted before dispatch"));

		let source =
			StdError::source(&err).expect("Refresh abort should chain down to the causing failure.");

		assert!(source.to_string().contains("502"));
	}
}
