//! Transport primitives for backend REST calls.
//!
//! The module exposes [`ApiTransport`] so downstream crates can integrate custom HTTP
//! clients. The gateway speaks plain [`http`] request/response values at this seam;
//! implementations own connection pooling, TLS, and the cookie jar that carries the
//! out-of-band refresh credential.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Outbound request value handed to transports.
pub type ApiRequest = http::Request<Vec<u8>>;
/// Response value returned by transports.
pub type ApiResponse = http::Response<Vec<u8>>;

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing backend REST calls.
///
/// The trait is the gateway's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can sit behind `Arc` and serve every
/// call site, and the returned futures must own whatever state they need so they remain
/// `Send` for the lifetime of the in-flight request.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes the request, returning the full response with status, headers, and body.
	///
	/// Implementations must not interpret statuses: the gateway's response interceptor
	/// owns the 401-handling policy, so error statuses come back as `Ok` responses and
	/// only connection-level failures surface as `Err`.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default constructor enables the cookie store: the backend issues the refresh
/// credential as an HTTP-only cookie at login, and the refresh endpoint is called with
/// no bearer header, so the jar is what keeps refresh working.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds the default transport with an in-memory cookie jar.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().cookie_store(true).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing [`ReqwestClient`].
	///
	/// Callers supplying their own client should keep a cookie store enabled, or the
	/// refresh endpoint will be called without its credential.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = ApiResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
