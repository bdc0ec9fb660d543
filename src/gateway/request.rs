//! Outbound request descriptors: ephemeral, constructed per call, never persisted.

// self
use crate::{
	_prelude::*,
	backend::BackendDescriptor,
	error::ConfigError,
	http::ApiRequest,
	session::AccessToken,
};

/// Describes one outbound call before the pre-request interceptor runs.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
	/// HTTP method for the call.
	pub method: http::Method,
	/// Rooted endpoint path resolved against the backend base URL.
	pub path: String,
	/// Serialized JSON body, when present.
	pub body: Option<Vec<u8>>,
	/// Extra headers appended after the gateway's defaults.
	pub headers: Vec<(String, String)>,
}
impl RequestDescriptor {
	/// Creates a descriptor for the provided method and path.
	pub fn new(method: http::Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), body: None, headers: Vec::new() }
	}

	/// Creates a GET descriptor.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(http::Method::GET, path)
	}

	/// Creates a POST descriptor.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(http::Method::POST, path)
	}

	/// Creates a PUT descriptor.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(http::Method::PUT, path)
	}

	/// Creates a DELETE descriptor.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(http::Method::DELETE, path)
	}

	/// Serializes a JSON body onto the descriptor.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body).map_err(|source| ConfigError::Body { source })?);

		Ok(self)
	}

	/// Appends an extra header after the gateway's defaults.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Resolves the descriptor into a transport request, attaching the bearer header
	/// when the pre-request interceptor supplied a credential.
	pub(crate) fn into_request(
		self,
		descriptor: &BackendDescriptor,
		bearer: Option<&AccessToken>,
	) -> Result<ApiRequest, ConfigError> {
		let url = descriptor.endpoint(&self.path)?;
		let mut builder = http::Request::builder()
			.method(self.method)
			.uri(url.as_str())
			.header(http::header::ACCEPT, "application/json");

		if self.body.is_some() {
			builder = builder.header(http::header::CONTENT_TYPE, "application/json");
		}
		if let Some(token) = bearer {
			builder = builder.header(http::header::AUTHORIZATION, token.bearer());
		}
		for (name, value) in &self.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		Ok(builder.body(self.body.unwrap_or_default())?)
	}
}
