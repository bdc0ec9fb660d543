//! The authenticated request gateway: one outbound call surface for the whole client.
//!
//! [`Gateway::send`] wraps every backend call in two interceptors. The pre-request
//! interceptor reads the stored session, classifies the token's freshness, refreshes it
//! proactively when it is expired or inside the look-ahead window, and attaches the
//! resulting bearer header; anonymous calls go out bare. The response interceptor
//! converges every authentication rejection onto [`Gateway::logout`] so the session
//! always lands in the same cleared state no matter which detection path fired. All
//! other failures pass through to the caller unmodified.

pub mod logout;
pub mod refresh;
pub mod request;

pub use refresh::RefreshStats;
pub use request::RequestDescriptor;

// crates.io
use http::StatusCode;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	backend::BackendDescriptor,
	error::{AuthError, PayloadError, TransportError},
	gateway::logout::LogoutFlag,
	http::{ApiResponse, ApiTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::{AccessToken, TokenDisposition},
	store::SessionContext,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Coordinates authenticated calls against a single backend descriptor.
///
/// The gateway owns the transport, the shared session context, and the backend
/// configuration so call sites never handle token mechanics themselves. It is cheap to
/// clone; clones share the session, the refresh single-flight guard, and the
/// logout-in-progress flag.
#[derive(Clone)]
pub struct Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport executing every outbound call.
	pub transport: Arc<T>,
	/// Shared session context mutated by refresh and logout.
	pub session: SessionContext,
	/// Backend base URL, auth endpoints, and refresh policy.
	pub descriptor: BackendDescriptor,
	/// Shared counters for refresh outcomes.
	pub refresh_stats: Arc<RefreshStats>,
	refresh_flight: Arc<AsyncMutex<()>>,
	logout_flag: LogoutFlag,
}
impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a gateway that reuses the caller-provided transport.
	pub fn with_transport(
		session: SessionContext,
		descriptor: BackendDescriptor,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			session,
			descriptor,
			refresh_stats: Default::default(),
			refresh_flight: Default::default(),
			logout_flag: Default::default(),
		}
	}

	/// Sends a request through both interceptors and returns the decoded JSON body.
	///
	/// May mutate the stored session (refresh) or clear it (forced logout) before or
	/// after the call; see the module docs for the full pipeline.
	pub async fn send(&self, request: RequestDescriptor) -> Result<serde_json::Value> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let bearer = self.bearer_for_call().await?;
				let request = request.into_request(&self.descriptor, bearer.as_ref())?;
				let response = self
					.transport
					.execute(request)
					.await
					.map_err(|e| Error::from(TransportError::network(e)))?;

				self.inspect(response).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Sends a request and decodes the JSON body into a typed value.
	pub async fn send_as<D>(&self, request: RequestDescriptor) -> Result<D>
	where
		D: DeserializeOwned,
	{
		decode_value(self.send(request).await?)
	}

	/// Pre-request interceptor: resolves the bearer credential for one outbound call.
	///
	/// Runs to completion (including any refresh round-trip) before the guarded request
	/// is dispatched. Refresh failure tears the session down and aborts the call with a
	/// local rejection; the caller never receives a response for it.
	async fn bearer_for_call(&self) -> Result<Option<AccessToken>> {
		let Some(session) = self.session.session()? else {
			return Ok(None);
		};

		// A teardown in progress must not be resurrected by a refresh; ride the
		// existing token and let the backend reject it if it is already dead.
		if self.logout_flag.engaged() {
			return Ok(Some(session.access_token));
		}

		match session
			.disposition_at(OffsetDateTime::now_utc(), self.descriptor.refresh_lookahead)
		{
			TokenDisposition::Fresh => Ok(Some(session.access_token)),
			TokenDisposition::NearExpiry | TokenDisposition::Expired =>
				match self.refresh_access_token().await {
					Ok(token) => Ok(Some(token)),
					Err(err) => {
						let _ = self.logout().await;

						Err(AuthError::RefreshAborted { source: Box::new(err) }.into())
					},
				},
		}
	}

	/// Response interceptor: converges authentication rejections onto the logout path
	/// and passes everything else through.
	async fn inspect(&self, response: ApiResponse) -> Result<serde_json::Value> {
		let status = response.status();

		if status == StatusCode::UNAUTHORIZED {
			let message = extract_message(response.body());

			let _ = self.logout().await;

			return Err(AuthError::Unauthorized { status: status.as_u16(), message }.into());
		}
		if !status.is_success() {
			return Err(Error::Backend {
				status: status.as_u16(),
				message: extract_message(response.body()),
			});
		}

		decode_body(response.body(), Some(status.as_u16()))
	}

	/// Reports whether a logout is currently tearing the session down.
	pub fn logout_in_progress(&self) -> bool {
		self.logout_flag.engaged()
	}
}
#[cfg(feature = "reqwest")]
impl Gateway<ReqwestTransport> {
	/// Creates a gateway backed by the crate's default reqwest transport.
	///
	/// The transport carries an in-memory cookie jar so the out-of-band refresh
	/// credential set at login flows back to the refresh endpoint.
	pub fn new(session: SessionContext, descriptor: BackendDescriptor) -> Result<Self> {
		Ok(Self::with_transport(session, descriptor, ReqwestTransport::new()?))
	}
}
impl<T> Debug for Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Gateway")
			.field("descriptor", &self.descriptor)
			.field("logout_in_progress", &self.logout_flag.engaged())
			.finish()
	}
}

/// Decodes a response body into JSON, treating an empty body as `null`.
pub(crate) fn decode_body(bytes: &[u8], status: Option<u16>) -> Result<serde_json::Value> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(serde_json::Value::Null);
	}

	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| PayloadError::Json { source, status }.into())
}

/// Decodes an already-parsed JSON value into a typed DTO.
pub(crate) fn decode_value<D>(value: serde_json::Value) -> Result<D>
where
	D: DeserializeOwned,
{
	serde_path_to_error::deserialize(value)
		.map_err(|source| PayloadError::Json { source, status: None }.into())
}

/// Pulls the backend's conventional `message` field out of an error body, if present.
pub(crate) fn extract_message(bytes: &[u8]) -> Option<String> {
	serde_json::from_slice::<serde_json::Value>(bytes)
		.ok()?
		.get("message")?
		.as_str()
		.map(str::to_owned)
}
