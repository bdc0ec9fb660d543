//! Proactive access-token refresh with a single-flight guard.
//!
//! Concurrent calls that each detect a near-expiry token coalesce on one in-flight
//! refresh: the winner rotates the token, and followers re-check the store after
//! acquiring the guard and reuse the fresh credential instead of refreshing again. The
//! refresh call itself presents no bearer header; the transport's cookie jar carries the
//! out-of-band credential the backend issued at login.

mod stats;

pub use stats::RefreshStats;

// self
use crate::{
	_prelude::*,
	error::{AuthError, ConfigError, TransportError},
	gateway::{Gateway, decode_body, decode_value, extract_message},
	http::{ApiRequest, ApiTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::{AccessToken, TokenDisposition},
};

/// Payload returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshGrant {
	access_token: String,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Rotates the stored access token, coalescing concurrent callers onto one flight.
	///
	/// Fails with [`AuthError::MissingSession`] when no session exists or a logout
	/// engaged while waiting on the guard; the caller converts that into the forced
	/// logout path. On success the new token is already stored and
	/// [`SessionEvent::Refreshed`](crate::store::SessionEvent::Refreshed) has fired.
	pub async fn refresh_access_token(&self) -> Result<AccessToken> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.refresh_stats.record_attempt();

				let _flight = self.refresh_flight.lock().await;

				// The flag may have engaged while waiting on the guard; refreshing now
				// would resurrect a session that is being torn down.
				if self.logout_in_progress() {
					self.refresh_stats.record_failure();

					return Err(Error::from(AuthError::MissingSession));
				}

				let current = self
					.session
					.session()
					.map_err(|err| {
						self.refresh_stats.record_failure();
						Error::from(err)
					})?
					.ok_or_else(|| {
						self.refresh_stats.record_failure();

						Error::from(AuthError::MissingSession)
					})?;

				// Followers land here after the winner already rotated the token.
				if matches!(
					current.disposition_at(
						OffsetDateTime::now_utc(),
						self.descriptor.refresh_lookahead,
					),
					TokenDisposition::Fresh
				) {
					self.refresh_stats.record_success();

					return Ok(current.access_token);
				}

				let request = self.refresh_request().inspect_err(|_| {
					self.refresh_stats.record_failure();
				})?;
				let response = self.transport.execute(request).await.map_err(|e| {
					self.refresh_stats.record_failure();

					Error::from(TransportError::network(e))
				})?;
				let status = response.status();

				if !status.is_success() {
					self.refresh_stats.record_failure();

					return Err(Error::Backend {
						status: status.as_u16(),
						message: extract_message(response.body()),
					});
				}

				let grant: RefreshGrant =
					decode_body(response.body(), Some(status.as_u16()))
						.and_then(decode_value)
						.inspect_err(|_| {
							self.refresh_stats.record_failure();
						})?;
				let token = AccessToken::new(grant.access_token);

				self.session.replace_access_token(token.clone()).map_err(|err| {
					self.refresh_stats.record_failure();

					Error::from(err)
				})?;
				self.refresh_stats.record_success();

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	fn refresh_request(&self) -> Result<ApiRequest> {
		let url = self.descriptor.endpoint(&self.descriptor.auth.refresh)?;
		let request = http::Request::builder()
			.method(http::Method::POST)
			.uri(url.as_str())
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
