//! Session teardown: best-effort backend notification, unconditional clear, one signal.
//!
//! [`Gateway::logout`] is idempotent and convergent: explicit logout, refresh failure,
//! and a 401 rejection all land here, and the session always ends cleared with at most
//! one landing-redirect signal per teardown. The logout-in-progress flag suppresses the
//! refresh path for the duration so a concurrent refresh cannot resurrect the session.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	gateway::Gateway,
	http::{ApiRequest, ApiTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	session::AccessToken,
};

/// Process-wide logout-in-progress flag shared by gateway clones.
///
/// Engaging the flag hands back an RAII guard; dropping the guard releases the flag on
/// every exit path, including panics and early returns.
#[derive(Clone, Debug, Default)]
pub(crate) struct LogoutFlag(Arc<AtomicBool>);
impl LogoutFlag {
	/// Returns `true` while a logout holds the flag.
	pub(crate) fn engaged(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}

	/// Attempts to engage the flag, returning `None` when a logout already holds it.
	pub(crate) fn engage(&self) -> Option<LogoutGuard> {
		self.0
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_ok()
			.then(|| LogoutGuard(self.0.clone()))
	}
}

/// RAII guard releasing the logout flag on drop.
pub(crate) struct LogoutGuard(Arc<AtomicBool>);
impl Drop for LogoutGuard {
	fn drop(&mut self) {
		self.0.store(false, Ordering::SeqCst);
	}
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Tears the session down and signals observers to render the landing view.
	///
	/// Notifies the backend on a best-effort basis (a failed notification never blocks
	/// the teardown), then unconditionally clears the stored token and profile. Calls
	/// arriving while a teardown is already underway return immediately, and the
	/// landing signal fires at most once per teardown.
	pub async fn logout(&self) -> Result<()> {
		const KIND: CallKind = CallKind::Logout;

		let Some(_teardown) = self.logout_flag.engage() else {
			return Ok(());
		};
		let span = CallSpan::new(KIND, "logout");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				if let Ok(Some(token)) = self.session.access_token() {
					if let Ok(request) = self.logout_request(&token) {
						let _ = self.transport.execute(request).await;
					}
				}

				self.session.clear()?;

				Ok(())
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	fn logout_request(&self, token: &AccessToken) -> Result<ApiRequest> {
		let url = self.descriptor.endpoint(&self.descriptor.auth.logout)?;
		let request = http::Request::builder()
			.method(http::Method::POST)
			.uri(url.as_str())
			.header(http::header::AUTHORIZATION, token.bearer())
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flag_guard_releases_on_every_exit_path() {
		let flag = LogoutFlag::default();

		{
			let guard = flag.engage().expect("First engage should win the flag.");

			assert!(flag.engaged());
			assert!(flag.engage().is_none(), "Re-engaging an engaged flag must fail.");

			drop(guard);
		}

		assert!(!flag.engaged());
		assert!(flag.engage().is_some(), "Released flags must be engageable again.");
	}
}
