//! Session model: the bearer secret, its decoded claims, and the cached user profile.

pub mod claims;
pub mod profile;
pub mod secret;

pub use claims::*;
pub use profile::*;
pub use secret::*;

// self
use crate::_prelude::*;

/// Freshness classification for a stored access token relative to a look-ahead window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenDisposition {
	/// Token expires comfortably beyond the look-ahead window; attach it unchanged.
	Fresh,
	/// Token expires within the look-ahead window; refresh before dispatch.
	NearExpiry,
	/// Token already expired, or its claims could not be decoded.
	Expired,
}

/// Authenticated client session: the access token plus the cached profile.
///
/// Owned by a single [`SessionStore`](crate::store::SessionStore) slot for the lifetime
/// of the session; only the gateway and the login/logout flows mutate it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
	/// Short-lived bearer secret attached to authenticated calls.
	pub access_token: AccessToken,
	/// Cached user profile, populated on login or after a `/user/me` fetch.
	pub profile: Option<UserProfile>,
}
impl Session {
	/// Creates a session holding only an access token.
	pub fn new(access_token: AccessToken) -> Self {
		Self { access_token, profile: None }
	}

	/// Attaches the cached profile.
	pub fn with_profile(mut self, profile: UserProfile) -> Self {
		self.profile = Some(profile);

		self
	}

	/// Classifies the stored token's freshness at the provided instant.
	///
	/// A token whose claims fail to decode is reported as [`TokenDisposition::Expired`]:
	/// the client re-authenticates rather than dispatching a garbled credential.
	pub fn disposition_at(&self, now: OffsetDateTime, lookahead: Duration) -> TokenDisposition {
		let Ok(claims) = AccessClaims::decode(self.access_token.expose()) else {
			return TokenDisposition::Expired;
		};
		let Ok(expires_at) = claims.expires_at() else {
			return TokenDisposition::Expired;
		};

		if now >= expires_at {
			TokenDisposition::Expired
		} else if expires_at - now <= lookahead {
			TokenDisposition::NearExpiry
		} else {
			TokenDisposition::Fresh
		}
	}
}
