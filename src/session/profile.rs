//! Cached user profile carried alongside the access token.

// self
use crate::_prelude::*;

/// User profile cached in the session after login or a `/user/me` fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Backend user identifier.
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Login username.
	pub username: String,
	/// Email address; absent for OAuth2 users who have not completed additional info.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}
