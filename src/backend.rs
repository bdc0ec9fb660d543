//! Backend descriptor: the fixed base URL, auth endpoint paths, and refresh policy.

// self
use crate::{_prelude::*, error::ConfigError};

/// Default look-ahead window for proactive refresh.
///
/// A token expiring within this window is refreshed before the guarded request is
/// dispatched, so calls in flight never ride a credential about to lapse.
pub const DEFAULT_REFRESH_LOOKAHEAD: Duration = Duration::minutes(10);

/// Errors raised while constructing or validating backend descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum BackendDescriptorError {
	/// The base URL must use HTTPS; bearer tokens ride every request.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// The base URL cannot serve as a prefix for endpoint paths.
	#[error("The base URL cannot be a base for endpoint paths: {url}.")]
	UnusableBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Auth endpoint paths must be rooted.
	#[error("The {endpoint} endpoint path must start with `/`: {path}.")]
	EndpointNotRooted {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Offending path.
		path: String,
	},
	/// The refresh look-ahead window cannot be negative.
	#[error("The refresh look-ahead window cannot be negative.")]
	NegativeLookahead,
}

/// Auth endpoint paths resolved against the base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEndpoints {
	/// Login path receiving `{username, password}`.
	pub login: String,
	/// Logout notification path.
	pub logout: String,
	/// Refresh path relying on the out-of-band cookie credential.
	pub refresh: String,
}
impl Default for AuthEndpoints {
	fn default() -> Self {
		Self {
			login: "/user/login".into(),
			logout: "/user/logout".into(),
			refresh: "/user/refresh".into(),
		}
	}
}

/// External configuration for a token-guarded backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
	/// Base URL every endpoint path concatenates onto.
	pub base_url: Url,
	/// Auth endpoint paths.
	pub auth: AuthEndpoints,
	/// Look-ahead window for proactive refresh.
	pub refresh_lookahead: Duration,
}
impl BackendDescriptor {
	/// Returns a builder seeded with the provided base URL.
	pub fn builder(base_url: Url) -> BackendDescriptorBuilder {
		BackendDescriptorBuilder::new(base_url)
	}

	/// Resolves a rooted endpoint path against the base URL.
	///
	/// Paths concatenate onto the base the way the original frontends did, so a base of
	/// `https://host/api` plus `/user/me` yields `https://host/api/user/me`.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		if !path.starts_with('/') {
			return Err(ConfigError::EndpointNotRooted { path: path.into() });
		}

		let joined = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.into(), source })
	}
}

/// Builder for [`BackendDescriptor`] values.
#[derive(Debug)]
pub struct BackendDescriptorBuilder {
	/// Base URL being configured.
	pub base_url: Url,
	/// Auth endpoint paths being configured.
	pub auth: AuthEndpoints,
	/// Refresh look-ahead window being configured.
	pub refresh_lookahead: Duration,
}
impl BackendDescriptorBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base_url: Url) -> Self {
		Self { base_url, auth: AuthEndpoints::default(), refresh_lookahead: DEFAULT_REFRESH_LOOKAHEAD }
	}

	/// Overrides the login endpoint path.
	pub fn login_endpoint(mut self, path: impl Into<String>) -> Self {
		self.auth.login = path.into();

		self
	}

	/// Overrides the logout endpoint path.
	pub fn logout_endpoint(mut self, path: impl Into<String>) -> Self {
		self.auth.logout = path.into();

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_endpoint(mut self, path: impl Into<String>) -> Self {
		self.auth.refresh = path.into();

		self
	}

	/// Overrides the refresh look-ahead window (defaults to 10 minutes).
	pub fn refresh_lookahead(mut self, window: Duration) -> Self {
		self.refresh_lookahead = window;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<BackendDescriptor, BackendDescriptorError> {
		let descriptor = BackendDescriptor {
			base_url: self.base_url,
			auth: self.auth,
			refresh_lookahead: self.refresh_lookahead,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl BackendDescriptor {
	fn validate(&self) -> Result<(), BackendDescriptorError> {
		if self.base_url.scheme() != "https" {
			return Err(BackendDescriptorError::InsecureBaseUrl {
				url: self.base_url.to_string(),
			});
		}
		if self.base_url.cannot_be_a_base() {
			return Err(BackendDescriptorError::UnusableBaseUrl {
				url: self.base_url.to_string(),
			});
		}
		if self.refresh_lookahead.is_negative() {
			return Err(BackendDescriptorError::NegativeLookahead);
		}

		validate_endpoint("login", &self.auth.login)?;
		validate_endpoint("logout", &self.auth.logout)?;
		validate_endpoint("refresh", &self.auth.refresh)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, path: &str) -> Result<(), BackendDescriptorError> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(BackendDescriptorError::EndpointNotRooted { endpoint: name, path: path.into() })
	}
}
