//! User auth resource: login, signup, profile, OAuth2 redirect completion, email codes.

// self
use crate::{
	_prelude::*,
	error::AuthError,
	gateway::{Gateway, RequestDescriptor},
	http::ApiTransport,
	session::{AccessToken, Session, UserProfile},
};

const ME_PATH: &str = "/user/me";
const SIGNUP_PATH: &str = "/user/signup";
const ADDITIONAL_INFO_PATH: &str = "/user/oauth2/additional-info";
const EMAIL_SEND_PATH: &str = "/user/email/send";
const EMAIL_VERIFY_PATH: &str = "/user/email/verify";

/// Login credentials.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
	/// Login username.
	pub username: String,
	/// Plaintext password; sent once over TLS, never stored.
	pub password: String,
}

/// Registration fields for classic signup.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
	/// Display name.
	pub name: String,
	/// Birth date.
	#[serde(with = "crate::api::backend_date")]
	pub birth: time::Date,
	/// Login username.
	pub username: String,
	/// Plaintext password; the backend enforces complexity rules.
	pub password: String,
	/// Postal address.
	pub address: String,
	/// Phone number.
	pub phone: String,
	/// Email address; must pass code verification before signup completes.
	pub email: String,
}

/// Additional profile fields an OAuth2 user supplies after the first redirect.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfoRequest {
	/// Login username chosen by the user.
	pub username: String,
	/// Birth date.
	#[serde(with = "crate::api::backend_date")]
	pub birth: time::Date,
	/// Postal address.
	pub address: String,
	/// Phone number.
	pub phone: String,
}

/// Wire shape of the login/me responses: the profile plus the issued token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
	id: i64,
	name: String,
	username: String,
	#[serde(default)]
	email: Option<String>,
	access_token: String,
	#[serde(default)]
	message: Option<String>,
}
impl LoginResponse {
	fn profile(&self) -> UserProfile {
		UserProfile {
			id: self.id,
			name: self.name.clone(),
			username: self.username.clone(),
			email: self.email.clone(),
		}
	}
}

/// Result of a completed login.
#[derive(Clone, Debug)]
pub struct LoginOutcome {
	/// Profile now cached in the session.
	pub profile: UserProfile,
	/// Human-readable greeting from the backend, when supplied.
	pub message: Option<String>,
}

/// Result of a completed OAuth2 redirect.
#[derive(Clone, Debug)]
pub struct OAuth2Landing {
	/// Profile now cached in the session.
	pub profile: UserProfile,
	/// Whether the backend still needs the additional-info form.
	pub need_additional_info: bool,
}

impl<T> Gateway<T>
where
	T: ?Sized + ApiTransport,
{
	/// Authenticates with username/password and establishes the session.
	///
	/// The backend also sets the HTTP-only refresh cookie on this response; the
	/// transport's cookie jar keeps it for later refresh calls.
	pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginOutcome> {
		let login_path = self.descriptor.auth.login.clone();
		let response: LoginResponse =
			self.send_as(RequestDescriptor::post(login_path).json(credentials)?).await?;
		let profile = response.profile();

		self.session.establish(
			Session::new(AccessToken::new(response.access_token.as_str()))
				.with_profile(profile.clone()),
		)?;

		Ok(LoginOutcome { profile, message: response.message })
	}

	/// Registers a new user. Does not log in; callers follow up with [`Gateway::login`].
	pub async fn signup(&self, registration: &SignupRequest) -> Result<UserProfile> {
		self.send_as(RequestDescriptor::post(SIGNUP_PATH).json(registration)?).await
	}

	/// Fetches the current profile and refreshes the cached copy.
	pub async fn me(&self) -> Result<UserProfile> {
		let response: LoginResponse = self.send_as(RequestDescriptor::get(ME_PATH)).await?;
		let profile = response.profile();

		self.session.update_profile(profile.clone())?;

		Ok(profile)
	}

	/// Completes an OAuth2 login from the redirect URL the backend sent the browser to.
	///
	/// Stores the token carried in the `token` query parameter, then fetches the profile
	/// to finish establishing the session. Any failure after the token was stored tears
	/// the partial session back down so the caller can return to the login view.
	pub async fn complete_oauth2_redirect(&self, redirect_url: &Url) -> Result<OAuth2Landing> {
		let mut token = None;
		let mut need_additional_info = false;

		for (key, value) in redirect_url.query_pairs() {
			match key.as_ref() {
				"token" => token = Some(value.into_owned()),
				"needAdditionalInfo" => need_additional_info = value == "true",
				_ => {},
			}
		}

		let Some(token) = token else {
			return Err(AuthError::MissingRedirectToken.into());
		};

		self.session.establish(Session::new(AccessToken::new(token)))?;

		match self.me().await {
			Ok(profile) => Ok(OAuth2Landing { profile, need_additional_info }),
			Err(err) => {
				let _ = self.session.clear();

				Err(err)
			},
		}
	}

	/// Submits the additional-info form for an OAuth2 user.
	pub async fn submit_additional_info(&self, info: &AdditionalInfoRequest) -> Result<()> {
		self.send(RequestDescriptor::post(ADDITIONAL_INFO_PATH).json(info)?).await?;

		Ok(())
	}

	/// Asks the backend to email a verification code.
	pub async fn request_email_code(&self, email: &str) -> Result<()> {
		self.send(RequestDescriptor::post(query_path(EMAIL_SEND_PATH, &[("email", email)])))
			.await?;

		Ok(())
	}

	/// Confirms an emailed verification code.
	pub async fn verify_email_code(&self, email: &str, code: &str) -> Result<()> {
		self.send(RequestDescriptor::post(query_path(
			EMAIL_VERIFY_PATH,
			&[("email", email), ("code", code)],
		)))
		.await?;

		Ok(())
	}
}

fn query_path(path: &str, params: &[(&str, &str)]) -> String {
	let mut query = url::form_urlencoded::Serializer::new(String::new());

	for (key, value) in params {
		query.append_pair(key, value);
	}

	format!("{path}?{}", query.finish())
}
