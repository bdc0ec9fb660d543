//! Authenticated request gateway for token-guarded REST backends—bearer attachment, proactive
//! refresh, single-flight logout, and typed banking resources in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod backend;
pub mod error;
pub mod gateway;
pub mod http;
pub mod obs;
pub mod session;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
	// self
	use crate::{
		backend::BackendDescriptor,
		gateway::Gateway,
		http::ReqwestTransport,
		session::{AccessToken, Session, UserProfile},
		store::{MemorySessionStore, SessionContext, SessionStore},
	};

	/// Gateway type alias used by reqwest-backed integration tests.
	pub type ReqwestTestGateway = Gateway<ReqwestTransport>;

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.cookie_store(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Constructs a [`Gateway`] backed by an in-memory session store and the reqwest
	/// transport used across integration tests.
	pub fn build_reqwest_test_gateway(base_url: &str) -> (ReqwestTestGateway, SessionContext) {
		let descriptor = BackendDescriptor::builder(
			Url::parse(base_url).expect("Test base URL should parse successfully."),
		)
		.build()
		.expect("Test backend descriptor should build successfully.");
		let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());
		let session = SessionContext::new(store);
		let gateway =
			Gateway::with_transport(session.clone(), descriptor, test_reqwest_transport());

		(gateway, session)
	}

	/// Mints an unsigned compact JWT whose `exp` claim lands at the provided instant.
	///
	/// The gateway never verifies signatures, so a placeholder signature segment is enough
	/// for expiry-window tests.
	pub fn mint_access_token_at(expires_at: OffsetDateTime) -> String {
		let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
		let claims = serde_json::json!({
			"sub": "7",
			"iat": (expires_at - Duration::hours(1)).unix_timestamp(),
			"exp": expires_at.unix_timestamp(),
		});
		let payload = URL_SAFE_NO_PAD.encode(
			serde_json::to_vec(&claims).expect("Token claims fixture should serialize."),
		);

		format!("{header}.{payload}.fixture-signature")
	}

	/// Mints an unsigned compact JWT expiring `expires_in` from now.
	pub fn mint_access_token(expires_in: Duration) -> String {
		mint_access_token_at(OffsetDateTime::now_utc() + expires_in)
	}

	/// Seeds the session context with a token minted to expire `expires_in` from now.
	pub fn seed_session(session: &SessionContext, expires_in: Duration) -> String {
		let token = mint_access_token(expires_in);
		let profile =
			UserProfile { id: 7, name: "Fixture".into(), username: "fixture".into(), email: None };

		session
			.establish(Session::new(AccessToken::new(token.as_str())).with_profile(profile))
			.expect("Session fixture should establish successfully.");

		token
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
