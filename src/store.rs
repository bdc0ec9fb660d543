//! Session persistence contracts, built-in stores, and the shared session context.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

// self
use crate::{
	_prelude::*,
	session::{AccessToken, Session, UserProfile},
};

/// Storage backend contract for the single client session.
///
/// Implementations own one session slot, mirroring tab-scoped browser storage: there is
/// no keying, only the current session or nothing. All operations are synchronous; the
/// slot is small and the built-in backends complete without awaiting.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Returns the stored session, if one exists.
	fn load(&self) -> Result<Option<Session>, StoreError>;

	/// Persists or replaces the stored session.
	fn save(&self, session: Session) -> Result<(), StoreError>;

	/// Removes the stored session, reporting whether one was present.
	fn clear(&self) -> Result<bool, StoreError>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Session state transitions broadcast to in-process observers.
///
/// Navigation and menu components subscribe via [`SessionContext::on_change`] to switch
/// between authenticated and anonymous views. `Cleared` doubles as the redirect-to-landing
/// signal and fires at most once per teardown.
#[derive(Clone, Debug)]
pub enum SessionEvent {
	/// A session was stored after login or OAuth2 redirect completion.
	Established {
		/// Profile cached with the new session, when already known.
		profile: Option<UserProfile>,
	},
	/// The access token was replaced in place by a refresh.
	Refreshed,
	/// The session was torn down; observers should render the unauthenticated landing view.
	Cleared,
}

type Watcher = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Shared session context handed to the gateway and the login/logout flows.
///
/// Wraps a [`SessionStore`] with a watcher registry so every mutation flows through one
/// place and emits exactly one [`SessionEvent`]. Clones share the same store and watchers.
#[derive(Clone)]
pub struct SessionContext {
	store: Arc<dyn SessionStore>,
	watchers: Arc<RwLock<Vec<Watcher>>>,
}
impl SessionContext {
	/// Creates a context over the provided store.
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self { store, watchers: Arc::new(RwLock::new(Vec::new())) }
	}

	/// Returns the stored session, if any.
	pub fn session(&self) -> Result<Option<Session>, StoreError> {
		self.store.load()
	}

	/// Returns the stored access token, if any.
	pub fn access_token(&self) -> Result<Option<AccessToken>, StoreError> {
		Ok(self.store.load()?.map(|session| session.access_token))
	}

	/// Returns the cached profile, if any.
	pub fn profile(&self) -> Result<Option<UserProfile>, StoreError> {
		Ok(self.store.load()?.and_then(|session| session.profile))
	}

	/// Stores a freshly created session and broadcasts [`SessionEvent::Established`].
	pub fn establish(&self, session: Session) -> Result<(), StoreError> {
		let profile = session.profile.clone();

		self.store.save(session)?;
		self.notify(&SessionEvent::Established { profile });

		Ok(())
	}

	/// Replaces the cached profile on the stored session without announcing a transition.
	pub fn update_profile(&self, profile: UserProfile) -> Result<(), StoreError> {
		if let Some(mut session) = self.store.load()? {
			session.profile = Some(profile);
			self.store.save(session)?;
		}

		Ok(())
	}

	/// Swaps the access token in place, preserving the cached profile, and broadcasts
	/// [`SessionEvent::Refreshed`].
	pub fn replace_access_token(&self, token: AccessToken) -> Result<(), StoreError> {
		let session = match self.store.load()? {
			Some(mut session) => {
				session.access_token = token;

				session
			},
			None => Session::new(token),
		};

		self.store.save(session)?;
		self.notify(&SessionEvent::Refreshed);

		Ok(())
	}

	/// Clears the stored session.
	///
	/// [`SessionEvent::Cleared`] fires only when a session was actually present, so
	/// repeated teardowns produce a single landing redirect.
	pub fn clear(&self) -> Result<bool, StoreError> {
		let cleared = self.store.clear()?;

		if cleared {
			self.notify(&SessionEvent::Cleared);
		}

		Ok(cleared)
	}

	/// Registers a watcher invoked synchronously on every session transition.
	pub fn on_change(&self, watcher: impl Fn(&SessionEvent) + Send + Sync + 'static) {
		self.watchers.write().push(Box::new(watcher));
	}

	fn notify(&self, event: &SessionEvent) {
		for watcher in self.watchers.read().iter() {
			watcher(event);
		}
	}
}
impl Debug for SessionContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionContext").field("watchers", &self.watchers.read().len()).finish()
	}
}
