//! Thread-safe in-memory [`SessionStore`], the tab-scoped storage analog.

// self
use crate::{
	_prelude::*,
	session::Session,
	store::{SessionStore, StoreError},
};

/// Keeps the session slot in-process; the default backend for applications and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(Arc<RwLock<Option<Session>>>);
impl SessionStore for MemorySessionStore {
	fn load(&self) -> Result<Option<Session>, StoreError> {
		Ok(self.0.read().clone())
	}

	fn save(&self, session: Session) -> Result<(), StoreError> {
		*self.0.write() = Some(session);

		Ok(())
	}

	fn clear(&self) -> Result<bool, StoreError> {
		Ok(self.0.write().take().is_some())
	}
}
