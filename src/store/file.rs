//! Simple file-backed [`SessionStore`] for desktop shells and command-line frontends.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	session::Session,
	store::{SessionStore, StoreError},
};

/// Persists the session slot to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
	path: PathBuf,
	inner: Arc<RwLock<Option<Session>>>,
}
impl FileSessionStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = if path.exists() { Self::load_snapshot(&path)? } else { None };

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	fn load_snapshot(path: &Path) -> Result<Option<Session>, StoreError> {
		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(None);
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, contents: &Option<Session>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize session snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl SessionStore for FileSessionStore {
	fn load(&self) -> Result<Option<Session>, StoreError> {
		Ok(self.inner.read().clone())
	}

	fn save(&self, session: Session) -> Result<(), StoreError> {
		let mut guard = self.inner.write();

		*guard = Some(session);
		self.persist_locked(&guard)
	}

	fn clear(&self) -> Result<bool, StoreError> {
		let mut guard = self.inner.write();
		let existed = guard.take().is_some();

		self.persist_locked(&guard)?;

		Ok(existed)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// self
	use super::*;
	use crate::session::{AccessToken, UserProfile};

	fn temp_path() -> PathBuf {
		let unique = format!(
			"bearer_gateway_session_store_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path();
		let store = FileSessionStore::open(&path).expect("Failed to open session store snapshot.");
		let profile = UserProfile {
			id: 11,
			name: "Park".into(),
			username: "park03".into(),
			email: Some("park@example.com".into()),
		};

		store
			.save(Session::new(AccessToken::new("persisted-token")).with_profile(profile.clone()))
			.expect("Failed to save fixture session to file store.");
		drop(store);

		let reopened =
			FileSessionStore::open(&path).expect("Failed to reopen session store snapshot.");
		let fetched = reopened
			.load()
			.expect("Failed to load fixture session from file store.")
			.expect("File store lost the session after reopen.");

		assert_eq!(fetched.access_token.expose(), "persisted-token");
		assert_eq!(fetched.profile, Some(profile));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary session snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn clear_persists_the_empty_slot() {
		let path = temp_path();
		let store = FileSessionStore::open(&path).expect("Failed to open session store snapshot.");

		store
			.save(Session::new(AccessToken::new("short-lived")))
			.expect("Failed to save fixture session to file store.");

		assert!(store.clear().expect("Clear should succeed for the file store."));
		drop(store);

		let reopened =
			FileSessionStore::open(&path).expect("Failed to reopen session store snapshot.");

		assert!(reopened.load().expect("Load should succeed after clear.").is_none());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary session snapshot {}: {e}", path.display())
		});
	}
}
