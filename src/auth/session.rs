//! Session persistence for the signed-in user.
//!
//! The session lives in one storage entry holding the serialized [`User`].
//! It is restored on startup, written on login and removed on logout.

use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{AuthClient, Credentials, User};
use crate::error::{Error, Result};

/// Key/value storage backing the session entry
pub trait SessionStorage: Send + Sync {
    /// Read the entry stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous entry
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the entry under `key`; deleting a missing entry is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each entry as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        write_private(&self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `value` readable by the owner only, since it holds the token
#[cfg(unix)]
fn write_private(path: &Path, value: &str) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(value.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, value: &str) -> io::Result<()> {
    fs::write(path, value)
}

/// In-process storage; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::general("session storage lock poisoned"))
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// The session context handed to views
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
    user: Option<User>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            user: None,
        }
    }

    /// The signed-in user, if any
    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Bearer token of the signed-in user
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.token.as_str())
    }

    /// Load the persisted session.
    ///
    /// Entries without a token or username are ignored; entries that fail to
    /// parse are deleted.
    pub fn restore(&mut self) -> Result<Option<User>> {
        let raw = match self.storage.load(&self.key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) if !user.token.is_empty() && !user.username.is_empty() => {
                info!("Restored session for {}", user.username);
                self.user = Some(user.clone());
                Ok(Some(user))
            }
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("Discarding unreadable session entry {}: {}", self.key, e);
                self.storage.remove(&self.key)?;
                Ok(None)
            }
        }
    }

    /// Sign in against the gateway and persist the resulting session
    pub async fn login(&mut self, auth: &AuthClient, credentials: &Credentials) -> Result<User> {
        let user = auth.login(credentials).await?;
        self.establish(user.clone())?;
        Ok(user)
    }

    /// Persist `user` as the current session
    pub fn establish(&mut self, user: User) -> Result<()> {
        let raw = serde_json::to_string(&user)?;
        self.storage.save(&self.key, &raw)?;
        info!("Signed in as {} ({})", user.username, user.role.label());
        self.user = Some(user);
        Ok(())
    }

    /// Clear both the persisted entry and the in-memory user
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove(&self.key)?;
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.username);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Lab, Role};

    fn admin() -> User {
        User {
            username: "qc.admin".to_string(),
            role: Role::CentralAdmin,
            lab: Lab::Central,
            token: "tok-123".to_string(),
        }
    }

    #[test]
    fn establish_then_restore_in_a_fresh_store() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::new(storage.clone(), "lims_auth");
        store.establish(admin()).unwrap();

        let mut reloaded = SessionStore::new(storage, "lims_auth");
        assert_eq!(reloaded.restore().unwrap(), Some(admin()));
        assert_eq!(reloaded.token(), Some("tok-123"));
    }

    #[test]
    fn logout_clears_the_entry() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::new(storage.clone(), "lims_auth");
        store.establish(admin()).unwrap();
        store.logout().unwrap();

        assert!(store.current().is_none());
        assert_eq!(storage.load("lims_auth").unwrap(), None);
        assert_eq!(SessionStore::new(storage, "lims_auth").restore().unwrap(), None);
    }

    #[test]
    fn corrupt_entries_are_removed() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        storage.save("lims_auth", "{not json").unwrap();

        let mut store = SessionStore::new(storage.clone(), "lims_auth");
        assert_eq!(store.restore().unwrap(), None);
        assert_eq!(storage.load("lims_auth").unwrap(), None);
    }

    #[test]
    fn entries_without_token_are_ignored() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        storage
            .save(
                "lims_auth",
                r#"{"username":"op1","role":"PLANT_EMPLOYEE","lab":"plant-2","token":""}"#,
            )
            .unwrap();

        let mut store = SessionStore::new(storage, "lims_auth");
        assert_eq!(store.restore().unwrap(), None);
        assert!(store.current().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lims_auth.json");
        fs::write(&path, "stale").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileStorage::new(dir.path());
        storage.save("lims_auth", "{}").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(storage.load("lims_auth").unwrap().as_deref(), Some("{}"));
    }
}
