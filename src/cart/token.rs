use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde_json::Value;

use super::error::CartError;

/// Key the bearer token is stored under.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Source of the bearer token sent with every cart request.
pub trait TokenStore: Send + Sync {
    /// The current token, or `None` for an anonymous session.
    fn access_token(&self) -> Option<String>;
}

/// Token persisted in a JSON key-value file shared with the rest of the app.
///
/// The file is read once and the token kept in memory, so request paths do
/// no blocking I/O. Writes through this store update the cached value; call
/// [`FileTokenStore::reload`] after another process rewrites the file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // `None` until the file has been read successfully.
    cached: Mutex<Option<Option<String>>>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forgets the cached token; the next lookup reads the file again.
    pub fn reload(&self) {
        *self.cache() = None;
    }

    fn cache(&self) -> MutexGuard<'_, Option<Option<String>>> {
        self.cached.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>, CartError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, Value>) -> Result<(), CartError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }

    /// Stores `token`, keeping any other keys already in the file.
    pub fn save_access_token(&self, token: &str) -> Result<(), CartError> {
        let mut entries = self.read_entries()?;
        entries.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)?;
        *self.cache() = Some(usable(token));
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CartError> {
        let mut entries = self.read_entries()?;
        if entries.remove(ACCESS_TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        *self.cache() = Some(None);
        Ok(())
    }
}

fn usable(token: &str) -> Option<String> {
    Some(token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        let mut cached = self.cache();
        if let Some(token) = cached.as_ref() {
            return token.clone();
        }
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "token file unreadable");
                return None;
            }
        };
        let token = entries
            .get(ACCESS_TOKEN_KEY)
            .and_then(Value::as_str)
            .and_then(usable);
        *cached = Some(token.clone());
        token
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn set(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|token| !token.trim().is_empty())
    }
}
