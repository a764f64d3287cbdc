//! Session state for the admin client
//!
//! The bearer token and the serialized admin profile live in a key/value
//! [`SessionStore`] under two fixed keys. They are written together at login
//! and always cleared together (logout or any 401).

use crate::core::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "admin_token";

/// Storage key for the serialized admin profile
pub const USER_KEY: &str = "admin_user";

/// Key/value storage backing the session
pub trait SessionStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Remove a value (no-op if absent)
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// In-memory session store
///
/// Useful for tests and short-lived processes. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| ClientError::Session(format!("Failed to acquire read lock: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| ClientError::Session(format!("Failed to acquire write lock: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| ClientError::Session(format!("Failed to acquire write lock: {}", e)))?;
        values.remove(key);
        Ok(())
    }
}

/// Session store persisted as a flat JSON object on disk
///
/// Meant for a small local file such as `~/.config/admin/session.json`. The
/// file is read once, on first access, and reads are served from memory
/// after that; only `set` and `remove` write to disk. Every request reads the
/// token, so request sending never blocks on file I/O once the store is
/// warm. Logins made by another process are not picked up until the store
/// is reopened.
pub struct FileSessionStore {
    path: PathBuf,
    cache: Mutex<Option<HashMap<String, String>>>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| ClientError::Session(format!("Corrupt session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ClientError::Session(e.to_string())),
        }
    }

    fn write_all(&self, values: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
            }
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content).map_err(|e| ClientError::Session(e.to_string()))
    }

    /// Run `f` on the cached values, loading them from disk on first use
    fn with_values<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> ClientResult<R>,
    ) -> ClientResult<R> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|e| ClientError::Session(format!("Failed to acquire lock: {}", e)))?;
        if cache.is_none() {
            *cache = Some(self.read_all()?);
        }
        f(cache.get_or_insert_with(HashMap::new))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        self.with_values(|values| Ok(values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.with_values(|values| {
            let mut next = values.clone();
            next.insert(key.to_string(), value.to_string());
            self.write_all(&next)?;
            *values = next;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.with_values(|values| {
            if !values.contains_key(key) {
                return Ok(());
            }
            let mut next = values.clone();
            next.remove(key);
            self.write_all(&next)?;
            *values = next;
            Ok(())
        })
    }
}

/// Handle over the session keys, shared by the client and its callers
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemorySessionStore`]
    pub fn in_memory() -> Self {
        Self::new(MemorySessionStore::new())
    }

    /// Current bearer token, if any
    ///
    /// A store that cannot be read is treated as logged out.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session token");
                None
            }
        }
    }

    /// Stored admin profile as raw JSON
    pub fn user(&self) -> Option<Value> {
        let raw = self.store.get(USER_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    /// Stored admin profile decoded into `T`
    pub fn user_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.user().and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist the token and profile after a successful login
    pub fn store_login(&self, token: &str, user: &Value) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &serde_json::to_string(user)?)
    }

    /// Remove both keys
    pub fn clear(&self) -> ClientResult<()> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
