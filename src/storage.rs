//! Key-value persistence behind a small adapter.
//!
//! Browser storage can be missing, disabled or over quota. Every caller goes
//! through [`Persistence`], which never fails a read and logs-and-drops a
//! failed write, so the "swallow and move on" policy lives in one place.

use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use thiserror::Error;

/// Durable key holding the chosen locale tag.
pub const LOCALE_KEY: &str = "locale";
/// Session-scoped key recording that the loader already ran.
pub const LOADER_SEEN_KEY: &str = "seen-loader";
/// Sentinel stored under [`LOADER_SEEN_KEY`].
pub const LOADER_SEEN_VALUE: &str = "true";
/// Durable key holding the chosen colour theme.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Raw backend. Implementations report failures; they do not decide policy.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. Clones share the same map, which is how tests model a
/// reload within one session.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Backend for environments without any storage: nothing is remembered.
#[derive(Clone, Copy, Default)]
pub struct NoopStorage;

impl StorageBackend for NoopStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct Persistence {
    scope: &'static str,
    backend: Rc<dyn StorageBackend>,
}

impl Persistence {
    pub fn new(scope: &'static str, backend: impl StorageBackend + 'static) -> Self {
        Self {
            scope,
            backend: Rc::new(backend),
        }
    }

    pub fn memory(scope: &'static str) -> Self {
        Self::new(scope, MemoryStorage::new())
    }

    pub fn noop(scope: &'static str) -> Self {
        Self::new(scope, NoopStorage)
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    /// Best-effort write. Returns whether the value was stored.
    pub fn set(&self, key: &str, value: &str) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    scope = self.scope,
                    key,
                    error = %error,
                    "persistence write failed"
                );
                false
            }
        }
    }

    /// Best-effort removal. Returns whether the key is gone.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(
                    scope = self.scope,
                    key,
                    error = %error,
                    "persistence remove failed"
                );
                false
            }
        }
    }
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Persistence {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && Rc::ptr_eq(&self.backend, &other.backend)
    }
}
