// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state: the bearer token and the signed-in user.
//!
//! The token is persisted through a [`KeyValueStore`] so it survives
//! restarts. Everything else lives in memory for the life of the session.

use crate::error::{AppError, Result};
use crate::models::User;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

/// Storage keys.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const PENDING_EMAIL: &str = "pending_email";
    pub const PENDING_PHONE: &str = "pending_phone";
}

/// Small persistent key-value store (device storage).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Store backed by a single JSON object on disk. The whole file is
/// rewritten on each change.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                AppError::Storage(format!("Corrupt store {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::Storage(e.to_string()))?;
        }
        let data =
            serde_json::to_string_pretty(map).map_err(|e| AppError::Storage(e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| AppError::Storage(e.to_string()))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.guard();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.guard();
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Volatile store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    fn map(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map().remove(key);
        Ok(())
    }
}

/// Explicit session object shared (via `Arc`) by the transport and stores.
pub struct Session {
    store: Box<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
    user: RwLock<Option<User>>,
}

impl Session {
    /// Open a session, restoring a previously stored token if any.
    ///
    /// An unreadable store is treated as "signed out".
    pub fn restore(store: Box<dyn KeyValueStore>) -> Self {
        let token = match store.get(keys::ACCESS_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token, starting signed out");
                None
            }
        };
        Self {
            store,
            token: RwLock::new(token),
            user: RwLock::new(None),
        }
    }

    /// In-memory session with no stored token.
    pub fn in_memory() -> Self {
        Self::restore(Box::new(MemoryKeyValueStore::default()))
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Persist and cache a new bearer token.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(keys::ACCESS_TOKEN, token)?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    /// Forget the token and the current user.
    ///
    /// Local state is cleared even if the store cannot be updated.
    pub fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.store.remove(keys::ACCESS_TOKEN)
    }

    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|u| u.id)
    }

    pub fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Remember a value across app restarts (e.g. the email awaiting OTP).
    pub fn remember(&self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value)
    }

    pub fn recall(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key)
    }

    pub fn forget(&self, key: &str) -> Result<()> {
        self.store.remove(key)
    }
}
