//! Key-value storage capability.
//!
//! DESIGN
//! ======
//! Rather than guarding every storage access with "is there a browser?"
//! conditionals, the host injects a `Storage` implementation at
//! construction, so business logic never branches on the environment.
//! Two separate instances model the web platform split: one
//! persistent store (the `user` mirror survives restarts) and one ephemeral
//! per-session store (the CSRF token does not).

use std::collections::HashMap;
use std::sync::Mutex;

/// String key-value store with interior mutability.
///
/// Implementations must tolerate concurrent access; callers treat every
/// operation as infallible (a store that cannot write simply drops the
/// value, mirroring browser storage in private-mode edge cases).
pub trait Storage: Send + Sync {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
    /// Delete the value under `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// In-process `Storage` backed by a mutex-guarded map.
///
/// Serves as both the native implementation and the test double.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
