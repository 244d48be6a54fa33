//! Session state: the current user, its persistent mirror, and the auth phase.
//!
//! ARCHITECTURE
//! ============
//! The authoritative session lives server-side behind an HttpOnly cookie the
//! client never reads. What this module owns is the client's view of it: an
//! in-memory `SessionUser`, a non-sensitive JSON mirror in persistent storage
//! for UX continuity across restarts, and the CSRF token slot. All three are
//! gathered into one explicit `Session` object shared (`Arc`) with the HTTP
//! client instead of living in ambient globals.
//!
//! TRADE-OFFS
//! ==========
//! Rehydrating the mirror at boot is an optimism play, not an auth decision:
//! the backend's verdict on the cookie arrives with the next protected call,
//! and a 401 there tears the optimistic state down again. Concurrent writers
//! are last-writer-wins; a single interactive session is assumed.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::storage::Storage;
use crate::token::TokenStore;

/// Persistent storage key holding the mirrored user JSON.
pub const USER_KEY: &str = "user";

/// Marketplace role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Posts jobs and pays for them.
    Poster,
    /// Applies to jobs and completes them.
    Tasker,
}

/// Non-sensitive user profile as served by the backend.
///
/// Mirrored verbatim into persistent storage; must stay free of anything
/// secret since that mirror is world-readable on a shared machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Partial profile update applied by `update_user`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
}

/// Where the client currently stands on "who is logged in".
///
/// `Authenticated -> Anonymous` happens on logout or 401 only; the way back
/// is a fresh login or register call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Boot not finished; the mirror has not been consulted yet.
    #[default]
    Loading,
    /// A user is present (optimistically or confirmed by the backend).
    Authenticated,
    /// No user; protected calls will 401.
    Anonymous,
}

/// Handle to the mirrored user slot in persistent storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read the mirrored user, if present and well-formed.
    ///
    /// A malformed value is discarded (key removed) and reported as absent;
    /// a stale mirror must never surface a parse error to the user.
    #[must_use]
    pub fn load(&self) -> Option<SessionUser> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::warn!(%error, "discarding malformed user mirror");
                self.storage.remove(USER_KEY);
                None
            }
        }
    }

    /// Overwrite the mirror with `user`.
    pub fn mirror(&self, user: &SessionUser) {
        if let Ok(json) = serde_json::to_string(user) {
            self.storage.set(USER_KEY, &json);
        }
    }

    /// Delete the mirror.
    pub fn clear(&self) {
        self.storage.remove(USER_KEY);
    }
}

/// Client-side session state shared between the auth operations and the
/// HTTP interceptors. One instance per client.
pub struct Session {
    user: Mutex<Option<SessionUser>>,
    phase: Mutex<AuthPhase>,
    tokens: TokenStore,
    store: SessionStore,
}

impl Session {
    /// Build a session over the host's two storage capabilities:
    /// `persistent` survives restarts (user mirror), `ephemeral` does not
    /// (CSRF token).
    #[must_use]
    pub fn new(persistent: Arc<dyn Storage>, ephemeral: Arc<dyn Storage>) -> Self {
        Self {
            user: Mutex::new(None),
            phase: Mutex::new(AuthPhase::Loading),
            tokens: TokenStore::new(ephemeral),
            store: SessionStore::new(persistent),
        }
    }

    /// Session backed by throwaway in-memory storage. For tests and
    /// single-shot tools that never persist anything.
    #[must_use]
    pub fn in_memory() -> Self {
        use crate::storage::MemoryStorage;
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(MemoryStorage::new()))
    }

    /// Current in-memory user, if any.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.user.lock().ok().and_then(|user| user.clone())
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.phase.lock().map(|phase| *phase).unwrap_or_default()
    }

    /// CSRF token slot.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Rehydrate the mirrored user from persistent storage.
    ///
    /// Ends in `Authenticated` (optimistically) when a well-formed mirror
    /// exists, `Anonymous` otherwise. Never fails.
    pub fn bootstrap(&self) -> Option<SessionUser> {
        let user = self.store.load();
        self.set_phase(match user {
            Some(_) => AuthPhase::Authenticated,
            None => AuthPhase::Anonymous,
        });
        if let Ok(mut slot) = self.user.lock() {
            slot.clone_from(&user);
        }
        user
    }

    /// Install `user` as the confirmed session user and mirror it.
    pub fn set_authenticated(&self, user: SessionUser) {
        self.store.mirror(&user);
        if let Ok(mut slot) = self.user.lock() {
            *slot = Some(user);
        }
        self.set_phase(AuthPhase::Authenticated);
    }

    /// Merge `patch` into the current user and re-mirror.
    ///
    /// Returns `None` when no user is present (nothing to update).
    pub fn update_user(&self, patch: &UserPatch) -> Option<SessionUser> {
        let mut slot = self.user.lock().ok()?;
        let user = slot.as_mut()?;
        if let Some(email) = &patch.email {
            user.email.clone_from(email);
        }
        if let Some(name) = &patch.name {
            user.name.clone_from(name);
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(avatar) = &patch.avatar {
            user.avatar = Some(avatar.clone());
        }
        let updated = user.clone();
        drop(slot);
        self.store.mirror(&updated);
        Some(updated)
    }

    /// Tear the client-side session down: in-memory user, mirror, and token.
    ///
    /// Safe to call repeatedly (concurrent 401s, logout after 401).
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.user.lock() {
            *slot = None;
        }
        self.store.clear();
        self.tokens.clear();
        self.set_phase(AuthPhase::Anonymous);
    }

    fn set_phase(&self, next: AuthPhase) {
        if let Ok(mut phase) = self.phase.lock() {
            *phase = next;
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
