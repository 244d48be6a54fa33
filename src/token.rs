//! CSRF token generation and storage.
//!
//! ARCHITECTURE
//! ============
//! The double-submit token lives only in the ephemeral store, under a single
//! key, for exactly one session. The server rotates it on selected responses;
//! when the client needs a token and none was issued yet, it generates its
//! own cryptographically random value as a fallback.

use std::fmt::Write;
use std::sync::Arc;

use rand::Rng;

use crate::storage::Storage;

/// Ephemeral storage key holding the current CSRF token.
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
///
/// Uses the OS-seeded generator; there is no seeding path and no weak
/// fallback. If secure randomness is unavailable the process cannot run a
/// session at all and panicking here is the intended failure mode.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Handle to the CSRF token slot in ephemeral storage.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Current token, if one has been issued or generated.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.storage.get(CSRF_TOKEN_KEY)
    }

    /// Store `token`, or generate a fresh one when `None`.
    /// Returns the token now in effect, overwriting any previous value.
    pub fn set(&self, token: Option<&str>) -> String {
        let token = token.map_or_else(generate_token, str::to_owned);
        self.storage.set(CSRF_TOKEN_KEY, &token);
        token
    }

    /// Drop the current token. Clearing an empty store is a no-op.
    pub fn clear(&self) {
        self.storage.remove(CSRF_TOKEN_KEY);
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
