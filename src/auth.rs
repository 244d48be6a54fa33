//! Auth operations: login, register, logout, profile update, bootstrap.
//!
//! ORDERING
//! ========
//! Login and register mutate local state only after the backend confirms;
//! there is no optimistic write on the way out. Logout is the opposite: the
//! user's intent to leave must always succeed locally, so the session is
//! torn down even when the network call fails.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::session::{Role, SessionUser, UserPatch};

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Backend response to login/register: the user plus an optional CSRF token
/// issued alongside the session cookie.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    user: SessionUser,
    #[serde(default)]
    csrf_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsrfTokenResponse {
    csrf_token: String,
}

impl ApiClient {
    /// `POST /auth/login` — authenticate and install the session.
    ///
    /// On failure nothing is mutated; the backend's message is surfaced
    /// through the returned error for the login form to display.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, ApiError> {
        let response: AuthResponse = self.post_json("/auth/login", credentials).await?;
        Ok(self.install(response))
    }

    /// `POST /auth/register` — create an account; same contract as `login`.
    pub async fn register(&self, new_user: &NewUser) -> Result<SessionUser, ApiError> {
        let response: AuthResponse = self.post_json("/auth/register", new_user).await?;
        Ok(self.install(response))
    }

    fn install(&self, response: AuthResponse) -> SessionUser {
        if let Some(token) = response.csrf_token.as_deref() {
            self.session().tokens().set(Some(token));
        }
        self.session().set_authenticated(response.user.clone());
        response.user
    }

    /// `POST /auth/logout` — invalidate the cookie server-side, then clear
    /// the local session unconditionally.
    pub async fn logout(&self) {
        let result = self.post_empty("/auth/logout").await;
        self.session().invalidate();
        if let Err(error) = result {
            tracing::warn!(%error, "logout request failed, session cleared locally");
        }
    }

    /// Merge `patch` into the in-memory user and re-mirror it.
    ///
    /// Local-only: callers persist profile changes server-side through their
    /// own endpoints first. Returns `None` when nobody is logged in.
    pub fn update_user(&self, patch: &UserPatch) -> Option<SessionUser> {
        self.session().update_user(patch)
    }

    /// Rehydrate the mirrored user from persistent storage at boot.
    ///
    /// Purely optimistic; the backend's verdict on the session cookie
    /// arrives with the next protected call.
    pub fn bootstrap(&self) -> Option<SessionUser> {
        self.session().bootstrap()
    }

    /// `GET /auth/me` — ask the backend who the cookie belongs to.
    ///
    /// The trust decision the bootstrap defers: a 401 here clears the
    /// optimistic state through the global handler.
    pub async fn fetch_current_user(&self) -> Result<SessionUser, ApiError> {
        let user: SessionUser = self.get_json("/auth/me").await?;
        self.session().set_authenticated(user.clone());
        Ok(user)
    }

    /// `GET /auth/csrf-token` — ask the backend for a fresh token.
    pub async fn fetch_csrf_token(&self) -> Result<String, ApiError> {
        let response: CsrfTokenResponse = self.get_json("/auth/csrf-token").await?;
        Ok(self.session().tokens().set(Some(&response.csrf_token)))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
