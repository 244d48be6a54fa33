//! HTTP client with the CSRF/session interceptor pair.
//!
//! ARCHITECTURE
//! ============
//! Every API call funnels through `ApiClient::send`. On the way out the
//! current CSRF token is attached to mutating requests; on the way back a
//! rotated token is harvested from the response header, and failure statuses
//! are classified into `ApiError` with their session side effects applied in
//! one place:
//!
//!   network error  -> propagate, touch nothing
//!   401            -> tear down session, hard redirect to the login route
//!   403 w/ "csrf"  -> drop the token so the next protected call re-issues
//!   other 403/404  -> log only
//!   5xx            -> log only, surfaced for user-facing messaging
//!
//! All side effects are idempotent: several in-flight requests failing with
//! 401 at once may navigate redundantly but never panic or double-clear.
//!
//! TRADE-OFFS
//! ==========
//! The token rides only on mutating methods (the stricter double-submit
//! policy); GETs stay header-free so they remain cacheable and carry no
//! state-changing authority anyway.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{self, ApiError};
use crate::navigate::Navigator;
use crate::session::Session;

/// Request header carrying the double-submit token.
pub const CSRF_REQUEST_HEADER: &str = "X-CSRF-Token";
/// Response header carrying a server-rotated token (matched case-insensitively).
pub const CSRF_RESPONSE_HEADER: &str = "x-csrf-token";

/// API client owning the session state and the interceptor behavior.
///
/// One instance per authenticated client; clone-cheap via `Arc` internals.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build a client over the given session and navigation capability.
    ///
    /// The underlying HTTP client keeps a cookie jar so the backend-issued
    /// session cookie rides along automatically; client code never reads it.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, same as
    /// `reqwest::Client::new` — without it no session is possible at all.
    /// Hosts that prefer to surface that failure use [`ApiClient::try_new`].
    #[must_use]
    pub fn new(config: ClientConfig, session: Arc<Session>, navigator: Arc<dyn Navigator>) -> Self {
        Self::try_new(config, session, navigator).expect("failed to initialize HTTP client")
    }

    /// Fallible variant of [`ApiClient::new`].
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error when the TLS backend cannot be
    /// initialized.
    pub fn try_new(
        config: ClientConfig,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, config, session, navigator })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Issue a request and run the response interceptor.
    pub(crate) async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        // Stricter double-submit policy: the token rides on mutating calls only.
        if method != Method::GET && method != Method::HEAD {
            if let Some(token) = self.session.tokens().get() {
                request = request.header(CSRF_REQUEST_HEADER, token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.intercept(path, response).await
    }

    /// Response phase: harvest rotated tokens, classify failures, apply
    /// session side effects.
    async fn intercept(&self, path: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            if let Some(rotated) = response
                .headers()
                .get(CSRF_RESPONSE_HEADER)
                .and_then(|value| value.to_str().ok())
            {
                self.session.tokens().set(Some(rotated));
            }
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error::classify_status(status.as_u16(), error::error_message(&body));
        self.apply_failure_effects(path, &err);
        Err(err)
    }

    /// Session side effects for a classified failure. Idempotent.
    fn apply_failure_effects(&self, path: &str, err: &ApiError) {
        match err {
            ApiError::Unauthorized => {
                // Session is unrecoverable client-side: clear everything and
                // force a hard navigation unless the user is already there.
                self.session.invalidate();
                let login = self.config.login_path.as_str();
                if self.navigator.current_path() != login {
                    self.navigator.navigate(login);
                }
            }
            ApiError::ForbiddenCsrf { message } => {
                tracing::warn!(path, %message, "csrf validation failed, dropping token");
                self.session.tokens().clear();
            }
            ApiError::Forbidden { message } => {
                tracing::warn!(path, %message, "forbidden");
            }
            ApiError::NotFound => {
                tracing::warn!(path, "not found");
            }
            ApiError::Server { status, message } => {
                tracing::error!(path, status, %message, "server error");
            }
            ApiError::Network(_) | ApiError::Api { .. } | ApiError::Decode(_) => {}
        }
    }

    /// GET `path` and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        decode(response).await
    }

    /// POST `body` to `path` and decode a JSON body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        decode(response).await
    }

    /// POST to `path` without a request body, ignoring the response body.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::POST, path, None).await?;
        Ok(())
    }

    /// PUT `body` to `path` and decode a JSON body.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
