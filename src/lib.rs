//! # taskhub-client
//!
//! Rust client for the taskhub job-marketplace API. Owns the client side of
//! the session: a CSRF double-submit token coordinated with the backend's
//! HttpOnly session cookie, a non-sensitive user mirror in persistent
//! storage, and an HTTP client whose interceptors inject/harvest the token
//! and globally handle auth failures (401 tears the session down and
//! redirects to login).
//!
//! Hosts inject their platform capabilities at construction — [`storage::Storage`]
//! for the two key-value stores and [`navigate::Navigator`] for the login
//! redirect — so the same client runs in tests, tools, and UI shells.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use taskhub_client::auth::Credentials;
//! use taskhub_client::config::ClientConfig;
//! use taskhub_client::http::ApiClient;
//! use taskhub_client::navigate::NoopNavigator;
//! use taskhub_client::session::Session;
//!
//! # async fn run() -> Result<(), taskhub_client::error::ApiError> {
//! let client = ApiClient::new(
//!     ClientConfig::from_env(),
//!     Arc::new(Session::in_memory()),
//!     Arc::new(NoopNavigator),
//! );
//! client.bootstrap();
//! let user = client
//!     .login(&Credentials { email: "a@b.com".into(), password: "secret1".into() })
//!     .await?;
//! println!("logged in as {}", user.email);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod jobs;
pub mod navigate;
pub mod session;
pub mod storage;
pub mod token;

pub use config::ClientConfig;
pub use error::ApiError;
pub use http::ApiClient;
pub use session::{AuthPhase, Role, Session, SessionUser, UserPatch};
