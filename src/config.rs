//! Client configuration.

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Where the client points and where it sends the user on session loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, no trailing slash.
    pub base_url: String,
    /// App route navigated to on an unrecoverable 401.
    pub login_path: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }

    /// Build from `TASKHUB_API_URL`, falling back to the local default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("TASKHUB_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self::new(&base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
