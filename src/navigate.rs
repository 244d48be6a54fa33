//! Navigation capability.
//!
//! The 401 handler forces a hard redirect to the login route; what "navigate"
//! means is up to the host (a full page load in a browser shell, a screen
//! switch in a desktop shell). Injected at construction like `Storage`.

use std::sync::Mutex;

/// Host navigation hook used for the unrecoverable-session redirect.
pub trait Navigator: Send + Sync {
    /// Path the user is currently on, e.g. `"/jobs"`.
    fn current_path(&self) -> String;
    /// Force a navigation to `path`.
    fn navigate(&self, path: &str);
}

/// Navigator that ignores all navigation. For headless hosts.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_path(&self) -> String {
        String::new()
    }

    fn navigate(&self, _path: &str) {}
}

/// Navigator that records every navigation and tracks the current path.
/// Used in tests to observe redirect behavior.
#[derive(Debug)]
pub struct RecordingNavigator {
    current: Mutex<String>,
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new(initial_path: &str) -> Self {
        Self {
            current: Mutex::new(initial_path.to_owned()),
            visits: Mutex::new(Vec::new()),
        }
    }

    /// All paths navigated to, in order.
    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn navigate(&self, path: &str) {
        if let Ok(mut current) = self.current.lock() {
            path.clone_into(&mut current);
        }
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(path.to_owned());
        }
    }
}

#[cfg(test)]
#[path = "navigate_test.rs"]
mod tests;
