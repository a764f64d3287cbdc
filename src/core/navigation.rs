//! Navigation side effects issued by the client
//!
//! The client never touches a browser or a router directly. When it has to
//! send the operator elsewhere (the login screen after a 401) it calls the
//! [`Navigator`] it was built with.

use std::sync::{Arc, RwLock};

/// Receives navigation requests from the client
pub trait Navigator: Send + Sync {
    /// Perform a full navigation to `route`
    fn navigate(&self, route: &str);
}

/// Navigator that ignores every request
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, route: &str) {
        tracing::debug!(route, "navigation ignored");
    }
}

/// Navigator that records every route it is asked to visit
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<RwLock<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes visited so far, oldest first
    pub fn visited(&self) -> Vec<String> {
        self.visited.read().map(|v| v.clone()).unwrap_or_default()
    }

    /// Most recent route, if any
    pub fn last(&self) -> Option<String> {
        self.visited().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut visited) = self.visited.write() {
            visited.push(route.to_string());
        }
    }
}

/// Navigator backed by a closure
pub struct FnNavigator<F>(pub F);

impl<F> Navigator for FnNavigator<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, route: &str) {
        (self.0)(route)
    }
}
