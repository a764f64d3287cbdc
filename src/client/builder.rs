//! ClientBuilder for fluent construction of an [`AdminClient`]

use super::AdminClient;
use crate::config::ClientConfig;
use crate::core::error::{ClientError, ClientResult};
use crate::core::navigation::{Navigator, NoopNavigator};
use crate::core::session::{FileSessionStore, Session, SessionStore};
use std::sync::Arc;

/// Builder for an [`AdminClient`]
///
/// # Example
///
/// ```ignore
/// let client = AdminClient::builder()
///     .config(ClientConfig::from_env()?)
///     .session_store(FileSessionStore::new("session.json"))
///     .navigator(router_handle)
///     .build()?;
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    session: Option<Session>,
    navigator: Option<Arc<dyn Navigator>>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (defaults to [`ClientConfig::default`])
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Shorthand for a default configuration pointing at `base_url`
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.config(ClientConfig::new(base_url))
    }

    /// Share an existing session handle
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Back the session with `store`
    pub fn session_store(self, store: impl SessionStore + 'static) -> Self {
        self.session(Session::new(store))
    }

    /// Receive navigation requests (login redirect after a 401)
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Arc::new(navigator));
        self
    }

    /// Use a preconfigured transport; the configured timeout is then ignored
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client
    ///
    /// Without an explicit session the client uses the configured session file,
    /// or an in-memory store when none is configured.
    pub fn build(self) -> ClientResult<AdminClient> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(config.timeout())
                .build()
                .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?,
        };

        let session = match (self.session, &config.session_file) {
            (Some(session), _) => session,
            (None, Some(path)) => Session::new(FileSessionStore::new(path)),
            (None, None) => Session::in_memory(),
        };

        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(NoopNavigator));

        tracing::debug!(base_url = %config.base_url, "admin client ready");
        Ok(AdminClient::from_parts(http, config, session, navigator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::MemorySessionStore;
    use serde_json::json;

    #[test]
    fn test_build_with_defaults() {
        let client = ClientBuilder::new().build().unwrap();
        assert_eq!(client.config().base_url, "http://localhost:5000/api");
        assert!(!client.session().is_authenticated());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let err = ClientBuilder::new().base_url("localhost").build().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_build_shares_session_store() {
        let store = MemorySessionStore::new();
        Session::new(store.clone())
            .store_login("tok", &json!({"name": "Root"}))
            .unwrap();

        let client = ClientBuilder::new().session_store(store).build().unwrap();
        assert_eq!(client.session().token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_build_uses_session_file_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        Session::new(FileSessionStore::new(&path))
            .store_login("from-file", &json!({}))
            .unwrap();

        let mut config = ClientConfig::default();
        config.session_file = Some(path);
        let client = ClientBuilder::new().config(config).build().unwrap();
        assert_eq!(client.session().token().as_deref(), Some("from-file"));
    }
}
