//! Login, profile and logout

use crate::client::AdminClient;
use crate::core::envelope::{ApiEnvelope, AuthEnvelope};
use crate::core::error::{ClientError, ClientResult};
use crate::core::service::check_success;
use reqwest::Method;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: AdminClient,
}

impl AuthService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`; stores the token and profile on success
    ///
    /// Returns the stored profile.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Value> {
        let body = json!({ "email": email, "password": password });
        let envelope: AuthEnvelope = self
            .client
            .request(Method::POST, "/auth/login", None, Some(body.into()))
            .await?;
        let envelope = envelope.ensure_success()?;

        let (token, user) = envelope
            .credentials()
            .ok_or_else(|| ClientError::Decode("Login response carries no token".to_string()))?;
        self.client.session().store_login(&token, &user)?;

        tracing::info!(email, "admin logged in");
        Ok(user)
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> ClientResult<Value> {
        let body: Value = self
            .client
            .request(Method::GET, "/auth/me", None, None)
            .await?;
        check_success(body)
    }

    /// `POST /auth/logout`, then clear the local session
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let remote: ClientResult<Value> = self
            .client
            .request(Method::POST, "/auth/logout", None, None)
            .await;
        if let Err(e) = remote {
            tracing::warn!(error = %e, "logout request failed, clearing session anyway");
        }

        self.client.session().clear()?;
        tracing::info!("admin logged out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }
}
