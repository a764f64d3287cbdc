//! HTTP client for the admin REST backend
//!
//! [`AdminClient`] owns the transport, the session and the navigator. Every
//! request goes through the same two interceptors:
//!
//! - **request**: attach `Authorization: Bearer <token>` when the session has
//!   a token; JSON bodies are sent as `application/json`, multipart bodies get
//!   their content type (with boundary) from the transport
//! - **response**: a 401 clears the session and navigates to the login route,
//!   whichever call triggered it; other non-2xx statuses become
//!   [`ClientError::Http`]

pub mod builder;
pub mod resource;

pub use builder::ClientBuilder;
pub use resource::ResourceClient;

use crate::config::ClientConfig;
use crate::core::error::{ClientError, ClientResult};
use crate::core::navigation::Navigator;
use crate::core::payload::Payload;
use crate::core::query::QueryString;
use crate::core::session::Session;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Admin API client
///
/// Cheap to clone; clones share the transport, session and navigator.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl AdminClient {
    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        config: ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                session,
                navigator,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.api_base(), path)
    }

    // =========================================================================
    // Generic CRUD surface: /admin/<resource>[/<id>]
    // =========================================================================

    /// `GET /admin/<resource>`
    pub async fn get_all(&self, resource: &str) -> ClientResult<Value> {
        self.get_all_as(resource).await
    }

    /// `GET /admin/<resource>/<id>`
    pub async fn get_by_id(&self, resource: &str, id: &str) -> ClientResult<Value> {
        self.get_by_id_as(resource, id).await
    }

    /// `POST /admin/<resource>`
    pub async fn create(&self, resource: &str, data: impl Into<Payload>) -> ClientResult<Value> {
        self.create_as(resource, data).await
    }

    /// `PUT /admin/<resource>/<id>`
    pub async fn update(
        &self,
        resource: &str,
        id: &str,
        data: impl Into<Payload>,
    ) -> ClientResult<Value> {
        self.update_as(resource, id, data).await
    }

    /// `DELETE /admin/<resource>/<id>`
    pub async fn delete(&self, resource: &str, id: &str) -> ClientResult<Value> {
        self.delete_as(resource, id).await
    }

    pub async fn get_all_as<T: DeserializeOwned>(&self, resource: &str) -> ClientResult<T> {
        self.request(Method::GET, &admin_path(resource, None), None, None)
            .await
    }

    pub async fn get_by_id_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
    ) -> ClientResult<T> {
        self.request(Method::GET, &admin_path(resource, Some(id)), None, None)
            .await
    }

    pub async fn create_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        data: impl Into<Payload>,
    ) -> ClientResult<T> {
        self.request(
            Method::POST,
            &admin_path(resource, None),
            None,
            Some(data.into()),
        )
        .await
    }

    pub async fn update_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        data: impl Into<Payload>,
    ) -> ClientResult<T> {
        self.request(
            Method::PUT,
            &admin_path(resource, Some(id)),
            None,
            Some(data.into()),
        )
        .await
    }

    pub async fn delete_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
    ) -> ClientResult<T> {
        self.request(Method::DELETE, &admin_path(resource, Some(id)), None, None)
            .await
    }

    // =========================================================================
    // Raw requests
    // =========================================================================

    /// Send a request and decode the JSON body
    ///
    /// An empty body decodes as `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryString>,
        body: Option<Payload>,
    ) -> ClientResult<T> {
        let response = self.send(method, path, query, body).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request and return the raw body bytes
    pub async fn request_bytes(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryString>,
    ) -> ClientResult<Vec<u8>> {
        let response = self.send(method, path, query, None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send a request through both interceptors
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryString>,
        body: Option<Payload>,
    ) -> ClientResult<Response> {
        let multipart = body.as_ref().is_some_and(Payload::is_multipart);
        tracing::debug!(method = %method, path, multipart, "sending admin request");

        let mut request = self.inner.http.request(method.clone(), self.url(path));

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query.pairs());
        }

        if let Some(token) = self.inner.session.token() {
            request = request.bearer_auth(token);
        }

        request = match body {
            Some(Payload::Json(value)) => request.json(&value),
            Some(Payload::Multipart(form)) => request.multipart(form.into_reqwest()?),
            None => request,
        };

        let response = request.send().await?;
        self.intercept_response(&method, path, response).await
    }

    async fn intercept_response(
        &self,
        method: &Method,
        path: &str,
        response: Response,
    ) -> ClientResult<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(method = %method, path, "received 401, clearing session");
            self.force_logout();
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            tracing::warn!(method = %method, path, status = status.as_u16(), %message, "admin request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    /// Clear the session and send the operator to the login route
    pub fn force_logout(&self) {
        if let Err(e) = self.inner.session.clear() {
            tracing::warn!(error = %e, "failed to clear session");
        }
        self.inner.navigator.navigate(&self.inner.config.login_route);
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.config.base_url)
            .field("session", &self.inner.session)
            .finish()
    }
}

/// `/admin/<resource>[/<id>]`
pub fn admin_path(resource: &str, id: Option<&str>) -> String {
    let resource = resource.trim_matches('/');
    match id {
        Some(id) => format!("/admin/{}/{}", resource, id),
        None => format!("/admin/{}", resource),
    }
}

/// Message carried by an error body: envelope `message`/`error`, else the raw text
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(trimmed.to_string())),
        Err(_) => Some(trimmed.to_string()),
    }
}
