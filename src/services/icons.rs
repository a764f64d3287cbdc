//! Icon catalogue used by the content editors

use crate::client::AdminClient;
use crate::core::error::ClientResult;
use crate::core::query::QueryString;
use crate::core::service::check_success;
use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct IconsService {
    client: AdminClient,
}

impl IconsService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// `GET /icons`
    pub async fn list(&self) -> ClientResult<Value> {
        let body: Value = self.client.request(Method::GET, "/icons", None, None).await?;
        check_success(body)
    }

    /// `GET /icons/search?q=<term>`
    pub async fn search(&self, term: &str) -> ClientResult<Value> {
        let mut query = QueryString::new();
        query.push("q", Some(term));
        let body: Value = self
            .client
            .request(Method::GET, "/icons/search", Some(&query), None)
            .await?;
        check_success(body)
    }
}
