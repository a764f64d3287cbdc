//! Customer records and CSV export

use super::export::ExportFile;
use crate::client::AdminClient;
use crate::core::envelope::{ApiEnvelope, ListEnvelope};
use crate::core::error::ClientResult;
use crate::core::query::{CustomerQuery, ToQuery};
use crate::core::service::check_success;
use reqwest::Method;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CustomersService {
    client: AdminClient,
}

impl CustomersService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// `GET /customers`: `{ success, data, pagination, stats }`
    pub async fn list(&self, query: &CustomerQuery) -> ClientResult<ListEnvelope> {
        let envelope: ListEnvelope = self
            .client
            .request(Method::GET, "/customers", Some(&query.to_query()), None)
            .await?;
        envelope.ensure_success()
    }

    /// `GET /customers/<id>`
    pub async fn get(&self, id: &str) -> ClientResult<Value> {
        let body: Value = self
            .client
            .request(Method::GET, &format!("/customers/{}", id), None, None)
            .await?;
        check_success(body)
    }

    /// `GET /customers/export` with the same filters as the list
    pub async fn export(&self, query: &CustomerQuery) -> ClientResult<ExportFile> {
        let bytes = self
            .client
            .request_bytes(Method::GET, "/customers/export", Some(&query.to_query()))
            .await?;
        Ok(ExportFile::csv("customers", bytes))
    }
}
