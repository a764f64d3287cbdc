//! Contact-form inquiries

use super::export::ExportFile;
use crate::client::AdminClient;
use crate::core::envelope::{ApiEnvelope, ListEnvelope};
use crate::core::error::ClientResult;
use crate::core::query::{InquiryQuery, ToQuery};
use crate::core::service::check_success;
use reqwest::Method;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct InquiriesService {
    client: AdminClient,
}

impl InquiriesService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// `GET /inquiries`
    pub async fn list(&self, query: &InquiryQuery) -> ClientResult<ListEnvelope> {
        let envelope: ListEnvelope = self
            .client
            .request(Method::GET, "/inquiries", Some(&query.to_query()), None)
            .await?;
        envelope.ensure_success()
    }

    /// `PUT /inquiries/<id>/status`
    pub async fn update_status(&self, id: &str, status: &str) -> ClientResult<Value> {
        let body: Value = self
            .client
            .request(
                Method::PUT,
                &format!("/inquiries/{}/status", id),
                None,
                Some(json!({ "status": status }).into()),
            )
            .await?;
        check_success(body)
    }

    /// `DELETE /inquiries/<id>`
    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        let body: Value = self
            .client
            .request(Method::DELETE, &format!("/inquiries/{}", id), None, None)
            .await?;
        check_success(body)
    }

    /// `GET /inquiries/export`
    pub async fn export(&self, query: &InquiryQuery) -> ClientResult<ExportFile> {
        let bytes = self
            .client
            .request_bytes(Method::GET, "/inquiries/export", Some(&query.to_query()))
            .await?;
        Ok(ExportFile::csv("inquiries", bytes))
    }
}
