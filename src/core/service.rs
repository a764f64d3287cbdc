//! Service trait consumed by the form controllers

use crate::core::envelope::Pagination;
use crate::core::error::{ClientError, ClientResult};
use crate::core::payload::Payload;
use crate::core::query::{QueryString, ToQuery};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

/// Page, limit and free-form filters for a list request
///
/// Resources that are not paginated receive an empty query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub filters: IndexMap<String, String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// First page of `limit` records
    pub fn paginated(limit: u32) -> Self {
        Self {
            page: Some(1),
            limit: Some(limit),
            filters: IndexMap::new(),
        }
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

impl ToQuery for ListParams {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push("page", self.page.map(|p| p.max(1)))
            .push("limit", self.limit);
        for (key, value) in &self.filters {
            query.push(key, Some(value));
        }
        query
    }
}

/// One page of records as returned by a list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPage {
    pub records: Vec<Value>,
    pub pagination: Option<Pagination>,
}

impl RecordPage {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            pagination: None,
        }
    }
}

/// CRUD operations a form controller needs from its backend
///
/// Implementations forward to the REST backend; the form never sees HTTP.
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Resource name, used in logs and toasts
    fn resource_name(&self) -> &str;

    /// Multipart field carrying an image, if the resource accepts uploads
    fn upload_field(&self) -> Option<&str> {
        None
    }

    /// Fetch the full list (or the requested page)
    async fn list(&self, params: &ListParams) -> ClientResult<RecordPage>;

    /// Create a record
    async fn create(&self, payload: Payload) -> ClientResult<Value>;

    /// Update the record with backend id `id`
    async fn update(&self, id: &str, payload: Payload) -> ClientResult<Value>;

    /// Delete the record with backend id `id`
    async fn delete(&self, id: &str) -> ClientResult<Value>;
}

/// Reject a 2xx body whose envelope carries `success: false`
///
/// Bodies without a `success` flag are accepted as-is.
pub fn check_success(body: Value) -> ClientResult<Value> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("Request was not successful")
            .to_string();
        return Err(ClientError::Rejected(message));
    }
    Ok(body)
}
