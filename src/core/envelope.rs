//! Response envelopes
//!
//! The backend wraps every payload in a JSON object with a `success` flag, but
//! the key holding the payload differs per endpoint family (`data`,
//! `coupons`, `transactions`, `stats`, `analytics`, `filename`). Each family
//! gets its own envelope type; unknown top-level fields are kept in `extra`.

use crate::core::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Common accessors shared by every envelope family
pub trait ApiEnvelope {
    /// Whether the body counts as successful
    ///
    /// Only an explicit `success: false` is a failure; a body without the
    /// flag passes, the same as with [`check_success`](crate::core::service::check_success).
    fn success(&self) -> bool;

    /// `message` if present, else `error`
    fn failure_message(&self) -> Option<&str>;

    /// Turn a `success: false` envelope into [`ClientError::Rejected`]
    fn ensure_success(self) -> ClientResult<Self>
    where
        Self: Sized,
    {
        if self.success() {
            Ok(self)
        } else {
            let message = self
                .failure_message()
                .unwrap_or("Request was not successful")
                .to_string();
            Err(ClientError::Rejected(message))
        }
    }
}

/// Implements [`ApiEnvelope`] for a struct with `success`, `message` and `error` fields
macro_rules! impl_api_envelope {
    ($type:ident $(<$generic:ident>)?) => {
        impl$(<$generic>)? ApiEnvelope for $type$(<$generic>)? {
            fn success(&self) -> bool {
                self.success != Some(false)
            }

            fn failure_message(&self) -> Option<&str> {
                self.message.as_deref().or(self.error.as_deref())
            }
        }
    };
}

/// Generic envelope: `{ success, data?, message?, error?, ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Ad hoc top-level fields not covered above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_api_envelope!(Envelope<T>);

impl<T> Envelope<T> {
    /// Payload of a successful envelope
    pub fn into_data(self) -> ClientResult<T> {
        let envelope = self.ensure_success()?;
        envelope
            .data
            .ok_or_else(|| ClientError::Decode("Response is missing 'data'".to_string()))
    }
}

/// Paginated list envelope: `{ success, data: [...], pagination?, stats? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T = Value> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default)]
    pub pagination: Option<Pagination>,

    #[serde(default)]
    pub stats: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_api_envelope!(ListEnvelope<T>);

/// Coupon list envelope: `{ success, coupons: [...], pagination? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponListEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub coupons: Vec<Value>,

    #[serde(default)]
    pub pagination: Option<Pagination>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_api_envelope!(CouponListEnvelope);

/// Payment transactions envelope: `{ success, transactions, pagination?, stats? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub transactions: Vec<Value>,

    #[serde(default)]
    pub pagination: Option<Pagination>,

    #[serde(default)]
    pub stats: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_api_envelope!(TransactionListEnvelope);

/// Stats envelope: `{ success, stats }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub stats: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl_api_envelope!(StatsEnvelope);

/// Analytics envelope: `{ success, analytics }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub analytics: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl_api_envelope!(AnalyticsEnvelope);

/// Upload response: `{ success, filename, message }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl_api_envelope!(UploadResponse);

/// Login envelope: `{ success, token, user }`
///
/// Some deployments nest the credentials under `data`; both shapes decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub user: Option<Value>,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl_api_envelope!(AuthEnvelope);

impl AuthEnvelope {
    /// Token and profile, from the top level or from `data`
    pub fn credentials(&self) -> Option<(String, Value)> {
        let nested = self.data.as_ref();
        let token = self.token.clone().or_else(|| {
            nested
                .and_then(|d| d.get("token"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })?;
        let user = self
            .user
            .clone()
            .or_else(|| nested.and_then(|d| d.get("user")).cloned())
            .unwrap_or(Value::Null);
        Some((token, user))
    }
}

/// Pagination metadata as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default)]
    pub limit: u64,

    #[serde(default)]
    pub total: u64,

    #[serde(default, alias = "pages", alias = "total_pages")]
    pub total_pages: u64,
}

fn default_page() -> u64 {
    1
}

impl Pagination {
    /// Build metadata from page, limit and total
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };

        Self {
            page: page.max(1),
            limit,
            total,
            total_pages,
        }
    }

    /// Whether there is a next page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there is a previous page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}
