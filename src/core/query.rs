//! Query-string builders for filtered and paginated endpoints
//!
//! Only fields that are set and non-blank end up in the query string, in the
//! order they are declared on each filter type. Values are kept raw; the
//! HTTP client form-encodes them when the request is built.
//!
//! # Example
//! ```rust
//! use admin_client::core::query::{CouponQuery, ToQuery};
//!
//! let query = CouponQuery {
//!     page: Some(2),
//!     search: Some("  ".to_string()),
//!     status: Some("active".to_string()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(
//!     query.to_query().pairs(),
//!     [("page".to_string(), "2".to_string()), ("status".to_string(), "active".to_string())]
//! );
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered list of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` unless the value is absent or blank
    pub fn push<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.pairs.push((key.to_string(), value));
            }
        }
        self
    }

    /// Append a date in `YYYY-MM-DD` form
    pub fn push_date(&mut self, key: &str, value: Option<NaiveDate>) -> &mut Self {
        self.push(key, value.map(|d| d.format("%Y-%m-%d")))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Value of the first parameter named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Filters that serialize into a query string
pub trait ToQuery {
    fn to_query(&self) -> QueryString;
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Filter for the payment transactions list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ToQuery for PaymentQuery {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push("page", self.page.map(|p| p.max(1)))
            .push("limit", self.limit)
            .push("status", self.status.as_deref())
            .push("paymentMethod", self.payment_method.as_deref())
            .push("search", self.search.as_deref())
            .push_date("startDate", self.start_date)
            .push_date("endDate", self.end_date);
        query
    }
}

/// Filter for the admin coupon list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouponQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub discount_type: Option<String>,
}

impl ToQuery for CouponQuery {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push("page", self.page.map(|p| p.max(1)))
            .push("limit", self.limit)
            .push("search", self.search.as_deref())
            .push("status", self.status.as_deref())
            .push("discountType", self.discount_type.as_deref());
        query
    }
}

/// Filter for the customer list and CSV export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub source: Option<String>,
    pub course: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ToQuery for CustomerQuery {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push("page", self.page.map(|p| p.max(1)))
            .push("limit", self.limit)
            .push("search", self.search.as_deref())
            .push("source", self.source.as_deref())
            .push("course", self.course.as_deref())
            .push("sortBy", self.sort_by.as_deref())
            .push("sortOrder", self.sort_order)
            .push_date("startDate", self.start_date)
            .push_date("endDate", self.end_date);
        query
    }
}

/// Filter for the inquiry list and CSV export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InquiryQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ToQuery for InquiryQuery {
    fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        query
            .push("page", self.page.map(|p| p.max(1)))
            .push("limit", self.limit)
            .push("status", self.status.as_deref())
            .push("search", self.search.as_deref())
            .push_date("startDate", self.start_date)
            .push_date("endDate", self.end_date);
        query
    }
}
