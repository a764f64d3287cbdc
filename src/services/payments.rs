//! Payment transactions and revenue analytics

use crate::client::AdminClient;
use crate::core::envelope::{AnalyticsEnvelope, ApiEnvelope, TransactionListEnvelope};
use crate::core::error::ClientResult;
use crate::core::query::{PaymentQuery, QueryString, ToQuery};
use crate::core::service::check_success;
use reqwest::Method;
use serde_json::Value;

const BASE: &str = "/payments/admin";

#[derive(Debug, Clone)]
pub struct PaymentsService {
    client: AdminClient,
}

impl PaymentsService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// `GET /payments/admin/transactions`
    pub async fn transactions(&self, query: &PaymentQuery) -> ClientResult<TransactionListEnvelope> {
        let envelope: TransactionListEnvelope = self
            .client
            .request(
                Method::GET,
                &format!("{}/transactions", BASE),
                Some(&query.to_query()),
                None,
            )
            .await?;
        envelope.ensure_success()
    }

    /// `GET /payments/admin/transactions/<id>`
    pub async fn transaction(&self, id: &str) -> ClientResult<Value> {
        let body: Value = self
            .client
            .request(
                Method::GET,
                &format!("{}/transactions/{}", BASE, id),
                None,
                None,
            )
            .await?;
        check_success(body)
    }

    /// `GET /payments/admin/analytics[?period=]`
    pub async fn analytics(&self, period: Option<&str>) -> ClientResult<AnalyticsEnvelope> {
        let mut query = QueryString::new();
        query.push("period", period);
        let envelope: AnalyticsEnvelope = self
            .client
            .request(
                Method::GET,
                &format!("{}/analytics", BASE),
                Some(&query),
                None,
            )
            .await?;
        envelope.ensure_success()
    }
}
