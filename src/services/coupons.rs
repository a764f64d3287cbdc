//! Coupon administration under `/coupons/admin`

use crate::client::AdminClient;
use crate::core::envelope::{ApiEnvelope, CouponListEnvelope, StatsEnvelope};
use crate::core::error::{ClientResult, RequestError};
use crate::core::payload::Payload;
use crate::core::query::{CouponQuery, ToQuery};
use crate::core::service::{ListParams, RecordPage, RecordService, check_success};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

const BASE: &str = "/coupons/admin";

#[derive(Debug, Clone)]
pub struct CouponsService {
    client: AdminClient,
}

impl CouponsService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// `GET /coupons/admin`: `{ success, coupons, pagination }`
    pub async fn list(&self, query: &CouponQuery) -> ClientResult<CouponListEnvelope> {
        let envelope: CouponListEnvelope = self
            .client
            .request(Method::GET, BASE, Some(&query.to_query()), None)
            .await?;
        envelope.ensure_success()
    }

    /// `POST /coupons/admin`
    pub async fn create(&self, coupon: Value) -> ClientResult<Value> {
        self.client
            .request(Method::POST, BASE, None, Some(coupon.into()))
            .await
    }

    /// `PUT /coupons/admin/<id>`
    pub async fn update(&self, id: &str, coupon: Value) -> ClientResult<Value> {
        self.client
            .request(
                Method::PUT,
                &format!("{}/{}", BASE, id),
                None,
                Some(coupon.into()),
            )
            .await
    }

    /// `DELETE /coupons/admin/<id>`
    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        self.client
            .request(Method::DELETE, &format!("{}/{}", BASE, id), None, None)
            .await
    }

    /// `GET /coupons/admin/stats`
    pub async fn stats(&self) -> ClientResult<StatsEnvelope> {
        let envelope: StatsEnvelope = self
            .client
            .request(Method::GET, &format!("{}/stats", BASE), None, None)
            .await?;
        envelope.ensure_success()
    }
}

fn json_only(payload: Payload) -> ClientResult<Value> {
    match payload {
        Payload::Json(value) => Ok(value),
        Payload::Multipart(_) => Err(RequestError::UploadNotSupported {
            resource: "coupons".to_string(),
        }
        .into()),
    }
}

impl From<&ListParams> for CouponQuery {
    fn from(params: &ListParams) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            search: params.filter("search").map(str::to_string),
            status: params.filter("status").map(str::to_string),
            discount_type: params.filter("discountType").map(str::to_string),
        }
    }
}

#[async_trait]
impl RecordService for CouponsService {
    fn resource_name(&self) -> &str {
        "coupons"
    }

    async fn list(&self, params: &ListParams) -> ClientResult<RecordPage> {
        let envelope = CouponsService::list(self, &CouponQuery::from(params)).await?;
        Ok(RecordPage {
            records: envelope.coupons,
            pagination: envelope.pagination,
        })
    }

    async fn create(&self, payload: Payload) -> ClientResult<Value> {
        check_success(CouponsService::create(self, json_only(payload)?).await?)
    }

    async fn update(&self, id: &str, payload: Payload) -> ClientResult<Value> {
        check_success(CouponsService::update(self, id, json_only(payload)?).await?)
    }

    async fn delete(&self, id: &str) -> ClientResult<Value> {
        check_success(CouponsService::delete(self, id).await?)
    }
}

/// Display labels for the courses a coupon applies to
///
/// Each entry of `courseIds` is matched against the course `id` slug (not the
/// backend `_id`). The first course with a matching slug wins; ids with no
/// match are shown as-is.
pub fn coupon_course_labels(coupon: &Value, courses: &[Value]) -> Vec<String> {
    let Some(ids) = coupon.get("courseIds").and_then(Value::as_array) else {
        return Vec::new();
    };

    ids.iter()
        .filter_map(Value::as_str)
        .map(|id| {
            courses
                .iter()
                .find(|course| course.get("id").and_then(Value::as_str) == Some(id))
                .and_then(|course| {
                    course
                        .get("title")
                        .or_else(|| course.get("name"))
                        .and_then(Value::as_str)
                })
                .unwrap_or(id)
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_labels_resolve_by_slug() {
        let courses = vec![
            json!({"_id": "c1", "id": "data-science", "title": "Data Science"}),
            json!({"_id": "c2", "id": "web-dev", "name": "Web Development"}),
        ];
        let coupon = json!({"code": "SAVE20", "courseIds": ["web-dev", "data-science", "retired"]});

        assert_eq!(
            coupon_course_labels(&coupon, &courses),
            vec!["Web Development", "Data Science", "retired"]
        );
    }

    #[test]
    fn test_course_labels_first_duplicate_wins() {
        let courses = vec![
            json!({"_id": "c1", "id": "ml", "title": "Machine Learning"}),
            json!({"_id": "c2", "id": "ml", "title": "ML Bootcamp"}),
        ];
        let coupon = json!({"courseIds": ["ml"]});
        assert_eq!(coupon_course_labels(&coupon, &courses), vec!["Machine Learning"]);
    }

    #[test]
    fn test_course_labels_without_course_ids() {
        assert!(coupon_course_labels(&json!({"code": "ALL"}), &[]).is_empty());
    }

    #[test]
    fn test_list_params_to_coupon_query() {
        let mut params = ListParams::paginated(10);
        params.page = Some(3);
        params.filters.insert("discountType".into(), "fixed".into());
        params.filters.insert("search".into(), " ".into());

        let query = CouponQuery::from(&params);
        assert_eq!(query.page, Some(3));
        assert_eq!(query.discount_type.as_deref(), Some("fixed"));
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_multipart_coupon_rejected() {
        let err = json_only(crate::core::payload::MultipartForm::new().into()).unwrap_err();
        assert_eq!(err.error_code(), "UPLOAD_NOT_SUPPORTED");
    }
}
