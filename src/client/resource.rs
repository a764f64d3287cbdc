//! Client bound to one admin resource

use super::AdminClient;
use crate::core::envelope::ListEnvelope;
use crate::core::error::{ClientResult, RequestError};
use crate::core::payload::{FilePart, MultipartForm, Payload};
use crate::core::query::ToQuery;
use crate::core::service::{ListParams, RecordPage, RecordService, check_success};
use crate::core::ApiEnvelope;
use crate::resources::ResourceDescriptor;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};

impl AdminClient {
    /// Client bound to `descriptor`
    pub fn resource(&self, descriptor: &ResourceDescriptor) -> ResourceClient {
        ResourceClient {
            client: self.clone(),
            descriptor: *descriptor,
        }
    }
}

/// The generic CRUD surface bound to one resource path
///
/// JSON and multipart payloads go through the same methods; multipart is
/// only accepted when the descriptor declares an upload field.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    client: AdminClient,
    descriptor: ResourceDescriptor,
}

impl ResourceClient {
    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// `GET /admin/<path>`
    pub async fn get_all(&self) -> ClientResult<Value> {
        self.client.get_all(self.descriptor.path).await
    }

    /// `GET /admin/<path>/<id>`
    pub async fn get_by_id(&self, id: &str) -> ClientResult<Value> {
        self.client.get_by_id(self.descriptor.path, id).await
    }

    /// `POST /admin/<path>`
    pub async fn create(&self, data: impl Into<Payload>) -> ClientResult<Value> {
        let payload = self.admit(data.into())?;
        self.client.create(self.descriptor.path, payload).await
    }

    /// `PUT /admin/<path>/<id>`
    pub async fn update(&self, id: &str, data: impl Into<Payload>) -> ClientResult<Value> {
        let payload = self.admit(data.into())?;
        self.client.update(self.descriptor.path, id, payload).await
    }

    /// `DELETE /admin/<path>/<id>`
    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        self.client.delete(self.descriptor.path, id).await
    }

    /// Records of a `{ success, data: [...] }` list response
    pub async fn list(&self, params: &ListParams) -> ClientResult<RecordPage> {
        let query = params.to_query();
        let envelope: ListEnvelope = self
            .client
            .request(
                Method::GET,
                &self.descriptor.collection_path(),
                Some(&query),
                None,
            )
            .await?;
        let envelope = envelope.ensure_success()?;
        Ok(RecordPage {
            records: envelope.data,
            pagination: envelope.pagination,
        })
    }

    /// Payload for `draft`, carrying `file` as multipart when given
    ///
    /// The file is renamed to the resource's upload field.
    pub fn payload_for(
        &self,
        draft: &Map<String, Value>,
        file: Option<FilePart>,
    ) -> ClientResult<Payload> {
        match file {
            None => Ok(Payload::Json(Value::Object(draft.clone()))),
            Some(file) => {
                let field = self.require_upload_field()?;
                Ok(MultipartForm::from_draft(draft)
                    .file(file.renamed(field))
                    .into())
            }
        }
    }

    fn require_upload_field(&self) -> ClientResult<&'static str> {
        self.descriptor.upload_field.ok_or_else(|| {
            RequestError::UploadNotSupported {
                resource: self.descriptor.path.to_string(),
            }
            .into()
        })
    }

    fn admit(&self, payload: Payload) -> ClientResult<Payload> {
        if payload.is_multipart() {
            self.require_upload_field()?;
        }
        Ok(payload)
    }
}

#[async_trait]
impl RecordService for ResourceClient {
    fn resource_name(&self) -> &str {
        self.descriptor.path
    }

    fn upload_field(&self) -> Option<&str> {
        self.descriptor.upload_field
    }

    async fn list(&self, params: &ListParams) -> ClientResult<RecordPage> {
        ResourceClient::list(self, params).await
    }

    async fn create(&self, payload: Payload) -> ClientResult<Value> {
        check_success(ResourceClient::create(self, payload).await?)
    }

    async fn update(&self, id: &str, payload: Payload) -> ClientResult<Value> {
        check_success(ResourceClient::update(self, id, payload).await?)
    }

    async fn delete(&self, id: &str) -> ClientResult<Value> {
        check_success(ResourceClient::delete(self, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ClientError;
    use crate::resources::{FAQS, TESTIMONIALS};
    use serde_json::json;

    fn client() -> AdminClient {
        AdminClient::builder().build().unwrap()
    }

    fn draft() -> Map<String, Value> {
        json!({"name": "Asha", "rating": 5}).as_object().cloned().unwrap()
    }

    #[test]
    fn test_payload_for_without_file_is_json() {
        let payload = client().testimonials().payload_for(&draft(), None).unwrap();
        assert!(!payload.is_multipart());
    }

    #[test]
    fn test_payload_for_renames_file_to_upload_field() {
        let file = FilePart::from_bytes("file", "asha.png", vec![1, 2, 3]);
        let payload = client()
            .resource(&TESTIMONIALS)
            .payload_for(&draft(), Some(file))
            .unwrap();

        match payload {
            Payload::Multipart(form) => {
                assert_eq!(form.files()[0].field, "avatar");
                assert_eq!(form.get_text("rating"), Some("5"));
            }
            other => panic!("expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_for_rejects_file_without_upload_field() {
        let file = FilePart::from_bytes("file", "x.png", vec![0]);
        let err = client().faqs().payload_for(&draft(), Some(file)).unwrap_err();
        assert_eq!(err.error_code(), "UPLOAD_NOT_SUPPORTED");
    }

    #[tokio::test]
    async fn test_multipart_to_plain_resource_fails_before_network() {
        // No server listens here; a network attempt would be a transport error
        let client = AdminClient::builder()
            .base_url("http://127.0.0.1:9/api")
            .build()
            .unwrap();
        let form = MultipartForm::new().text("question", "Why?");
        let err = client.resource(&FAQS).create(form).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Request(RequestError::UploadNotSupported { ref resource }) if resource == "faqs"
        ));
    }
}
