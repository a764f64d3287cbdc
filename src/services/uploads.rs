//! Standalone image uploads and uploaded-file URLs

use crate::client::AdminClient;
use crate::config::ClientConfig;
use crate::core::envelope::{ApiEnvelope, UploadResponse};
use crate::core::error::{ClientError, ClientResult};
use crate::core::payload::{FilePart, MultipartForm};
use async_trait::async_trait;
use reqwest::Method;

/// Dedicated upload endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    TestimonialAvatar,
    MentorImage,
}

impl UploadTarget {
    pub fn path(&self) -> &'static str {
        match self {
            UploadTarget::TestimonialAvatar => "/admin/upload/testimonial-avatar",
            UploadTarget::MentorImage => "/admin/upload/mentor-image",
        }
    }

    /// Multipart field the endpoint reads the file from
    pub fn field(&self) -> &'static str {
        match self {
            UploadTarget::TestimonialAvatar => "avatar",
            UploadTarget::MentorImage => "image",
        }
    }
}

/// Uploads a file and returns the stored filename
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_image(&self, file: FilePart) -> ClientResult<String>;
}

#[derive(Debug, Clone)]
pub struct UploadService {
    client: AdminClient,
}

impl UploadService {
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Multipart `POST` of `file` to `target`
    pub async fn upload(&self, target: UploadTarget, file: FilePart) -> ClientResult<UploadResponse> {
        let form = MultipartForm::new().file(file.renamed(target.field()));
        let response: UploadResponse = self
            .client
            .request(Method::POST, target.path(), None, Some(form.into()))
            .await?;
        response.ensure_success()
    }

    /// `POST /admin/upload/testimonial-avatar`
    pub async fn testimonial_avatar(&self, file: FilePart) -> ClientResult<UploadResponse> {
        self.upload(UploadTarget::TestimonialAvatar, file).await
    }

    /// `POST /admin/upload/mentor-image`
    pub async fn mentor_image(&self, file: FilePart) -> ClientResult<UploadResponse> {
        self.upload(UploadTarget::MentorImage, file).await
    }

    /// Uploader bound to one endpoint
    pub fn uploader(&self, target: UploadTarget) -> TargetedUploader {
        TargetedUploader {
            service: self.clone(),
            target,
        }
    }

    /// Displayable URL for a stored filename
    pub fn upload_url(&self, filename: &str) -> String {
        upload_url(self.client.config(), filename)
    }
}

/// [`UploadService`] bound to one [`UploadTarget`]
#[derive(Debug, Clone)]
pub struct TargetedUploader {
    service: UploadService,
    target: UploadTarget,
}

#[async_trait]
impl ImageUploader for TargetedUploader {
    async fn upload_image(&self, file: FilePart) -> ClientResult<String> {
        let response = self.service.upload(self.target, file).await?;
        response
            .filename
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClientError::Decode("Upload response carries no filename".to_string()))
    }
}

/// `<asset origin><uploads path>/<filename>`; absolute URLs are returned unchanged
pub fn upload_url(config: &ClientConfig, filename: &str) -> String {
    if filename.starts_with("http://") || filename.starts_with("https://") {
        return filename.to_string();
    }
    format!(
        "{}/{}/{}",
        config.asset_origin(),
        config.uploads_path.trim_matches('/'),
        filename.trim_start_matches('/')
    )
}
