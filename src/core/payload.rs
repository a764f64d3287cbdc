//! Request payloads
//!
//! A write is either a JSON document or a multipart form. Multipart forms are
//! kept in an inspectable representation until the request is sent, then
//! turned into a [`reqwest::multipart::Form`] so the transport can pick the
//! boundary.

use crate::core::error::{ClientResult, RequestError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Body of a create/update request
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartForm),
}

impl Payload {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Payload::Multipart(_))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Json(Value::Object(map))
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Payload::Multipart(form)
    }
}

/// A file attached to a multipart form
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// Where the bytes were read from, used as the local preview reference
    pub source: Option<PathBuf>,
}

impl FilePart {
    /// File part from in-memory bytes; the MIME type is guessed from the name
    pub fn from_bytes(
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let file_name = file_name.into();
        Self {
            field: field.into(),
            mime: guess_mime(&file_name).to_string(),
            file_name,
            bytes: bytes.into(),
            source: None,
        }
    }

    /// File part read from disk
    pub async fn from_path(field: impl Into<String>, path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RequestError::InvalidPayload {
                message: format!("'{}' has no file name", path.display()),
            })?
            .to_string();

        let mut part = Self::from_bytes(field, file_name, bytes);
        part.source = Some(path.to_path_buf());
        Ok(part)
    }

    /// Override the guessed MIME type
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Same file under a different form field
    pub fn renamed(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Local reference for displaying the file before it is uploaded
    pub fn preview(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => self.file_name.clone(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Multipart form: text fields plus files, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    text: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.push((name.into(), value.into()));
        self
    }

    /// Add a file
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Flatten a JSON draft into text fields
    ///
    /// Strings are sent as-is, numbers and booleans in their JSON text form,
    /// arrays and objects as JSON strings. Nulls are skipped.
    pub fn from_draft(draft: &Map<String, Value>) -> Self {
        draft
            .iter()
            .filter_map(|(key, value)| form_text(value).map(|text| (key.clone(), text)))
            .fold(Self::new(), |form, (key, text)| form.text(key, text))
    }

    pub fn text_fields(&self) -> &[(String, String)] {
        &self.text
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Value of the first text field named `name`
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.text
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert into a transport form
    pub fn into_reqwest(self) -> ClientResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();

        for (name, value) in self.text {
            form = form.text(name, value);
        }

        for file in self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime)
                .map_err(|e| RequestError::InvalidPayload {
                    message: format!("Invalid MIME type '{}': {}", file.mime, e),
                })?;
            form = form.part(file.field, part);
        }

        Ok(form)
    }
}

fn form_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mime_guessing() {
        assert_eq!(FilePart::from_bytes("f", "a.PNG", vec![]).mime, "image/png");
        assert_eq!(FilePart::from_bytes("f", "a.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(
            FilePart::from_bytes("f", "noext", vec![]).mime,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_from_draft_flattens_values() {
        let draft = json!({
            "name": "Ada",
            "rating": 5,
            "featured": true,
            "tags": ["a", "b"],
            "avatar": null
        });
        let form = MultipartForm::from_draft(draft.as_object().unwrap());

        assert_eq!(form.get_text("name"), Some("Ada"));
        assert_eq!(form.get_text("rating"), Some("5"));
        assert_eq!(form.get_text("featured"), Some("true"));
        assert_eq!(form.get_text("tags"), Some(r#"["a","b"]"#));
        assert_eq!(form.get_text("avatar"), None);
    }

    #[test]
    fn test_payload_kind() {
        assert!(!Payload::from(json!({"a": 1})).is_multipart());
        assert!(Payload::from(MultipartForm::new()).is_multipart());
    }

    #[test]
    fn test_preview_prefers_source_path() {
        let mut part = FilePart::from_bytes("avatar", "me.png", vec![1, 2]);
        assert_eq!(part.preview(), "me.png");
        part.source = Some(PathBuf::from("/tmp/me.png"));
        assert_eq!(part.preview(), "/tmp/me.png");
        assert!(part.is_image());
    }

    #[test]
    fn test_into_reqwest_rejects_bad_mime() {
        let form = MultipartForm::new()
            .file(FilePart::from_bytes("avatar", "a.png", vec![0]).with_mime("not a mime"));
        assert!(form.into_reqwest().is_err());
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.webp");
        std::fs::write(&path, b"RIFF").unwrap();

        let part = FilePart::from_path("logo", &path).await.unwrap();
        assert_eq!(part.file_name, "logo.webp");
        assert_eq!(part.mime, "image/webp");
        assert_eq!(part.bytes, b"RIFF");
        assert_eq!(part.source.as_deref(), Some(path.as_path()));
    }
}
