//! Form controller shared by every entity screen

use super::feedback::{Confirmer, Notice, Notifier, TracingNotifier};
use super::preset::{EntityPreset, ImageMode};
use crate::core::envelope::Pagination;
use crate::core::error::{ClientError, ClientResult, RequestError, ValidationError};
use crate::core::payload::{FilePart, MultipartForm, Payload};
use crate::core::service::{ListParams, RecordService};
use crate::services::ImageUploader;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// List shown, no draft
    Idle,
    /// Drafting a new record
    Creating,
    /// Drafting changes to an existing record
    Editing,
    /// A create or update is in flight
    Saving,
}

/// Which record the draft belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditingId {
    New,
    Existing(String),
}

#[derive(Debug)]
pub enum SaveOutcome {
    /// Written and the list refetched
    Saved(Value),
    /// Another save is still in flight
    Busy,
    /// Rejected before any request was sent
    Invalid(ValidationError),
    /// No draft is open
    NothingToSave,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// A delete guard refused; no request was sent
    Blocked(String),
    /// The operator declined the confirmation
    Cancelled,
}

#[derive(Debug, Default)]
struct FormInner {
    records: Vec<Value>,
    pagination: Option<Pagination>,
    params: ListParams,
    editing: Option<EditingId>,
    draft: Map<String, Value>,
    pending_file: Option<FilePart>,
    saving: bool,
    uploading: bool,
    loading: bool,
    error: Option<String>,
}

/// List, create, edit and delete records of one entity
///
/// Methods take `&self`; the controller can be shared between handlers and
/// the `saving`/`uploading` flags turn overlapping submissions away. The
/// list is never patched locally: every successful write is followed by a
/// full refetch.
pub struct EntityForm {
    preset: EntityPreset,
    service: Arc<dyn RecordService>,
    uploader: Option<Arc<dyn ImageUploader>>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<FormInner>,
}

impl EntityForm {
    pub fn new(preset: EntityPreset, service: Arc<dyn RecordService>) -> Self {
        let params = preset
            .page_size()
            .map(ListParams::paginated)
            .unwrap_or_default();
        Self {
            preset,
            service,
            uploader: None,
            notifier: Arc::new(TracingNotifier),
            inner: Mutex::new(FormInner {
                params,
                ..Default::default()
            }),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Uploader used by eager image fields
    pub fn with_uploader(mut self, uploader: Arc<dyn ImageUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Read-only view
    // =========================================================================

    pub fn preset(&self) -> &EntityPreset {
        &self.preset
    }

    pub fn records(&self) -> Vec<Value> {
        self.lock().records.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.lock().pagination.clone()
    }

    pub fn params(&self) -> ListParams {
        self.lock().params.clone()
    }

    pub fn state(&self) -> FormState {
        let inner = self.lock();
        match (&inner.editing, inner.saving) {
            (_, true) => FormState::Saving,
            (Some(EditingId::New), false) => FormState::Creating,
            (Some(EditingId::Existing(_)), false) => FormState::Editing,
            (None, false) => FormState::Idle,
        }
    }

    pub fn editing_id(&self) -> Option<EditingId> {
        self.lock().editing.clone()
    }

    pub fn draft(&self) -> Map<String, Value> {
        self.lock().draft.clone()
    }

    /// Inline error banner
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.lock().saving
    }

    pub fn is_uploading(&self) -> bool {
        self.lock().uploading
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Local preview of a file waiting to be sent with the next save
    pub fn pending_preview(&self) -> Option<String> {
        self.lock().pending_file.as_ref().map(FilePart::preview)
    }

    // =========================================================================
    // List
    // =========================================================================

    /// Replace the list with the backend's current contents
    pub async fn load(&self) -> ClientResult<()> {
        let params = {
            let mut inner = self.lock();
            inner.loading = true;
            inner.params.clone()
        };

        let result = self.service.list(&params).await;

        let mut inner = self.lock();
        inner.loading = false;
        match result {
            Ok(page) => {
                inner.records = page.records;
                inner.pagination = page.pagination;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(resource = self.service.resource_name(), error = %e, "failed to load list");
                inner.error = Some(format!("Failed to load {}: {}", self.preset.name(), e));
                Err(e)
            }
        }
    }

    /// Move to `page` and refetch
    pub async fn set_page(&self, page: u32) -> ClientResult<()> {
        self.lock().params.page = Some(page.max(1));
        self.load().await
    }

    /// Set a list filter, go back to the first page and refetch
    ///
    /// A blank value removes the filter.
    pub async fn set_filter(&self, key: &str, value: &str) -> ClientResult<()> {
        {
            let mut inner = self.lock();
            if value.trim().is_empty() {
                inner.params.filters.shift_remove(key);
            } else {
                inner.params.filters.insert(key.to_string(), value.to_string());
            }
            if inner.params.page.is_some() {
                inner.params.page = Some(1);
            }
        }
        self.load().await
    }

    // =========================================================================
    // Draft lifecycle
    // =========================================================================

    /// Open a blank draft seeded from the preset defaults
    pub fn begin_create(&self) {
        let mut inner = self.lock();
        if inner.saving {
            return;
        }
        inner.editing = Some(EditingId::New);
        inner.draft = self.preset.defaults().clone();
        inner.pending_file = None;
        inner.error = None;
    }

    /// Open a draft seeded from `record`
    pub fn begin_edit(&self, record: &Value) -> ClientResult<()> {
        let id = record_id(record)?;
        let Value::Object(fields) = record else {
            return Err(invalid_record("record is not an object"));
        };

        let mut inner = self.lock();
        if inner.saving {
            return Ok(());
        }
        inner.editing = Some(EditingId::Existing(id));
        inner.draft = fields.clone();
        inner.pending_file = None;
        inner.error = None;
        Ok(())
    }

    pub fn set_field(&self, field: &str, value: impl Into<Value>) {
        self.lock().draft.insert(field.to_string(), value.into());
    }

    /// Drop the draft without touching the network
    ///
    /// Returns `false` while a save is in flight.
    pub fn cancel(&self) -> bool {
        let mut inner = self.lock();
        if inner.saving {
            return false;
        }
        inner.editing = None;
        inner.draft.clear();
        inner.pending_file = None;
        inner.error = None;
        true
    }

    /// Attach an image to the draft
    ///
    /// Eager forms upload right away and store the returned filename; a failed
    /// upload raises an error toast and leaves the field as it was. Deferred
    /// forms keep the file until the next save.
    pub async fn attach_image(&self, file: FilePart) -> ClientResult<()> {
        match self.preset.image() {
            ImageMode::None => Err(RequestError::UploadNotSupported {
                resource: self.preset.name().to_string(),
            }
            .into()),
            ImageMode::Deferred => {
                self.lock().pending_file = Some(file);
                Ok(())
            }
            ImageMode::Eager { field, .. } => self.upload_now(field, file).await,
        }
    }

    async fn upload_now(&self, field: &str, file: FilePart) -> ClientResult<()> {
        let uploader = self
            .uploader
            .clone()
            .ok_or_else(|| ClientError::Config(format!("No uploader configured for {}", self.preset.name())))?;

        {
            let mut inner = self.lock();
            if inner.uploading {
                return Err(ValidationError::Blocked {
                    reason: "An upload is already in progress".to_string(),
                }
                .into());
            }
            inner.uploading = true;
        }

        let result = uploader.upload_image(file).await;

        let mut inner = self.lock();
        inner.uploading = false;
        match result {
            Ok(filename) => {
                inner.draft.insert(field.to_string(), Value::String(filename));
                drop(inner);
                self.notifier.notify(Notice::success("Image uploaded successfully"));
                Ok(())
            }
            Err(e) => {
                drop(inner);
                tracing::warn!(resource = self.preset.name(), error = %e, "image upload failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to upload image: {}", e)));
                Err(e)
            }
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validate the draft, then create or update and refetch the list
    ///
    /// A failed request leaves the draft and the Creating/Editing state as
    /// they were.
    pub async fn save(&self) -> ClientResult<SaveOutcome> {
        let (editing, payload) = {
            let mut inner = self.lock();
            if inner.saving {
                return Ok(SaveOutcome::Busy);
            }
            let Some(editing) = inner.editing.clone() else {
                return Ok(SaveOutcome::NothingToSave);
            };

            let filtered = match self.preset.validation().validate_and_filter(inner.draft.clone()) {
                Ok(filtered) => filtered,
                Err(e) => {
                    inner.error = Some(e.to_string());
                    return Ok(SaveOutcome::Invalid(e));
                }
            };

            let payload = match inner.pending_file.clone() {
                Some(file) => self.multipart(&filtered, file)?,
                None => Payload::Json(Value::Object(filtered)),
            };

            inner.saving = true;
            inner.error = None;
            (editing, payload)
        };

        let result = match &editing {
            EditingId::New => self.service.create(payload).await,
            EditingId::Existing(id) => self.service.update(id, payload).await,
        };

        {
            let mut inner = self.lock();
            inner.saving = false;
            if let Err(e) = &result {
                inner.error = Some(e.to_string());
            }
        }

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(resource = self.preset.name(), error = %e, "save failed");
                self.notifier
                    .notify(Notice::error(format!("Failed to save {}: {}", self.preset.label(), e)));
                return Err(e);
            }
        };

        {
            let mut inner = self.lock();
            inner.editing = None;
            inner.draft.clear();
            inner.pending_file = None;
        }

        let verb = match editing {
            EditingId::New => "created",
            EditingId::Existing(_) => "updated",
        };
        tracing::info!(resource = self.preset.name(), action = verb, "record saved");
        self.notifier.notify(Notice::success(format!(
            "{} {} successfully",
            capitalize(self.preset.label()),
            verb
        )));

        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "refetch after save failed");
        }
        Ok(SaveOutcome::Saved(body))
    }

    fn multipart(&self, draft: &Map<String, Value>, file: FilePart) -> ClientResult<Payload> {
        let field = self.service.upload_field().ok_or_else(|| {
            ClientError::from(RequestError::UploadNotSupported {
                resource: self.service.resource_name().to_string(),
            })
        })?;
        Ok(MultipartForm::from_draft(draft)
            .file(file.renamed(field))
            .into())
    }

    /// Delete `record` after the guards and the operator agree, then refetch
    pub async fn delete(&self, record: &Value, confirmer: &dyn Confirmer) -> ClientResult<DeleteOutcome> {
        if let Some(reason) = self.preset.delete_blocker(record) {
            self.notifier.notify(Notice::error(reason.clone()));
            return Ok(DeleteOutcome::Blocked(reason));
        }

        let id = record_id(record)?;
        let prompt = format!("Are you sure you want to delete this {}?", self.preset.label());
        if !confirmer.confirm(&prompt) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.service.delete(&id).await {
            tracing::warn!(resource = self.preset.name(), id = %id, error = %e, "delete failed");
            self.notifier
                .notify(Notice::error(format!("Failed to delete {}: {}", self.preset.label(), e)));
            return Err(e);
        }

        tracing::info!(resource = self.preset.name(), id = %id, "record deleted");
        self.notifier.notify(Notice::success(format!(
            "{} deleted successfully",
            capitalize(self.preset.label())
        )));

        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "refetch after delete failed");
        }
        Ok(DeleteOutcome::Deleted)
    }
}

impl std::fmt::Debug for EntityForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityForm")
            .field("preset", &self.preset.name())
            .field("state", &self.state())
            .finish()
    }
}

/// Backend `_id` of a record
fn record_id(record: &Value) -> ClientResult<String> {
    record
        .get("_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| invalid_record("record has no '_id'"))
}

fn invalid_record(message: &str) -> ClientError {
    RequestError::InvalidPayload {
        message: message.to_string(),
    }
    .into()
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
