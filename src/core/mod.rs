//! Core module containing the fundamental types shared by the client,
//! the endpoint services and the form controllers

pub mod envelope;
pub mod error;
pub mod field;
pub mod navigation;
pub mod payload;
pub mod query;
pub mod service;
pub mod session;
pub mod validation;

pub use envelope::{ApiEnvelope, Envelope, ListEnvelope, Pagination, UploadResponse};
pub use error::{ClientError, ClientResult, FieldValidationError, RequestError, ValidationError};
pub use field::is_truthy;
pub use navigation::{FnNavigator, Navigator, NoopNavigator, RecordingNavigator};
pub use payload::{FilePart, MultipartForm, Payload};
pub use query::{QueryString, SortOrder, ToQuery};
pub use service::{ListParams, RecordPage, RecordService, check_success};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
