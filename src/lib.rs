//! # Admin Resource Client
//!
//! Typed REST client and form controllers for the course marketing admin back
//! office.
//!
//! ## Features
//!
//! - **One Client, Every Resource**: generic CRUD on `/admin/<resource>` plus
//!   named accessors for the 25 catalogued resources
//! - **Bearer Auth**: token read from an injectable session store on every request
//! - **Unified 401 Policy**: session cleared and login navigation issued,
//!   whichever call was rejected
//! - **JSON or Multipart**: upload-capable resources accept multipart payloads
//!   through the same methods
//! - **Endpoint Services**: payments, coupons, customers, inquiries, icons,
//!   uploads and CSV exports
//! - **Form Controllers**: draft lifecycle, required-field validation, saving
//!   flag, confirmed deletes and refetch after every write
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use admin_client::prelude::*;
//!
//! let client = AdminClient::builder()
//!     .config(ClientConfig::from_env()?)
//!     .navigator(FnNavigator(|route: &str| router.push(route)))
//!     .build()?;
//!
//! client.auth().login("admin@academy.io", "secret").await?;
//!
//! // Generic surface
//! let faqs = client.get_all("faqs").await?;
//!
//! // Named resource with a multipart payload
//! let form = MultipartForm::new()
//!     .text("name", "Asha")
//!     .file(FilePart::from_path("avatar", "asha.png").await?);
//! client.testimonials().create(form).await?;
//!
//! // Form controller
//! let coupons = client.form(preset::coupons())?;
//! coupons.load().await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod forms;
pub mod resources;
pub mod services;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Client ===
    pub use crate::client::{AdminClient, ClientBuilder, ResourceClient};
    pub use crate::config::ClientConfig;

    // === Core ===
    pub use crate::core::{
        envelope::{
            AnalyticsEnvelope, ApiEnvelope, CouponListEnvelope, Envelope, ListEnvelope,
            Pagination, StatsEnvelope, TransactionListEnvelope, UploadResponse,
        },
        error::{ClientError, ClientResult, FieldValidationError, RequestError, ValidationError},
        navigation::{FnNavigator, Navigator, NoopNavigator, RecordingNavigator},
        payload::{FilePart, MultipartForm, Payload},
        query::{CouponQuery, CustomerQuery, InquiryQuery, PaymentQuery, SortOrder, ToQuery},
        service::{ListParams, RecordPage, RecordService},
        session::{FileSessionStore, MemorySessionStore, Session, SessionStore},
        validation::EntityValidationConfig,
    };

    // === Resources ===
    pub use crate::resources::{ResourceDescriptor, ResourceRegistry};

    // === Services ===
    pub use crate::services::{ExportFile, ImageUploader, UploadTarget, coupon_course_labels};

    // === Forms ===
    pub use crate::forms::{
        Confirmer, DeleteOutcome, EditingId, EntityForm, EntityPreset, FormState, ImageMode,
        Notice, Notifier, RecordingNotifier, SaveOutcome, TracingNotifier, preset,
    };

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
}
