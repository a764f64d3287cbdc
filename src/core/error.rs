//! Typed error handling for the admin client
//!
//! Every fallible operation returns a [`ClientError`], split into categories so
//! that callers can match the case they care about instead of inspecting
//! message strings.
//!
//! # Error Categories
//!
//! - [`ClientError::Unauthorized`]: the backend answered 401 (the session has
//!   already been cleared and the login navigation issued)
//! - [`ValidationError`]: a draft failed client-side checks, nothing was sent
//! - [`RequestError`]: the request could not be built
//! - [`ClientError::Http`]: any other non-2xx response
//! - [`ClientError::Rejected`]: a 2xx envelope with `success: false`
//!
//! # Example
//!
//! ```rust,ignore
//! match client.testimonials().create(payload).await {
//!     Ok(body) => println!("created: {}", body),
//!     Err(ClientError::Unauthorized) => { /* already redirected */ }
//!     Err(ClientError::Http { status, message }) => eprintln!("{}: {}", status, message),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for the admin client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP 401; the unauthorized policy has already run
    #[error("Unauthorized: session cleared")]
    Unauthorized,

    /// Client-side validation failed before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request could not be built
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Non-2xx response other than 401
    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope carried `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Connection, timeout or other transport failure
    #[error("Network error: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Session(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Unauthorized => "UNAUTHORIZED",
            ClientError::Validation(e) => e.error_code(),
            ClientError::Request(e) => e.error_code(),
            ClientError::Http { .. } => "HTTP_ERROR",
            ClientError::Rejected(_) => "REJECTED",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Session(_) => "SESSION_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status carried by this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the error is the 401 case
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Check if the error was raised before any network call
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::Request(_) | ClientError::Config(_)
        )
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to draft validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// One or more required fields are empty
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Field rules failed
    #[error("Validation errors: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// The operation is not allowed for this record
    #[error("{reason}")]
    Blocked { reason: String },
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "MISSING_FIELDS",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::Blocked { .. } => "OPERATION_BLOCKED",
        }
    }

    /// Field names involved in this error
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::MissingFields(fields) => fields.iter().map(String::as_str).collect(),
            ValidationError::FieldErrors(errors) => errors.iter().map(|e| e.field.as_str()).collect(),
            ValidationError::Blocked { .. } => Vec::new(),
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors raised while building a request
#[derive(Debug, Error)]
pub enum RequestError {
    /// Multipart payload sent to a resource without an upload field
    #[error("Resource '{resource}' does not accept file uploads")]
    UploadNotSupported { resource: String },

    /// Payload could not be turned into a request body
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    /// Local file could not be read or written
    #[error("IO error: {message}")]
    Io { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::UploadNotSupported { .. } => "UPLOAD_NOT_SUPPORTED",
            RequestError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            RequestError::Io { .. } => "IO_ERROR",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Request(RequestError::Io {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ClientError {
    fn from(err: serde_yaml::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for admin client operations
pub type ClientResult<T> = Result<T, ClientError>;
