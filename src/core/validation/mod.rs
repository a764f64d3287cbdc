//! Validation and filtering system
//!
//! Drafts are normalized by filters and checked by validators before any
//! request leaves the client. Each entity declares its rules in an
//! [`EntityValidationConfig`].

pub mod config;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
