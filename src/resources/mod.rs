//! Admin resources: descriptors, the registry and the named catalog
//!
//! A resource is a collection under `/admin/<path>`. Every resource the back
//! office manages is declared once in [`catalog`]; resources that store an
//! image declare the multipart field the backend expects for it.

#[macro_use]
mod macros;

pub mod catalog;
pub mod registry;

pub use catalog::*;
pub use registry::ResourceRegistry;

/// Static description of one admin resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    /// Identifier used in code and logs (`team_members`)
    pub name: &'static str,

    /// Path segment under `/admin` (`team-members`)
    pub path: &'static str,

    /// Multipart field carrying the image, for upload-capable resources
    pub upload_field: Option<&'static str>,
}

impl ResourceDescriptor {
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            upload_field: None,
        }
    }

    /// Mark the resource as accepting multipart payloads with an image in `field`
    pub const fn with_upload(mut self, field: &'static str) -> Self {
        self.upload_field = Some(field);
        self
    }

    pub fn accepts_uploads(&self) -> bool {
        self.upload_field.is_some()
    }

    /// `/admin/<path>`
    pub fn collection_path(&self) -> String {
        crate::client::admin_path(self.path, None)
    }

    /// `/admin/<path>/<id>`
    pub fn item_path(&self, id: &str) -> String {
        crate::client::admin_path(self.path, Some(id))
    }
}

impl std::fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_paths() {
        assert_eq!(TEAM_MEMBERS.collection_path(), "/admin/team-members");
        assert_eq!(TEAM_MEMBERS.item_path("65f0"), "/admin/team-members/65f0");
        assert_eq!(TEAM_MEMBERS.to_string(), "team-members");
    }

    #[test]
    fn test_upload_capability() {
        assert_eq!(MENTORS.upload_field, Some("image"));
        assert!(TESTIMONIALS.accepts_uploads());
        assert!(!FAQS.accepts_uploads());
        assert!(!COUPONS.accepts_uploads());
    }
}
