//! Registry of admin resources keyed by name

use super::{ALL, ResourceDescriptor};
use std::collections::HashMap;

/// Lookup table for resource descriptors
///
/// Resources are keyed by [`ResourceDescriptor::name`]; lookups by URL path
/// segment are also supported so that callers holding a path (from a route
/// or a config file) can resolve it.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    descriptors: HashMap<&'static str, ResourceDescriptor>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Registry holding every resource in the catalog
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for descriptor in ALL {
            registry.register(*descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous one with the same name
    pub fn register(&mut self, descriptor: ResourceDescriptor) {
        self.descriptors.insert(descriptor.name, descriptor);
    }

    /// Look up by name, falling back to the path segment
    pub fn get(&self, key: &str) -> Option<&ResourceDescriptor> {
        self.descriptors
            .get(key)
            .or_else(|| self.descriptors.values().find(|d| d.path == key))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.descriptors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors that accept multipart uploads
    pub fn upload_capable(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.values().filter(|d| d.accepts_uploads())
    }
}
