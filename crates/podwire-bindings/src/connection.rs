//! Connection context shared by all bindings.

use std::sync::Arc;

use podwire_params::Registry;

use crate::request::Request;

/// Service endpoint and the option registry used to encode requests.
///
/// Cloning is cheap; clones share the registry, so each option struct type is
/// described once per process no matter how many connections exist.
#[derive(Debug, Clone)]
pub struct Connection {
    base_url: String,
    registry: Arc<Registry>,
}

impl Connection {
    /// Connection to `base_url` with a fresh registry.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_registry(base_url, Arc::new(Registry::new()))
    }

    /// Connection to `base_url` sharing an existing registry.
    pub fn with_registry(base_url: impl Into<String>, registry: Arc<Registry>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, registry }
    }

    /// Base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Option registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Absolute URL of `request`.
    pub fn url(&self, request: &Request) -> String {
        format!("{}{}", self.base_url, request.uri())
    }
}
