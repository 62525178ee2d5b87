//! Wrapper manifest handle.
//!
//! The manifest schema and its versioning are owned elsewhere; the client
//! only needs a wrapper's identity, kind, and the interfaces it claims to
//! implement (used to vet resolver extensions).

use serde::{Deserialize, Serialize};

use crate::uri::Uri;

/// The manifest version this client understands.
pub const MANIFEST_VERSION: &str = "0.1";

/// The kind of wrapper a manifest describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapperType {
    /// An externally loaded module executed by an engine.
    #[default]
    Wasm,
    /// An in-process implementation.
    Plugin,
    /// An interface declaration with no implementation.
    Interface,
}

/// A wrapper manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapManifest {
    /// Manifest format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Wrapper name.
    pub name: String,
    /// Wrapper kind.
    #[serde(rename = "type", default)]
    pub wrapper_type: WrapperType,
    /// Interfaces this wrapper implements.
    #[serde(default)]
    pub implements: Vec<Uri>,
    /// Opaque ABI description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<serde_json::Value>,
}

fn default_version() -> String {
    MANIFEST_VERSION.to_string()
}

impl WrapManifest {
    /// Create a manifest for the given name and kind.
    #[must_use]
    pub fn new(name: impl Into<String>, wrapper_type: WrapperType) -> Self {
        Self {
            version: default_version(),
            name: name.into(),
            wrapper_type,
            implements: Vec::new(),
            abi: None,
        }
    }

    /// Declare an implemented interface.
    #[must_use]
    pub fn with_implements(mut self, interface: Uri) -> Self {
        self.implements.push(interface);
        self
    }

    /// Attach an ABI description.
    #[must_use]
    pub fn with_abi(mut self, abi: serde_json::Value) -> Self {
        self.abi = Some(abi);
        self
    }

    /// Whether this manifest declares `interface` among its implementations.
    #[must_use]
    pub fn implements(&self, interface: &Uri) -> bool {
        self.implements.contains(interface)
    }
}
