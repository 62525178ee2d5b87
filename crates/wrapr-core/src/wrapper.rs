//! Package and wrapper capabilities.
//!
//! A [`WrapPackage`] is something that *can* become a wrapper (it knows its
//! manifest and how to instantiate itself). A [`Wrapper`] is the loaded,
//! invocable form. The execution engine behind either is not this crate's
//! concern; resolution treats both as opaque terminal values.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::client::Invoker;
use crate::error::{WrapError, WrapResult};
use crate::manifest::WrapManifest;
use crate::uri::Uri;

/// Per-wrapper environment: string keys mapped to structured values.
pub type Env = serde_json::Map<String, Value>;

/// Everything a wrapper needs to execute one method call.
#[derive(Debug, Clone)]
pub struct InvokeOptions {
    /// The URI the wrapper was resolved from.
    pub uri: Uri,
    /// Method name.
    pub method: String,
    /// Method arguments.
    pub args: Value,
    /// Environment configured for `uri`, if any.
    pub env: Option<Env>,
}

impl InvokeOptions {
    /// Create invocation options without an environment.
    #[must_use]
    pub fn new(uri: Uri, method: impl Into<String>, args: Value) -> Self {
        Self {
            uri,
            method: method.into(),
            args,
            env: None,
        }
    }

    /// Attach an environment.
    #[must_use]
    pub fn with_env(mut self, env: Option<Env>) -> Self {
        self.env = env;
        self
    }
}

/// How a file should be returned by [`Wrapper::get_file`] callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetFileOptions {
    /// Path inside the wrapper package.
    pub path: String,
    /// Text encoding; `None` returns raw bytes.
    pub encoding: Option<String>,
}

impl GetFileOptions {
    /// Request raw bytes.
    #[must_use]
    pub fn bytes(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            encoding: None,
        }
    }

    /// Request UTF-8 text.
    #[must_use]
    pub fn utf8(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            encoding: Some("utf-8".to_string()),
        }
    }

    /// Decode raw file contents according to the requested encoding.
    ///
    /// # Errors
    ///
    /// Returns [`WrapError::InvalidArgument`] for an unsupported encoding or
    /// contents that are not valid in it.
    pub fn decode(&self, bytes: Vec<u8>) -> WrapResult<FileContent> {
        match self.encoding.as_deref() {
            None => Ok(FileContent::Bytes(bytes)),
            Some(enc) if enc.eq_ignore_ascii_case("utf-8") || enc.eq_ignore_ascii_case("utf8") => {
                String::from_utf8(bytes).map(FileContent::Text).map_err(|e| {
                    WrapError::InvalidArgument(format!("{} is not valid utf-8: {e}", self.path))
                })
            },
            Some(other) => Err(WrapError::InvalidArgument(format!(
                "unsupported file encoding '{other}'"
            ))),
        }
    }
}

/// File contents returned by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Decoded text.
    Text(String),
}

/// A loaded, invocable wrapper.
#[async_trait]
pub trait Wrapper: Send + Sync {
    /// The wrapper's manifest.
    fn manifest(&self) -> &WrapManifest;

    /// Execute one method. `invoker` lets the wrapper call other wrappers.
    async fn invoke(&self, options: &InvokeOptions, invoker: &dyn Invoker) -> WrapResult<Value>;

    /// Read a file bundled with the wrapper.
    async fn get_file(&self, path: &str) -> WrapResult<Vec<u8>>;
}

/// A package that can be turned into a [`Wrapper`].
#[async_trait]
pub trait WrapPackage: Send + Sync {
    /// Fetch the package manifest without instantiating the wrapper.
    async fn get_manifest(&self) -> WrapResult<WrapManifest>;

    /// Instantiate the wrapper.
    async fn create_wrapper(&self) -> WrapResult<Arc<dyn Wrapper>>;
}

impl std::fmt::Debug for dyn Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapper")
            .field("name", &self.manifest().name)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for dyn WrapPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapPackage").finish_non_exhaustive()
    }
}
