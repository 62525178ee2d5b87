//! Plugin package and wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use wrapr_core::{
    InvokeOptions, Invoker, WrapError, WrapManifest, WrapPackage, WrapResult, Wrapper, WrapperType,
};

use crate::module::PluginModule;

/// An in-process package: a module plus its manifest.
#[derive(Clone)]
pub struct PluginPackage {
    module: Arc<dyn PluginModule>,
    manifest: WrapManifest,
}

impl PluginPackage {
    /// Wrap a module with an explicit manifest.
    #[must_use]
    pub fn new(module: Arc<dyn PluginModule>, manifest: WrapManifest) -> Self {
        Self { module, manifest }
    }

    /// Wrap a module with a minimal plugin manifest named `name`.
    #[must_use]
    pub fn from_module(name: impl Into<String>, module: Arc<dyn PluginModule>) -> Self {
        Self::new(module, WrapManifest::new(name, WrapperType::Plugin))
    }

    /// The module behind this package.
    #[must_use]
    pub fn module(&self) -> &Arc<dyn PluginModule> {
        &self.module
    }

    /// The package manifest.
    #[must_use]
    pub fn manifest(&self) -> &WrapManifest {
        &self.manifest
    }
}

impl std::fmt::Debug for PluginPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginPackage")
            .field("name", &self.manifest.name)
            .field("methods", &self.module.methods())
            .finish()
    }
}

#[async_trait]
impl WrapPackage for PluginPackage {
    async fn get_manifest(&self) -> WrapResult<WrapManifest> {
        Ok(self.manifest.clone())
    }

    async fn create_wrapper(&self) -> WrapResult<Arc<dyn Wrapper>> {
        Ok(Arc::new(PluginWrapper::new(
            Arc::clone(&self.module),
            self.manifest.clone(),
        )))
    }
}

/// The loaded form of a [`PluginPackage`].
pub struct PluginWrapper {
    module: Arc<dyn PluginModule>,
    manifest: WrapManifest,
}

impl PluginWrapper {
    /// Create a wrapper around `module`.
    #[must_use]
    pub fn new(module: Arc<dyn PluginModule>, manifest: WrapManifest) -> Self {
        Self { module, manifest }
    }
}

#[async_trait]
impl Wrapper for PluginWrapper {
    fn manifest(&self) -> &WrapManifest {
        &self.manifest
    }

    async fn invoke(&self, options: &InvokeOptions, invoker: &dyn Invoker) -> WrapResult<Value> {
        if !self.module.has_method(&options.method) {
            return Err(WrapError::MethodNotFound {
                uri: options.uri.clone(),
                method: options.method.clone(),
            });
        }

        debug!(
            uri = %options.uri,
            method = %options.method,
            plugin = %self.manifest.name,
            "Invoking plugin method"
        );

        self.module.invoke_method(options, invoker).await
    }

    async fn get_file(&self, path: &str) -> WrapResult<Vec<u8>> {
        // Plugins are not backed by files.
        Err(WrapError::FileNotFound {
            path: path.to_string(),
        })
    }
}
