//! Resolver over the registry of in-process plugins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use wrapr_core::{
    Client, ResolutionContext, ResolutionResult, ResolutionStep, Uri, UriResolver, WrapError,
    WrapPackage, WrapResult,
};
use wrapr_plugin::PluginPackage;

/// Answers registered plugin packages by exact URI.
#[derive(Debug, Clone, Default)]
pub struct PluginResolver {
    plugins: HashMap<Uri, Arc<PluginPackage>>,
}

impl PluginResolver {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `package` under `uri`, replacing any earlier registration.
    pub fn register(&mut self, uri: Uri, package: PluginPackage) {
        self.plugins.insert(uri, Arc::new(package));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_plugin(mut self, uri: Uri, package: PluginPackage) -> Self {
        self.register(uri, package);
        self
    }

    /// Whether a plugin is registered under `uri`.
    #[must_use]
    pub fn contains(&self, uri: &Uri) -> bool {
        self.plugins.contains_key(uri)
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn lookup(&self, uri: &Uri) -> WrapResult<ResolutionResult> {
        let Some(package) = self.plugins.get(uri) else {
            return Ok(ResolutionResult::NotFound);
        };
        // A plugin with no callable methods can never serve an invocation.
        if package.module().methods().is_empty() {
            return Err(WrapError::resolver(
                self.description(),
                uri,
                format!("plugin '{}' exposes no methods", package.manifest().name),
            ));
        }
        debug!(uri = %uri, plugin = %package.manifest().name, "Resolved plugin");
        let package: Arc<dyn WrapPackage> = package.clone();
        Ok(ResolutionResult::Package(uri.clone(), package))
    }
}

#[async_trait]
impl UriResolver for PluginResolver {
    fn description(&self) -> String {
        "PluginResolver".to_string()
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        _client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        match self.lookup(uri) {
            Ok(result) => {
                context.track_step(ResolutionStep::new(
                    uri.clone(),
                    self.description(),
                    result.clone(),
                ));
                Ok(result)
            },
            Err(err) => {
                context.track_step(ResolutionStep::failed(
                    uri.clone(),
                    self.description(),
                    &err,
                ));
                Err(err)
            },
        }
    }
}
