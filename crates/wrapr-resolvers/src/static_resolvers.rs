//! Resolvers bound to one URI and one pre-built package or wrapper.

use std::sync::Arc;

use async_trait::async_trait;

use wrapr_core::{
    Client, ResolutionContext, ResolutionResult, ResolutionStep, Uri, UriResolver, WrapPackage,
    WrapResult, Wrapper,
};

/// Answers a fixed package for exactly one URI.
#[derive(Clone)]
pub struct PackageResolver {
    uri: Uri,
    package: Arc<dyn WrapPackage>,
}

impl PackageResolver {
    /// Serve `package` for `uri`.
    #[must_use]
    pub fn new(uri: Uri, package: Arc<dyn WrapPackage>) -> Self {
        Self { uri, package }
    }
}

impl std::fmt::Debug for PackageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageResolver")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl UriResolver for PackageResolver {
    fn description(&self) -> String {
        format!("PackageResolver ({})", self.uri)
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        _client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let result = if *uri == self.uri {
            ResolutionResult::Package(uri.clone(), Arc::clone(&self.package))
        } else {
            ResolutionResult::NotFound
        };
        context.track_step(ResolutionStep::new(
            uri.clone(),
            self.description(),
            result.clone(),
        ));
        Ok(result)
    }
}

/// Answers a fixed, already-loaded wrapper for exactly one URI.
#[derive(Clone)]
pub struct WrapperResolver {
    uri: Uri,
    wrapper: Arc<dyn Wrapper>,
}

impl WrapperResolver {
    /// Serve `wrapper` for `uri`.
    #[must_use]
    pub fn new(uri: Uri, wrapper: Arc<dyn Wrapper>) -> Self {
        Self { uri, wrapper }
    }
}

impl std::fmt::Debug for WrapperResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperResolver")
            .field("uri", &self.uri)
            .field("wrapper", &self.wrapper.manifest().name)
            .finish()
    }
}

#[async_trait]
impl UriResolver for WrapperResolver {
    fn description(&self) -> String {
        format!("WrapperResolver ({})", self.uri)
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        _client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let result = if *uri == self.uri {
            ResolutionResult::Wrapper(uri.clone(), Arc::clone(&self.wrapper))
        } else {
            ResolutionResult::NotFound
        };
        context.track_step(ResolutionStep::new(
            uri.clone(),
            self.description(),
            result.clone(),
        ));
        Ok(result)
    }
}
