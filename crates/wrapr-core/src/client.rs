//! The client capabilities resolvers and wrappers are handed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::ResolutionContext;
use crate::error::WrapResult;
use crate::manifest::WrapManifest;
use crate::resolution::ResolutionResult;
use crate::uri::Uri;
use crate::wrapper::{Env, FileContent, GetFileOptions, Wrapper};

/// Something that can invoke a method on a wrapper addressed by URI.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Resolve `uri`, then call `method` with `args` on the result.
    async fn invoke(&self, uri: &Uri, method: &str, args: Value) -> WrapResult<Value>;
}

/// The view of a client that resolvers and wrappers can see.
#[async_trait]
pub trait Client: Invoker {
    /// Interface URI to implementation URIs, in priority order.
    fn get_interfaces(&self) -> &HashMap<Uri, Vec<Uri>>;

    /// All configured environments.
    fn get_envs(&self) -> &HashMap<Uri, Env>;

    /// The environment configured for exactly `uri`, if any.
    fn get_env_by_uri(&self, uri: &Uri) -> Option<&Env> {
        self.get_envs().get(uri)
    }

    /// Implementations registered for `interface` (empty if none).
    fn get_implementations(&self, interface: &Uri) -> &[Uri] {
        self.get_interfaces()
            .get(interface)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Run the resolver chain for `uri` inside an existing context.
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult>;

    /// Resolve `uri` inside `context` and materialize the wrapper.
    async fn load_wrapper(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<Arc<dyn Wrapper>>;

    /// Fetch the manifest of the wrapper `uri` resolves to.
    async fn get_manifest(&self, uri: &Uri) -> WrapResult<WrapManifest>;

    /// Read a file from the wrapper `uri` resolves to.
    async fn get_file(&self, uri: &Uri, options: &GetFileOptions) -> WrapResult<FileContent>;
}
