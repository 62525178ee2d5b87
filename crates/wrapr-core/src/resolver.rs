//! The URI resolver capability.

use async_trait::async_trait;

use crate::client::Client;
use crate::context::ResolutionContext;
use crate::error::WrapResult;
use crate::resolution::ResolutionResult;
use crate::uri::Uri;

/// Maps a URI to a redirect, a package, a wrapper, or `NotFound`.
///
/// Implementations record exactly one [`ResolutionStep`] in `context`
/// before returning (including when they fail) and must be deterministic
/// for a fixed URI and client configuration. Wrappers that only follow
/// another resolver's redirects add no step of their own.
///
/// [`ResolutionStep`]: crate::ResolutionStep
#[async_trait]
pub trait UriResolver: Send + Sync {
    /// Human-readable name used in resolution histories.
    fn description(&self) -> String;

    /// Try to resolve `uri`.
    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult>;
}

impl std::fmt::Debug for dyn UriResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriResolver")
            .field("description", &self.description())
            .finish_non_exhaustive()
    }
}
