//! Single-URI redirect.

use async_trait::async_trait;
use tracing::debug;

use wrapr_core::{
    Client, ResolutionContext, ResolutionResult, ResolutionStep, Uri, UriResolver, WrapResult,
};

/// Redirects exactly one URI to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResolver {
    from: Uri,
    to: Uri,
}

impl RedirectResolver {
    /// Redirect `from` to `to`.
    #[must_use]
    pub fn new(from: Uri, to: Uri) -> Self {
        Self { from, to }
    }

    /// The redirected URI.
    #[must_use]
    pub fn from(&self) -> &Uri {
        &self.from
    }

    /// The redirect target.
    #[must_use]
    pub fn to(&self) -> &Uri {
        &self.to
    }
}

#[async_trait]
impl UriResolver for RedirectResolver {
    fn description(&self) -> String {
        format!("RedirectResolver ({} - {})", self.from, self.to)
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        _client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let result = if *uri == self.from {
            debug!(from = %self.from, to = %self.to, "Redirecting");
            ResolutionResult::Uri(self.to.clone())
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

#[cfg(test)]
mod tests {
    use super::*;
    use wrapr_test::{MockClient, test_uri};

    #[tokio::test]
    async fn test_redirects_matching_uri() {
        let resolver = RedirectResolver::new(test_uri("ens/old.eth"), test_uri("ens/new.eth"));
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&test_uri("wrap://ens/old.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(u) if u == test_uri("ens/new.eth")));
        assert_eq!(ctx.get_history().len(), 1);
        assert_eq!(
            ctx.get_history()[0].description,
            "RedirectResolver (wrap://ens/old.eth - wrap://ens/new.eth)"
        );
    }

    #[tokio::test]
    async fn test_other_uris_are_not_found() {
        let resolver = RedirectResolver::new(test_uri("ens/old.eth"), test_uri("ens/new.eth"));
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&test_uri("ens/new.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(result.is_not_found());
        assert!(ctx.get_history()[0].is_not_found());
    }
}
