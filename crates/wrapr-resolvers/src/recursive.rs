//! Redirect following.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use wrapr_core::{Client, ResolutionContext, ResolutionResult, Uri, UriResolver, WrapResult};

/// Re-resolves every redirect its inner resolver produces until it reaches
/// a package, a wrapper, or a URI nothing claims.
///
/// Each URI entered is marked in the context's visited set, so a redirect
/// cycle fails with [`InfiniteLoop`](wrapr_core::WrapError::InfiniteLoop).
/// A redirect whose target resolves to `NotFound` ends as that target URI.
#[derive(Debug, Clone)]
pub struct RecursiveResolver {
    resolver: Arc<dyn UriResolver>,
}

impl RecursiveResolver {
    /// Follow redirects produced by `resolver`.
    #[must_use]
    pub fn new(resolver: Arc<dyn UriResolver>) -> Self {
        Self { resolver }
    }

    /// The wrapped resolver.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn UriResolver> {
        &self.resolver
    }
}

#[async_trait]
impl UriResolver for RecursiveResolver {
    fn description(&self) -> String {
        format!("RecursiveResolver ({})", self.resolver.description())
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let mut current = uri.clone();
        let mut last_redirect = None;

        loop {
            context.start_resolution(&current)?;

            match self.resolver.try_resolve(&current, client, context).await? {
                ResolutionResult::Uri(next) if next != current => {
                    debug!(from = %current, to = %next, "Following redirect");
                    last_redirect = Some(next.clone());
                    current = next;
                },
                ResolutionResult::NotFound => {
                    let result = last_redirect.map_or(ResolutionResult::NotFound, ResolutionResult::Uri);
                    return Ok(result);
                },
                other => return Ok(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::UriResolverAggregator;
    use crate::redirect::RedirectResolver;
    use wrapr_core::WrapError;
    use wrapr_test::{MockClient, MockWrapper, test_uri};

    fn redirect(from: &str, to: &str) -> Arc<dyn UriResolver> {
        Arc::new(RedirectResolver::new(test_uri(from), test_uri(to)))
    }

    fn recursive(resolvers: Vec<Arc<dyn UriResolver>>) -> RecursiveResolver {
        RecursiveResolver::new(Arc::new(UriResolverAggregator::new(resolvers)))
    }

    #[tokio::test]
    async fn test_follows_redirect_chain_to_wrapper() {
        let wrapper: Arc<dyn UriResolver> = Arc::new(crate::WrapperResolver::new(
            test_uri("ens/c.eth"),
            MockWrapper::new("c").shared(),
        ));
        let resolver = recursive(vec![
            redirect("ens/a.eth", "ens/b.eth"),
            redirect("ens/b.eth", "ens/c.eth"),
            wrapper,
        ]);
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&test_uri("ens/a.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Wrapper(ref u, _) if *u == test_uri("ens/c.eth")));
        assert_eq!(
            ctx.resolution_path(),
            vec![test_uri("ens/a.eth"), test_uri("ens/b.eth"), test_uri("ens/c.eth")]
        );
        // One aggregator step per URI entered.
        assert_eq!(ctx.get_history().len(), 3);
    }

    #[tokio::test]
    async fn test_unresolved_target_ends_as_uri() {
        let resolver = recursive(vec![redirect("ens/a.eth", "ens/b.eth")]);
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&test_uri("ens/a.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(u) if u == test_uri("ens/b.eth")));
    }

    #[tokio::test]
    async fn test_redirect_cycle_is_infinite_loop() {
        let resolver = recursive(vec![
            redirect("ens/a.eth", "ens/b.eth"),
            redirect("ens/b.eth", "ens/a.eth"),
        ]);
        let mut ctx = ResolutionContext::new();

        let err = resolver
            .try_resolve(&test_uri("ens/a.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, WrapError::InfiniteLoop { uri } if uri == test_uri("ens/a.eth")));
    }

    #[tokio::test]
    async fn test_self_redirect_is_returned_as_is() {
        let resolver = recursive(vec![redirect("ens/a.eth", "ens/a.eth")]);
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&test_uri("ens/a.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(u) if u == test_uri("ens/a.eth")));
    }

    /// Redirects `ens/<n>` to `ens/<n - 1>`, down to `ens/0`.
    #[derive(Debug)]
    struct Countdown;

    #[async_trait]
    impl UriResolver for Countdown {
        fn description(&self) -> String {
            "Countdown".to_string()
        }

        async fn try_resolve(
            &self,
            uri: &Uri,
            _client: &dyn Client,
            _context: &mut ResolutionContext,
        ) -> WrapResult<ResolutionResult> {
            match uri.path().parse::<u32>() {
                Ok(n) if n > 0 => Ok(ResolutionResult::Uri(
                    Uri::from_parts("ens", &n.saturating_sub(1).to_string())?,
                )),
                _ => Ok(ResolutionResult::NotFound),
            }
        }
    }

    #[tokio::test]
    async fn test_long_redirect_chain_is_followed() {
        let resolver = RecursiveResolver::new(Arc::new(Countdown));
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&Uri::from_parts("ens", "5000").unwrap(), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(ref u) if u.path() == "0"));
        assert_eq!(ctx.resolution_path().len(), 5001);
    }

    #[tokio::test]
    async fn test_not_found_records_history() {
        let resolver = recursive(Vec::new());
        let mut ctx = ResolutionContext::new();

        let result = resolver
            .try_resolve(&test_uri("ens/a.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(result.is_not_found());
        assert_eq!(ctx.get_history().len(), 1);
    }
}
