//! Ordered resolver lists.
//!
//! A [`ResolverSet`] supplies a list of resolvers for a URI; [`aggregate`]
//! asks them in order and returns the first answer that is not `NotFound`.
//! The set records a single step whose `sub_history` holds the steps of the
//! resolvers it consulted, so nested aggregation shows up as a tree.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use wrapr_core::{
    Client, ResolutionContext, ResolutionResult, ResolutionStep, Uri, UriResolver, WrapResult,
};

/// A named, ordered source of resolvers.
///
/// Implement [`get_uri_resolvers`](Self::get_uri_resolvers) to decide which
/// resolvers to consult for a given URI, then delegate
/// [`UriResolver::try_resolve`] to [`aggregate`].
#[async_trait]
pub trait ResolverSet: Send + Sync {
    /// Name recorded as the description of the aggregate step.
    fn name(&self) -> String;

    /// The resolvers to consult for `uri`, highest priority first.
    async fn get_uri_resolvers(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<Vec<Arc<dyn UriResolver>>>;
}

/// Ask `resolvers` in order and return the first answer that is not
/// `NotFound`. Errors propagate immediately and stop the search.
///
/// # Errors
///
/// Returns the first error raised by any resolver.
pub async fn resolve_in_order(
    resolvers: &[Arc<dyn UriResolver>],
    uri: &Uri,
    client: &dyn Client,
    context: &mut ResolutionContext,
) -> WrapResult<ResolutionResult> {
    for resolver in resolvers {
        let result = resolver.try_resolve(uri, client, context).await?;
        if !result.is_not_found() {
            debug!(
                uri = %uri,
                resolver = %resolver.description(),
                result = result.kind(),
                "Resolver answered"
            );
            return Ok(result);
        }
    }
    Ok(ResolutionResult::NotFound)
}

/// Run a [`ResolverSet`] for `uri`, recording one step with the nested
/// resolvers' steps as its `sub_history`.
///
/// # Errors
///
/// Returns the error from listing resolvers or from the first failing
/// resolver. The step is recorded either way.
pub async fn aggregate<S>(
    set: &S,
    uri: &Uri,
    client: &dyn Client,
    context: &mut ResolutionContext,
) -> WrapResult<ResolutionResult>
where
    S: ResolverSet + ?Sized,
{
    let resolvers = match set.get_uri_resolvers(uri, client, context).await {
        Ok(resolvers) => resolvers,
        Err(err) => {
            context.track_step(ResolutionStep::failed(uri.clone(), set.name(), &err));
            return Err(err);
        },
    };

    let mut sub_context = context.create_sub_history_context();
    let outcome = resolve_in_order(&resolvers, uri, client, &mut sub_context).await;
    let step = match &outcome {
        Ok(result) => ResolutionStep::new(uri.clone(), set.name(), result.clone()),
        Err(err) => ResolutionStep::failed(uri.clone(), set.name(), err),
    };
    context.track_step(step.with_sub_history(sub_context.into_history()));
    outcome
}

/// A fixed list of resolvers tried in order.
#[derive(Debug, Clone, Default)]
pub struct UriResolverAggregator {
    resolvers: Vec<Arc<dyn UriResolver>>,
    name: Option<String>,
}

impl UriResolverAggregator {
    /// Aggregate `resolvers`, highest priority first.
    #[must_use]
    pub fn new(resolvers: Vec<Arc<dyn UriResolver>>) -> Self {
        Self {
            resolvers,
            name: None,
        }
    }

    /// Override the name recorded in resolution histories.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The aggregated resolvers.
    #[must_use]
    pub fn resolvers(&self) -> &[Arc<dyn UriResolver>] {
        &self.resolvers
    }
}

#[async_trait]
impl ResolverSet for UriResolverAggregator {
    fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| "UriResolverAggregator".to_string())
    }

    async fn get_uri_resolvers(
        &self,
        _uri: &Uri,
        _client: &dyn Client,
        _context: &mut ResolutionContext,
    ) -> WrapResult<Vec<Arc<dyn UriResolver>>> {
        Ok(self.resolvers.clone())
    }
}

#[async_trait]
impl UriResolver for UriResolverAggregator {
    fn description(&self) -> String {
        self.name()
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        aggregate(self, uri, client, context).await
    }
}
