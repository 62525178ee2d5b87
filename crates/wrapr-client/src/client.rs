//! [`WrapClient`], the concrete [`Client`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use wrapr_config::ClientConfig;
use wrapr_core::{
    Client, Env, FileContent, GetFileOptions, InvokeOptions, Invoker, Resolution,
    ResolutionContext, ResolutionResult, Uri, UriResolver, WrapError, WrapManifest, WrapResult,
    Wrapper,
};
use wrapr_resolvers::{RecursiveResolver, resolve_in_order};

/// The configured resolver list, tried in order.
///
/// Unlike [`UriResolverAggregator`](wrapr_resolvers::UriResolverAggregator)
/// it records no step of its own, so a history holds exactly the steps of
/// the configured resolvers.
#[derive(Debug)]
struct ResolverChain {
    resolvers: Vec<Arc<dyn UriResolver>>,
}

#[async_trait]
impl UriResolver for ResolverChain {
    fn description(&self) -> String {
        "ResolverChain".to_string()
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        resolve_in_order(&self.resolvers, uri, client, context).await
    }
}

/// Resolves wrap URIs through a [`ClientConfig`]'s resolver chain and
/// invokes the wrappers they resolve to.
///
/// Cloning is cheap; clones share the configuration. Each top-level call
/// gets a fresh [`ResolutionContext`], so concurrent calls never share
/// history or visited state.
#[derive(Debug, Clone)]
pub struct WrapClient {
    config: Arc<ClientConfig>,
    resolver: Arc<RecursiveResolver>,
}

impl WrapClient {
    /// Create a client bound to `config`.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let chain = ResolverChain {
            resolvers: config.resolvers().to_vec(),
        };
        info!(
            resolvers = chain.resolvers.len(),
            wrappers = config.wrappers().len(),
            interfaces = config.interfaces().len(),
            "Client created"
        );
        Self {
            config: Arc::new(config),
            resolver: Arc::new(RecursiveResolver::new(Arc::new(chain))),
        }
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The resolver chain every call runs: the configured resolvers in
    /// order, with redirects followed.
    #[must_use]
    pub fn get_uri_resolver(&self) -> Arc<dyn UriResolver> {
        self.resolver.clone()
    }

    /// Registered wrapper URIs.
    #[must_use]
    pub fn get_wrappers(&self) -> &[Uri] {
        self.config.wrappers()
    }

    /// Resolve `uri` in a fresh context and return the terminal result with
    /// its history. `NotFound` is a successful outcome here.
    ///
    /// # Errors
    ///
    /// Returns [`WrapError::Resolution`] wrapping the first hard error
    /// (for example [`WrapError::InfiniteLoop`]) together with the history
    /// recorded up to it.
    pub async fn resolve_uri(&self, uri: &Uri) -> WrapResult<Resolution> {
        let mut context = ResolutionContext::new();
        let result = self.resolve_top_level(uri, &mut context).await?;
        Ok(Resolution {
            uri: uri.clone(),
            result,
            history: context.into_history(),
        })
    }

    async fn resolve_top_level(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        self.try_resolve_uri(uri, context)
            .await
            .map_err(|source| WrapError::Resolution {
                uri: uri.clone(),
                history: context.get_history().to_vec(),
                source: Box::new(source),
            })
    }

    /// Resolve and materialize `uri` in a fresh context. Returns the URI the
    /// wrapper was found under along with the wrapper.
    async fn load_top_level(&self, uri: &Uri) -> WrapResult<(Uri, Arc<dyn Wrapper>)> {
        let mut context = ResolutionContext::new();
        let result = self.resolve_top_level(uri, &mut context).await?;
        let resolved = result.uri().cloned().unwrap_or_else(|| uri.clone());
        let wrapper = materialize(uri, result, &context).await?;
        Ok((resolved, wrapper))
    }

    /// Environment for the resolved URI, falling back to the requested one.
    fn env_for(&self, requested: &Uri, resolved: &Uri) -> Option<Env> {
        self.get_env_by_uri(resolved)
            .or_else(|| self.get_env_by_uri(requested))
            .cloned()
    }
}

async fn materialize(
    uri: &Uri,
    result: ResolutionResult,
    context: &ResolutionContext,
) -> WrapResult<Arc<dyn Wrapper>> {
    match result {
        ResolutionResult::Wrapper(_, wrapper) => Ok(wrapper),
        ResolutionResult::Package(_, package) => package.create_wrapper().await,
        ResolutionResult::Uri(_) | ResolutionResult::NotFound => Err(WrapError::UriNotFound {
            uri: uri.clone(),
            history: context.get_history().to_vec(),
        }),
    }
}

#[async_trait]
impl Invoker for WrapClient {
    async fn invoke(&self, uri: &Uri, method: &str, args: Value) -> WrapResult<Value> {
        let (resolved, wrapper) = self.load_top_level(uri).await?;
        let options =
            InvokeOptions::new(uri.clone(), method, args).with_env(self.env_for(uri, &resolved));
        debug!(uri = %uri, resolved = %resolved, method, "Invoking wrapper");
        wrapper.invoke(&options, self).await
    }
}

#[async_trait]
impl Client for WrapClient {
    fn get_interfaces(&self) -> &HashMap<Uri, Vec<Uri>> {
        self.config.interfaces()
    }

    fn get_envs(&self) -> &HashMap<Uri, Env> {
        self.config.envs()
    }

    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        debug!(uri = %uri, "Resolving");
        let result = self.resolver.try_resolve(uri, self, context).await?;
        debug!(uri = %uri, result = %result, steps = context.get_history().len(), "Resolved");
        Ok(result)
    }

    async fn load_wrapper(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<Arc<dyn Wrapper>> {
        let result = self.try_resolve_uri(uri, context).await?;
        materialize(uri, result, context).await
    }

    async fn get_manifest(&self, uri: &Uri) -> WrapResult<WrapManifest> {
        let (_, wrapper) = self.load_top_level(uri).await?;
        Ok(wrapper.manifest().clone())
    }

    async fn get_file(&self, uri: &Uri, options: &GetFileOptions) -> WrapResult<FileContent> {
        let (_, wrapper) = self.load_top_level(uri).await?;
        options.decode(wrapper.get_file(&options.path).await?)
    }
}
