//! Closed set of the resolvers this crate ships.

use async_trait::async_trait;

use wrapr_core::{Client, ResolutionContext, ResolutionResult, Uri, UriResolver, WrapResult};

use crate::aggregator::UriResolverAggregator;
use crate::extendable::ExtendableUriResolver;
use crate::interface::InterfaceImplementationResolver;
use crate::plugin::PluginResolver;
use crate::recursive::RecursiveResolver;
use crate::redirect::RedirectResolver;
use crate::static_resolvers::{PackageResolver, WrapperResolver};

/// Any of the built-in resolvers.
///
/// Dispatch is an exhaustive `match`; adding a variant forces every
/// consumer to handle it. Custom resolvers still plug in as
/// `Arc<dyn UriResolver>`.
#[derive(Debug, Clone)]
pub enum StandardResolver {
    /// See [`RedirectResolver`].
    Redirect(RedirectResolver),
    /// See [`PluginResolver`].
    Plugin(PluginResolver),
    /// See [`PackageResolver`].
    Package(PackageResolver),
    /// See [`WrapperResolver`].
    Wrapper(WrapperResolver),
    /// See [`InterfaceImplementationResolver`].
    InterfaceImplementation(InterfaceImplementationResolver),
    /// See [`UriResolverAggregator`].
    Aggregator(UriResolverAggregator),
    /// See [`ExtendableUriResolver`].
    Extendable(ExtendableUriResolver),
    /// See [`RecursiveResolver`].
    Recursive(RecursiveResolver),
}

impl StandardResolver {
    /// Short variant name, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Redirect(_) => "redirect",
            Self::Plugin(_) => "plugin",
            Self::Package(_) => "package",
            Self::Wrapper(_) => "wrapper",
            Self::InterfaceImplementation(_) => "interface",
            Self::Aggregator(_) => "aggregator",
            Self::Extendable(_) => "extendable",
            Self::Recursive(_) => "recursive",
        }
    }
}

macro_rules! impl_from_resolver {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for StandardResolver {
                fn from(resolver: $ty) -> Self {
                    Self::$variant(resolver)
                }
            }
        )*
    };
}

impl_from_resolver!(
    Redirect(RedirectResolver),
    Plugin(PluginResolver),
    Package(PackageResolver),
    Wrapper(WrapperResolver),
    InterfaceImplementation(InterfaceImplementationResolver),
    Aggregator(UriResolverAggregator),
    Extendable(ExtendableUriResolver),
    Recursive(RecursiveResolver),
);

#[async_trait]
impl UriResolver for StandardResolver {
    fn description(&self) -> String {
        match self {
            Self::Redirect(r) => r.description(),
            Self::Plugin(r) => r.description(),
            Self::Package(r) => r.description(),
            Self::Wrapper(r) => r.description(),
            Self::InterfaceImplementation(r) => r.description(),
            Self::Aggregator(r) => r.description(),
            Self::Extendable(r) => r.description(),
            Self::Recursive(r) => r.description(),
        }
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        match self {
            Self::Redirect(r) => r.try_resolve(uri, client, context).await,
            Self::Plugin(r) => r.try_resolve(uri, client, context).await,
            Self::Package(r) => r.try_resolve(uri, client, context).await,
            Self::Wrapper(r) => r.try_resolve(uri, client, context).await,
            Self::InterfaceImplementation(r) => r.try_resolve(uri, client, context).await,
            Self::Aggregator(r) => r.try_resolve(uri, client, context).await,
            Self::Extendable(r) => r.try_resolve(uri, client, context).await,
            Self::Recursive(r) => r.try_resolve(uri, client, context).await,
        }
    }
}
