//! Wrapr Resolvers - the resolvers a wrapr client chains together.
//!
//! This crate provides:
//! - Leaf resolvers: [`RedirectResolver`], [`PluginResolver`],
//!   [`PackageResolver`], [`WrapperResolver`] and
//!   [`InterfaceImplementationResolver`]
//! - Composition: [`ResolverSet`] with [`aggregate`], used by
//!   [`UriResolverAggregator`] and [`ExtendableUriResolver`]
//! - [`RecursiveResolver`], which follows redirects with cycle detection
//! - [`StandardResolver`], a closed enum over all of the above
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wrapr_core::{Uri, UriResolver};
//! use wrapr_resolvers::{RecursiveResolver, RedirectResolver, UriResolverAggregator};
//!
//! # fn main() -> wrapr_core::WrapResult<()> {
//! let redirect: Arc<dyn UriResolver> = Arc::new(RedirectResolver::new(
//!     Uri::parse("ens/old.eth")?,
//!     Uri::parse("ens/new.eth")?,
//! ));
//! let chain = RecursiveResolver::new(Arc::new(UriResolverAggregator::new(vec![redirect])));
//! assert!(chain.description().starts_with("RecursiveResolver"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod aggregator;
pub mod extendable;
pub mod interface;
pub mod plugin;
pub mod recursive;
pub mod redirect;
pub mod standard;
pub mod static_resolvers;

pub use aggregator::{ResolverSet, UriResolverAggregator, aggregate, resolve_in_order};
pub use extendable::{
    ExtendableUriResolver, TRY_RESOLVE_URI_METHOD, UriResolverWrapper,
    default_extension_interface,
};
pub use interface::InterfaceImplementationResolver;
pub use plugin::PluginResolver;
pub use recursive::RecursiveResolver;
pub use redirect::RedirectResolver;
pub use standard::StandardResolver;
pub use static_resolvers::{PackageResolver, WrapperResolver};
