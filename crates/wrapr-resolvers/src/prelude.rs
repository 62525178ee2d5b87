//! Prelude module - commonly used types for convenient import.
//!
//! Use `use wrapr_resolvers::prelude::*;` to import all essential types.

// Leaf resolvers
pub use crate::{
    InterfaceImplementationResolver, PackageResolver, PluginResolver, RedirectResolver,
    WrapperResolver,
};

// Composition
pub use crate::{
    ExtendableUriResolver, RecursiveResolver, ResolverSet, StandardResolver,
    UriResolverAggregator, UriResolverWrapper,
};
