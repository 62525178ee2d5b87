//! The immutable configuration a client is built from.

use std::collections::HashMap;
use std::sync::Arc;

use wrapr_core::{Env, Uri, UriResolver};

/// Everything a client needs: environments, interface bindings, registered
/// wrappers and the ordered resolver chain.
///
/// Produced by [`ClientConfigBuilder::build`](crate::ClientConfigBuilder::build)
/// and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub(crate) envs: HashMap<Uri, Env>,
    pub(crate) interfaces: HashMap<Uri, Vec<Uri>>,
    pub(crate) resolvers: Vec<Arc<dyn UriResolver>>,
    pub(crate) wrappers: Vec<Uri>,
}

impl ClientConfig {
    /// Environments keyed by the exact URI they apply to.
    #[must_use]
    pub fn envs(&self) -> &HashMap<Uri, Env> {
        &self.envs
    }

    /// Interface URI to implementation URIs, in priority order.
    #[must_use]
    pub fn interfaces(&self) -> &HashMap<Uri, Vec<Uri>> {
        &self.interfaces
    }

    /// The resolver chain, highest priority first.
    #[must_use]
    pub fn resolvers(&self) -> &[Arc<dyn UriResolver>] {
        &self.resolvers
    }

    /// Registered wrapper URIs, in registration order.
    #[must_use]
    pub fn wrappers(&self) -> &[Uri] {
        &self.wrappers
    }

    /// The environment for exactly `uri`, if one is set.
    #[must_use]
    pub fn env(&self, uri: &Uri) -> Option<&Env> {
        self.envs.get(uri)
    }
}
