//! Accumulates configuration before a [`ClientConfig`] is produced.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use wrapr_core::{Env, Uri, UriResolver, WrapPackage};
use wrapr_plugin::PluginPackage;
use wrapr_resolvers::{PackageResolver, PluginResolver, RedirectResolver, StandardResolver};

use crate::config::ClientConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::file::{ConfigFile, env_from_toml};

/// Mutable draft of a [`ClientConfig`].
///
/// Operations that cannot fail return `&mut Self`; the rest return
/// `ConfigResult<&mut Self>` so chains use `?`:
///
/// ```rust
/// use wrapr_config::ClientConfigBuilder;
/// use wrapr_core::Uri;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut builder = ClientConfigBuilder::new();
/// builder
///     .add_wrapper(Uri::parse("ens/a.eth")?)
///     .add_redirect(Uri::parse("ens/old.eth")?, Uri::parse("ens/a.eth")?)?;
/// let config = builder.build();
/// assert_eq!(config.resolvers().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    envs: HashMap<Uri, Env>,
    interfaces: HashMap<Uri, Vec<Uri>>,
    resolvers: Option<Vec<Arc<dyn UriResolver>>>,
    wrappers: Vec<Uri>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfigBuilder {
    /// An empty draft with an initialized, empty resolver list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            envs: HashMap::new(),
            interfaces: HashMap::new(),
            resolvers: Some(Vec::new()),
            wrappers: Vec::new(),
        }
    }

    /// Replace the environment for `uri` wholesale.
    pub fn set_env(&mut self, uri: Uri, env: Env) -> &mut Self {
        self.envs.insert(uri, env);
        self
    }

    /// Shallow-merge `env` into the environment for `uri`. Keys in `env`
    /// overwrite existing keys of the same name.
    pub fn add_env(&mut self, uri: Uri, env: Env) -> &mut Self {
        self.envs.entry(uri).or_default().extend(env);
        self
    }

    /// [`add_env`](Self::add_env) for each pair, in order.
    pub fn add_envs(&mut self, envs: impl IntoIterator<Item = (Uri, Env)>) -> &mut Self {
        for (uri, env) in envs {
            self.add_env(uri, env);
        }
        self
    }

    /// Environments accumulated so far.
    #[must_use]
    pub fn get_envs(&self) -> &HashMap<Uri, Env> {
        &self.envs
    }

    /// Append implementations of `interface`, creating the entry if needed.
    /// Order is kept and duplicates are not removed.
    pub fn add_interface_implementations(
        &mut self,
        interface: Uri,
        implementations: impl IntoIterator<Item = Uri>,
    ) -> &mut Self {
        self.interfaces
            .entry(interface)
            .or_default()
            .extend(implementations);
        self
    }

    /// Interface bindings accumulated so far.
    #[must_use]
    pub fn get_interfaces(&self) -> &HashMap<Uri, Vec<Uri>> {
        &self.interfaces
    }

    /// Register a wrapper URI.
    pub fn add_wrapper(&mut self, uri: Uri) -> &mut Self {
        self.wrappers.push(uri);
        self
    }

    /// Register several wrapper URIs, in order.
    pub fn add_wrappers(&mut self, uris: impl IntoIterator<Item = Uri>) -> &mut Self {
        self.wrappers.extend(uris);
        self
    }

    /// Remove the first registration of `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrapperNotFound`] if `uri` is not registered.
    pub fn remove_wrapper(&mut self, uri: &Uri) -> ConfigResult<&mut Self> {
        let index = self
            .wrappers
            .iter()
            .position(|w| w == uri)
            .ok_or_else(|| ConfigError::WrapperNotFound { uri: uri.clone() })?;
        self.wrappers.remove(index);
        Ok(self)
    }

    /// Replace the whole resolver chain with `resolver`.
    pub fn set_resolver(&mut self, resolver: Arc<dyn UriResolver>) -> &mut Self {
        self.resolvers = Some(vec![resolver]);
        self
    }

    /// Append `resolver` to the chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IllegalState`] if the resolver list is not
    /// initialized.
    pub fn add_resolver(&mut self, resolver: Arc<dyn UriResolver>) -> ConfigResult<&mut Self> {
        self.resolver_list()?.push(resolver);
        Ok(self)
    }

    /// Append several resolvers, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IllegalState`] if the resolver list is not
    /// initialized.
    pub fn add_resolvers(
        &mut self,
        resolvers: impl IntoIterator<Item = Arc<dyn UriResolver>>,
    ) -> ConfigResult<&mut Self> {
        self.resolver_list()?.extend(resolvers);
        Ok(self)
    }

    /// Append a [`RedirectResolver`] from `from` to `to`.
    ///
    /// # Errors
    ///
    /// See [`add_resolver`](Self::add_resolver).
    pub fn add_redirect(&mut self, from: Uri, to: Uri) -> ConfigResult<&mut Self> {
        self.add_standard(RedirectResolver::new(from, to).into())
    }

    /// Append a resolver that serves `package` for `uri`.
    ///
    /// # Errors
    ///
    /// See [`add_resolver`](Self::add_resolver).
    pub fn add_package(
        &mut self,
        uri: Uri,
        package: Arc<dyn WrapPackage>,
    ) -> ConfigResult<&mut Self> {
        self.add_standard(PackageResolver::new(uri, package).into())
    }

    /// Append a resolver that serves the in-process `plugin` for `uri`.
    ///
    /// # Errors
    ///
    /// See [`add_resolver`](Self::add_resolver).
    pub fn add_plugin(&mut self, uri: Uri, plugin: PluginPackage) -> ConfigResult<&mut Self> {
        self.add_standard(PluginResolver::new().with_plugin(uri, plugin).into())
    }

    /// Resolvers accumulated so far, or `None` if the list is not initialized.
    #[must_use]
    pub fn get_resolvers(&self) -> Option<&[Arc<dyn UriResolver>]> {
        self.resolvers.as_deref()
    }

    /// Apply a parsed [`ConfigFile`] through the normal builder operations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUri`] for any unparseable URI and
    /// [`ConfigError::InvalidArgument`] for a non-table env entry. Nothing
    /// is applied if any entry is invalid.
    pub fn apply_file(&mut self, file: &ConfigFile) -> ConfigResult<&mut Self> {
        let wrappers = file
            .wrappers
            .iter()
            .map(|w| Uri::parse(w))
            .collect::<Result<Vec<_>, _>>()?;

        let envs = file
            .envs
            .iter()
            .map(|(uri, value)| Ok((Uri::parse(uri)?, env_from_toml(uri, value)?)))
            .collect::<ConfigResult<Vec<_>>>()?;

        let interfaces = file
            .interfaces
            .iter()
            .map(|(interface, implementations)| {
                let implementations = implementations
                    .iter()
                    .map(|i| Uri::parse(i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((Uri::parse(interface)?, implementations))
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let redirects = file
            .redirects
            .iter()
            .map(|r| Ok((Uri::parse(&r.from)?, Uri::parse(&r.to)?)))
            .collect::<ConfigResult<Vec<_>>>()?;

        // Fail before touching any state if the resolver list is unusable.
        self.resolver_list()?;

        self.add_wrappers(wrappers).add_envs(envs);
        for (interface, implementations) in interfaces {
            self.add_interface_implementations(interface, implementations);
        }
        for (from, to) in redirects {
            self.add_redirect(from, to)?;
        }
        debug!(
            wrappers = file.wrappers.len(),
            envs = file.envs.len(),
            interfaces = file.interfaces.len(),
            redirects = file.redirects.len(),
            "Applied config file"
        );
        Ok(self)
    }

    /// Load a TOML config file and [`apply_file`](Self::apply_file) it.
    ///
    /// # Errors
    ///
    /// Returns any error from [`ConfigFile::load`] or
    /// [`apply_file`](Self::apply_file).
    pub fn load_file(&mut self, path: &Path) -> ConfigResult<&mut Self> {
        let file = ConfigFile::load(path)?;
        self.apply_file(&file)?;
        info!(path = %path.display(), "Loaded client config");
        Ok(self)
    }

    /// Snapshot the draft into an immutable [`ClientConfig`].
    ///
    /// The builder stays usable; later changes do not affect the returned
    /// config. No validation is performed.
    #[must_use]
    pub fn build(&self) -> ClientConfig {
        ClientConfig {
            envs: self.envs.clone(),
            interfaces: self.interfaces.clone(),
            resolvers: self.resolvers.clone().unwrap_or_default(),
            wrappers: self.wrappers.clone(),
        }
    }

    fn add_standard(&mut self, resolver: StandardResolver) -> ConfigResult<&mut Self> {
        self.add_resolver(Arc::new(resolver))
    }

    fn resolver_list(&mut self) -> ConfigResult<&mut Vec<Arc<dyn UriResolver>>> {
        self.resolvers
            .as_mut()
            .ok_or_else(|| ConfigError::IllegalState("resolver list is not initialized".into()))
    }
}
