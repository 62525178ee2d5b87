//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod resolve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use wrapr_config::{ClientConfig, ClientConfigBuilder};
use wrapr_resolvers::{ExtendableUriResolver, InterfaceImplementationResolver};

/// Config file picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "wrapr.toml";

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            fallback.is_file().then_some(fallback)
        },
    }
}

/// Build a client configuration from a config file.
///
/// The file's redirects come first, followed by interface substitution and
/// resolver extensions.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<ClientConfig> {
    let mut builder = ClientConfigBuilder::new();
    if let Some(path) = config_path(explicit) {
        builder
            .load_file(&path)
            .with_context(|| format!("loading {}", path.display()))?;
    } else {
        debug!("No config file, using an empty configuration");
    }
    builder
        .add_resolver(Arc::new(InterfaceImplementationResolver::new()))?
        .add_resolver(Arc::new(ExtendableUriResolver::new()))?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapr_core::UriResolver;

    const CONFIG: &str = r#"
wrappers = ["wrap://ens/a.eth"]

[envs."wrap://ens/a.eth"]
network = "mainnet"

[interfaces]
"wrap://ens/iface.eth" = ["wrap://ens/impl.eth"]

[[redirects]]
from = "wrap://ens/old.eth"
to = "wrap://ens/a.eth"
"#;

    #[test]
    fn test_load_config_appends_standard_resolvers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapr.toml");
        std::fs::write(&path, CONFIG).unwrap();

        let config = load_config(Some(&path)).unwrap();

        let descriptions: Vec<_> = config.resolvers().iter().map(|r| r.description()).collect();
        assert_eq!(
            descriptions,
            [
                "RedirectResolver (wrap://ens/old.eth - wrap://ens/a.eth)",
                "InterfaceImplementationResolver",
                "ExtendableUriResolver",
            ]
        );
        assert_eq!(config.wrappers().len(), 1);
        assert_eq!(config.envs().len(), 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
