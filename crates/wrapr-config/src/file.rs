//! TOML configuration files.
//!
//! ```toml
//! wrappers = ["wrap://ens/a.eth"]
//!
//! [envs."wrap://ens/a.eth"]
//! network = "mainnet"
//!
//! [interfaces]
//! "wrap://ens/iface.eth" = ["wrap://ens/impl-1.eth", "wrap://ens/impl-2.eth"]
//!
//! [[redirects]]
//! from = "wrap://ens/old.eth"
//! to = "wrap://ens/new.eth"
//! ```
//!
//! URIs are kept as strings here and parsed when the file is applied to a
//! [`ClientConfigBuilder`](crate::ClientConfigBuilder).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::debug;

use wrapr_core::Env;

use crate::error::{ConfigError, ConfigResult};

/// Largest config file accepted, in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// One `[[redirects]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectEntry {
    /// The URI to redirect.
    pub from: String,
    /// Where it redirects to.
    pub to: String,
}

/// The on-disk shape of a client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Wrapper URIs to register.
    pub wrappers: Vec<String>,
    /// Environments keyed by URI. Each value must be a table.
    pub envs: BTreeMap<String, toml::Value>,
    /// Interface URI to implementation URIs.
    pub interfaces: BTreeMap<String, Vec<String>>,
    /// Single-URI redirects, applied in file order.
    pub redirects: Vec<RedirectEntry>,
}

impl ConfigFile {
    /// Parse a config document. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the TOML is malformed or has
    /// unknown keys.
    pub fn parse(content: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_owned(),
            source: e,
        })
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// [`ConfigError::InvalidArgument`] if it exceeds
    /// [`MAX_CONFIG_FILE_SIZE`], or [`ConfigError::ParseError`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
        if size > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::InvalidArgument(format!(
                "config file {} is {size} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                path.display()
            )));
        }

        debug!(path = %path.display(), bytes = size, "Parsing config file");
        Self::parse(&content, &path.display().to_string())
    }
}

/// Convert an `[envs."uri"]` entry to an [`Env`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidArgument`] if `value` is not a table or
/// holds a float that JSON cannot represent.
pub fn env_from_toml(uri: &str, value: &toml::Value) -> ConfigResult<Env> {
    let toml::Value::Table(table) = value else {
        return Err(ConfigError::InvalidArgument(format!(
            "env for {uri} must be a table, got {}",
            value.type_str()
        )));
    };
    table
        .iter()
        .map(|(key, value)| Ok((key.clone(), toml_to_json(value)?)))
        .collect()
}

fn toml_to_json(value: &toml::Value) -> ConfigResult<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number((*i).into()),
        toml::Value::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
            ConfigError::InvalidArgument(format!("{f} cannot be represented in an env"))
        })?,
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.iter().map(toml_to_json).collect::<ConfigResult<_>>()?)
        },
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| Ok((k.clone(), toml_to_json(v)?)))
                .collect::<ConfigResult<_>>()?,
        ),
    })
}
