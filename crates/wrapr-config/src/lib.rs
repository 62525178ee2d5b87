//! Client configuration for wrapr.
//!
//! [`ClientConfigBuilder`] accumulates environments, interface
//! implementations, registered wrappers and the resolver chain, then
//! [`build`](ClientConfigBuilder::build)s an immutable [`ClientConfig`].
//! The same builder operations back the TOML loader in [`file`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use wrapr_config::{ClientConfigBuilder, ConfigResult};
//!
//! # fn main() -> ConfigResult<()> {
//! let mut builder = ClientConfigBuilder::new();
//! builder.load_file(std::path::Path::new("wrapr.toml"))?;
//! let config = builder.build();
//! println!("{} resolvers", config.resolvers().len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

/// Configuration builder.
pub mod builder;
/// The immutable configuration.
pub mod config;
/// Configuration error types.
pub mod error;
/// TOML configuration files.
pub mod file;

pub use builder::ClientConfigBuilder;
pub use config::ClientConfig;
pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, MAX_CONFIG_FILE_SIZE, RedirectEntry};
