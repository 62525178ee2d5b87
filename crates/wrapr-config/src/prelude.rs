//! Prelude module - commonly used types for convenient import.
//!
//! Use `use wrapr_config::prelude::*;` to import all essential types.

pub use crate::{ClientConfig, ClientConfigBuilder, ConfigError, ConfigFile, ConfigResult};
