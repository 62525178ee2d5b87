//! Wrapr Plugin - in-process wrappers.
//!
//! A plugin is a wrapper whose implementation lives in the host process.
//! Each [`PluginModule`] lists its methods explicitly, so an unknown method
//! fails with a typed [`MethodNotFound`](wrapr_core::WrapError::MethodNotFound)
//! error instead of a name lookup at call time.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod module;
pub mod package;

pub use module::{MethodFn, MethodTable, PluginModule};
pub use package::{PluginPackage, PluginWrapper};
