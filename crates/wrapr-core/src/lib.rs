//! Wrapr Core - shared types for the wrapr wrapper client.
//!
//! This crate provides:
//! - [`Uri`], the normalized address of a wrapper package
//! - [`ResolutionContext`] and [`ResolutionStep`], the per-call record of a
//!   resolution with cycle detection
//! - The capability traits every other crate plugs into: [`UriResolver`],
//!   [`WrapPackage`], [`Wrapper`], [`Invoker`] and [`Client`]
//! - [`WrapError`], the error taxonomy for parsing, resolution and invocation
//!
//! # Example
//!
//! ```rust
//! use wrapr_core::{ResolutionContext, Uri};
//!
//! # fn main() -> wrapr_core::WrapResult<()> {
//! let uri = Uri::parse("ens/wraps.eth:ethereum@1.0.0")?;
//! assert_eq!(uri.to_string(), "wrap://ens/wraps.eth:ethereum@1.0.0");
//!
//! let mut ctx = ResolutionContext::new();
//! ctx.start_resolution(&uri)?;
//! assert!(ctx.start_resolution(&uri).is_err());
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

pub mod client;
pub mod context;
pub mod error;
pub mod manifest;
pub mod resolution;
pub mod resolver;
pub mod uri;
pub mod wrapper;

pub use client::{Client, Invoker};
pub use context::{ResolutionContext, ResolutionStep, format_history};
pub use error::{WrapError, WrapResult};
pub use manifest::{MANIFEST_VERSION, WrapManifest, WrapperType};
pub use resolution::{Resolution, ResolutionResult};
pub use resolver::UriResolver;
pub use uri::{Uri, WRAP_SCHEME};
pub use wrapper::{Env, FileContent, GetFileOptions, InvokeOptions, WrapPackage, Wrapper};
