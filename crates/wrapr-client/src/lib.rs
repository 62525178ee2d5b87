//! Wrapr Client - resolve wrap URIs and invoke the wrappers they name.
//!
//! [`WrapClient`] wraps an immutable [`ClientConfig`](wrapr_config::ClientConfig).
//! Every call runs the configured resolvers in order behind a
//! [`RecursiveResolver`](wrapr_resolvers::RecursiveResolver), so redirects
//! are followed and cycles fail with
//! [`InfiniteLoop`](wrapr_core::WrapError::InfiniteLoop).
//!
//! # Example
//!
//! ```rust
//! use wrapr_client::WrapClient;
//! use wrapr_config::ClientConfigBuilder;
//! use wrapr_core::Uri;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ClientConfigBuilder::new();
//! builder.add_redirect(Uri::parse("ens/old.eth")?, Uri::parse("ens/new.eth")?)?;
//! let client = WrapClient::new(builder.build());
//!
//! let resolution = client.resolve_uri(&Uri::parse("ens/old.eth")?).await?;
//! assert_eq!(resolution.result.uri(), Some(&Uri::parse("ens/new.eth")?));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod client;

pub use client::WrapClient;
