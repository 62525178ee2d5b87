//! Wrapr Test - Shared test utilities for the wrapr client.
//!
//! This crate provides mock implementations and fixtures that can be used
//! across multiple wrapr crates as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! wrapr-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use wrapr_test::{MockResolver, test_uri};
//! use wrapr_core::ResolutionResult;
//!
//! #[tokio::test]
//! async fn test_counts_calls() {
//!     let resolver = MockResolver::new("r1", ResolutionResult::NotFound);
//!     // ... hand it to an aggregator ...
//!     assert_eq!(resolver.calls(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
