//! Test fixtures for common types.

use std::sync::Once;

use serde_json::Value;
use wrapr_core::{Env, Uri, WrapManifest, WrapperType};

/// Parse a URI, panicking on invalid test input.
#[must_use]
pub fn test_uri(text: &str) -> Uri {
    match Uri::parse(text) {
        Ok(uri) => uri,
        Err(e) => panic!("invalid test uri {text:?}: {e}"),
    }
}

/// A wasm manifest named `name`.
#[must_use]
pub fn test_manifest(name: &str) -> WrapManifest {
    WrapManifest::new(name, WrapperType::Wasm)
}

/// Build an env from `(key, value)` pairs.
#[must_use]
pub fn test_env<const N: usize>(pairs: [(&str, Value); N]) -> Env {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

static LOGGING: Once = Once::new();

/// Install a test-writer tracing subscriber once per process.
///
/// Honours `RUST_LOG`; defaults to `warn`.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
