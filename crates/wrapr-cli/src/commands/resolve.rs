//! `wrapr resolve`.

use std::path::Path;

use anyhow::Result;
use tracing::info;
use wrapr_client::WrapClient;
use wrapr_core::Uri;

use crate::formatter::{self, OutputFormat};

/// Resolve `uri` against the config at `config_path` and print the outcome.
///
/// Returns `false` when resolution failed. The failure has already been
/// printed, so callers only set the exit status.
pub(crate) async fn run_resolve(
    uri: &str,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<bool> {
    let uri = Uri::parse(uri)?;
    let client = WrapClient::new(super::load_config(config_path)?);

    match client.resolve_uri(&uri).await {
        Ok(resolution) => {
            info!(uri = %uri, result = %resolution.result, steps = resolution.history.len(), "Resolved");
            formatter::print_resolution(&resolution, format);
            Ok(true)
        },
        Err(err) => {
            formatter::print_failure(&err, format);
            Ok(false)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("wrapr.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_resolved_uri_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[[redirects]]
from = "wrap://ens/old.eth"
to = "wrap://ens/new.eth"
"#,
        );

        let resolved = run_resolve("ens/old.eth", Some(&path), OutputFormat::Json)
            .await
            .unwrap();
        assert!(resolved);
    }

    #[tokio::test]
    async fn test_failed_resolution_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[[redirects]]
from = "wrap://ens/a.eth"
to = "wrap://ens/b.eth"

[[redirects]]
from = "wrap://ens/b.eth"
to = "wrap://ens/a.eth"
"#,
        );

        // Printed by the command itself; no error is left for `main` to print.
        let resolved = run_resolve("ens/a.eth", Some(&path), OutputFormat::Json)
            .await
            .unwrap();
        assert!(!resolved);
    }

    #[tokio::test]
    async fn test_bad_uri_is_an_error() {
        assert!(run_resolve("", None, OutputFormat::Json).await.is_err());
    }
}
