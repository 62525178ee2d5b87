//! Output rendering for resolution results.

use clap::ValueEnum;
use serde_json::{Value, json};
use wrapr_core::{Resolution, ResolutionResult, ResolutionStep, WrapError, format_history};

use crate::theme::{self, Theme};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Colored, human-readable text.
    #[default]
    Pretty,
    /// A single JSON document on stdout.
    Json,
}

fn result_json(result: &ResolutionResult) -> Value {
    json!({
        "kind": result.kind(),
        "uri": result.uri().map(ToString::to_string),
    })
}

fn step_json(step: &ResolutionStep) -> Value {
    let mut value = json!({
        "source_uri": step.source_uri.to_string(),
        "description": step.description,
    });
    match &step.result {
        Ok(result) => value["result"] = result_json(result),
        Err(message) => value["error"] = json!(message),
    }
    if !step.sub_history.is_empty() {
        value["sub_history"] = history_json(&step.sub_history);
    }
    value
}

fn history_json(history: &[ResolutionStep]) -> Value {
    Value::Array(history.iter().map(step_json).collect())
}

/// JSON document for a finished resolution.
pub(crate) fn resolution_json(resolution: &Resolution) -> Value {
    json!({
        "uri": resolution.uri.to_string(),
        "result": result_json(&resolution.result),
        "history": history_json(&resolution.history),
    })
}

/// JSON document for a failed resolution.
pub(crate) fn failure_json(err: &WrapError) -> Value {
    json!({
        "error": err.to_string(),
        "cause": err.root_cause().to_string(),
        "history": history_json(err.history().unwrap_or_default()),
    })
}

fn print_history(history: &[ResolutionStep]) {
    println!("{}", Theme::header("History"));
    if history.is_empty() {
        println!("  {}", Theme::dimmed("(no steps)"));
    }
    for line in format_history(history) {
        println!("  {line}");
    }
}

/// Print a finished resolution.
pub(crate) fn print_resolution(resolution: &Resolution, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", resolution_json(resolution)),
        OutputFormat::Pretty => {
            println!("{}", Theme::kv("Resolving", &resolution.uri.to_string()));
            println!("{}", Theme::separator());
            let outcome = theme::outcome(&resolution.result);
            if resolution.result.is_terminal() {
                println!("{}", Theme::success(&outcome));
            } else {
                println!("{}", Theme::warning(&outcome));
            }
            println!();
            print_history(&resolution.history);
        },
    }
}

/// Print a failed resolution.
pub(crate) fn print_failure(err: &WrapError, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", failure_json(err)),
        OutputFormat::Pretty => {
            eprintln!("{}", Theme::error(&err.root_cause().to_string()));
            if let Some(history) = err.history() {
                println!();
                print_history(history);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapr_core::Uri;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    #[test]
    fn test_resolution_json_shape() {
        let nested = ResolutionStep::new(uri("ens/a.eth"), "inner", ResolutionResult::NotFound);
        let resolution = Resolution {
            uri: uri("ens/a.eth"),
            result: ResolutionResult::Uri(uri("ens/b.eth")),
            history: vec![
                ResolutionStep::new(
                    uri("ens/a.eth"),
                    "outer",
                    ResolutionResult::Uri(uri("ens/b.eth")),
                )
                .with_sub_history(vec![nested]),
            ],
        };

        let value = resolution_json(&resolution);

        assert_eq!(value["uri"], "wrap://ens/a.eth");
        assert_eq!(value["result"]["kind"], "uri");
        assert_eq!(value["result"]["uri"], "wrap://ens/b.eth");
        assert_eq!(value["history"][0]["description"], "outer");
        assert_eq!(
            value["history"][0]["sub_history"][0]["result"]["kind"],
            "not-found"
        );
        assert!(value["history"][0]["sub_history"][0]["result"]["uri"].is_null());
    }

    #[test]
    fn test_failed_step_renders_error() {
        let err = WrapError::InfiniteLoop { uri: uri("ens/a.eth") };
        let step = ResolutionStep::failed(uri("ens/a.eth"), "loop", &err);

        let value = step_json(&step);

        assert!(value.get("result").is_none());
        assert!(value["error"].as_str().unwrap().contains("wrap://ens/a.eth"));
        assert!(value.get("sub_history").is_none());
    }

    #[test]
    fn test_failure_json_uses_root_cause_and_history() {
        let cause = WrapError::InfiniteLoop { uri: uri("ens/a.eth") };
        let step = ResolutionStep::failed(uri("ens/a.eth"), "redirect", &cause);
        let err = WrapError::Resolution {
            uri: uri("ens/a.eth"),
            history: vec![step],
            source: Box::new(WrapError::InfiniteLoop { uri: uri("ens/a.eth") }),
        };

        let value = failure_json(&err);

        assert_eq!(value["cause"], cause.to_string());
        assert_eq!(value["history"].as_array().map(Vec::len), Some(1));
    }
}
