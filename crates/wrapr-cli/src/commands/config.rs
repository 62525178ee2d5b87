//! `wrapr config` subcommands.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde_json::{Value, json};
use wrapr_config::ClientConfig;

use crate::formatter::OutputFormat;
use crate::theme::Theme;

fn config_json(config: &ClientConfig) -> Value {
    let mut envs: Vec<_> = config.envs().iter().collect();
    envs.sort_by(|a, b| a.0.cmp(b.0));
    let mut interfaces: Vec<_> = config.interfaces().iter().collect();
    interfaces.sort_by(|a, b| a.0.cmp(b.0));

    json!({
        "envs": envs
            .into_iter()
            .map(|(uri, env)| (uri.to_string(), Value::Object(env.clone())))
            .collect::<serde_json::Map<_, _>>(),
        "interfaces": interfaces
            .into_iter()
            .map(|(uri, impls)| (uri.to_string(), json!(impls)))
            .collect::<serde_json::Map<_, _>>(),
        "wrappers": config.wrappers(),
        "resolvers": config
            .resolvers()
            .iter()
            .map(|r| r.description())
            .collect::<Vec<_>>(),
    })
}

/// Print the effective client configuration.
pub(crate) fn show_config(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = super::load_config(config_path)?;
    let value = config_json(&config);

    if format == OutputFormat::Json {
        println!("{value}");
        return Ok(());
    }

    println!("{}", Theme::header("Client configuration"));
    println!("{}", Theme::separator());

    println!("\n{}", "Environments:".cyan());
    if let Some(envs) = value["envs"].as_object().filter(|m| !m.is_empty()) {
        for (uri, env) in envs {
            println!("  {}", Theme::kv(uri, &env.to_string()));
        }
    } else {
        println!("  {}", Theme::dimmed("(none)"));
    }

    println!("\n{}", "Interfaces:".cyan());
    if let Some(interfaces) = value["interfaces"].as_object().filter(|m| !m.is_empty()) {
        for (uri, impls) in interfaces {
            println!("  {uri}");
            for implementation in impls.as_array().into_iter().flatten() {
                println!("    - {}", implementation.as_str().unwrap_or_default());
            }
        }
    } else {
        println!("  {}", Theme::dimmed("(none)"));
    }

    println!("\n{}", "Wrappers:".cyan());
    if config.wrappers().is_empty() {
        println!("  {}", Theme::dimmed("(none)"));
    }
    for uri in config.wrappers() {
        println!("  {uri}");
    }

    println!("\n{} ({})", "Resolvers:".cyan(), config.resolvers().len());
    for (i, resolver) in config.resolvers().iter().enumerate() {
        println!("  {}. {}", i.saturating_add(1), resolver.description());
    }

    Ok(())
}
