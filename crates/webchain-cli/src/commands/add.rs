//! `webchain add`

use std::path::Path;

use colored::Colorize;
use serde_json::Value;
use webchain_fs::canonical_root;
use webchain_plugins::version::parse_version;
use webchain_plugins::{
    AddOutcome, AddPipeline, AddRequest, CommandInvoker, ENV_SKIP_DIRTY_GIT_PROMPT,
    GeneratorOptions, NodeModuleResolver, ProjectPackageManager,
};

use crate::error::{CliError, Result};
use crate::interactive::DialoguerPrompter;

/// Parse repeated `key=value` generator options.
///
/// `true`/`false` and numbers become JSON booleans and numbers; anything else
/// stays a string.
pub fn parse_options(raw: &[String]) -> Result<GeneratorOptions> {
    let mut options = GeneratorOptions::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| CliError::user(format!("Invalid option '{pair}', expected key=value")))?;
        let value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => other
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(other)),
        };
        options.insert(key.to_string(), value);
    }
    Ok(options)
}

/// Handle `webchain add <plugin>`
///
/// Returns the outcome so the caller can apply the termination policy.
pub fn run_add(
    path: &Path,
    plugin: &str,
    raw_options: &[String],
    invoke_command: &str,
) -> Result<AddOutcome> {
    let root = canonical_root(path)?;
    let options = parse_options(raw_options)?;
    let tool_version = parse_version(env!("CARGO_PKG_VERSION"))?;

    let package_manager = ProjectPackageManager::new(root.clone());
    let resolver = NodeModuleResolver::new();
    let invoker = CommandInvoker::new(invoke_command);
    let prompter = DialoguerPrompter;
    let skip_dirty_check = std::env::var_os(ENV_SKIP_DIRTY_GIT_PROMPT).is_some_and(|v| !v.is_empty());

    let pipeline = AddPipeline::new(tool_version, &package_manager, &resolver, &invoker, &prompter)?
        .skip_dirty_check(skip_dirty_check);

    println!(
        "{} Adding {} with {}",
        "=>".blue().bold(),
        plugin.cyan(),
        package_manager.client().to_string().dimmed()
    );
    let outcome = pipeline.run(&AddRequest::new(plugin, root).with_options(options))?;
    report(&outcome);
    Ok(outcome)
}

fn report(outcome: &AddOutcome) {
    match outcome {
        AddOutcome::Aborted => {
            println!("{} Aborted, nothing was installed", "=>".yellow().bold());
        }
        AddOutcome::Shortcut { generator } => {
            println!("{} Ran built-in generator {}", "=>".green().bold(), generator.cyan());
        }
        AddOutcome::Invoked(record) => {
            println!(
                "{} Installed {} {}",
                "=>".green().bold(),
                record.package.cyan(),
                record.installed_version.as_deref().unwrap_or("").dimmed()
            );
            println!("   {} generator invoked", "Done:".dimmed());
        }
        AddOutcome::NoGenerator(record) => {
            println!(
                "{} Installed {} {}",
                "=>".green().bold(),
                record.package.cyan(),
                record.installed_version.as_deref().unwrap_or("").dimmed()
            );
            println!("   {} plugin has no generator, nothing to invoke", "Note:".dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_options_types() {
        let raw = vec![
            "config=airbnb".to_string(),
            "lintOnSave=true".to_string(),
            "port=8080".to_string(),
            "expr=a=b".to_string(),
        ];
        let options = parse_options(&raw).unwrap();
        assert_eq!(options["config"], json!("airbnb"));
        assert_eq!(options["lintOnSave"], json!(true));
        assert_eq!(options["port"], json!(8080));
        assert_eq!(options["expr"], json!("a=b"));
    }

    #[test]
    fn test_parse_options_rejects_missing_key() {
        assert!(parse_options(&["novalue".to_string()]).is_err());
        assert!(parse_options(&["=x".to_string()]).is_err());
    }
}
