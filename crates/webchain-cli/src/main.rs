//! webchain CLI
//!
//! Composes bundler configuration for a web project and adds plugins to it.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use webchain_plugins::TerminationPolicy;

use cli::{Cli, Commands};
use commands::inspect::VariantFlags;
use error::Result;

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            1
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
}

fn report_error(e: &dyn std::fmt::Display) {
    eprintln!("{}: {}", "error".red().bold(), e);
}

fn init_tracing(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(verbose);
    let result = if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())
    };
    if let Err(e) = result {
        eprintln!("{}: failed to set tracing subscriber: {e}", "warning".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");
}

/// Run the CLI and return the process exit code.
fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} web build configuration CLI", "webchain".green().bold());
            println!();
            println!("Run {} for available commands.", "webchain --help".cyan());
            Ok(0)
        }
    }
}

fn execute_command(cmd: Commands) -> Result<i32> {
    match cmd {
        Commands::Inspect {
            mode,
            modern,
            modern_build,
            target,
            path,
        } => {
            let flags = VariantFlags {
                mode,
                modern,
                modern_build,
                target,
            };
            commands::run_inspect(&path, &flags)?;
            Ok(0)
        }
        Commands::Add {
            plugin,
            options,
            path,
            invoke_command,
        } => {
            let policy = TerminationPolicy::from_env();
            let result = commands::run_add(&path, &plugin, &options, &invoke_command);
            if let Err(e) = &result {
                report_error(e);
            }
            Ok(policy.exit_code(&result))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_inspect_missing_directory_fails() {
        let flags = VariantFlags::default();
        let result = commands::run_inspect(std::path::Path::new("/nonexistent/webchain/project"), &flags);
        assert!(result.is_err());
    }
}
