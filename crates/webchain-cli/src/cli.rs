//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use webchain_core::BuildMode;
use webchain_plugins::CommandInvoker;

/// webchain - compose bundler configuration and add plugins to web projects
#[derive(Parser, Debug)]
#[command(name = "webchain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compose the build configuration and print it as JSON
    ///
    /// Environment variables (NODE_ENV, WEBCHAIN_BUILD_TARGET,
    /// WEBCHAIN_MODERN_MODE, WEBCHAIN_MODERN_BUILD) are read first; flags
    /// override them.
    ///
    /// Examples:
    ///   webchain inspect                          # Development build
    ///   webchain inspect --mode production        # Production build
    ///   webchain inspect --modern                 # Legacy half of a modern pair
    ///   webchain inspect --modern --modern-build  # Modern half
    Inspect {
        /// Build mode (production, development, test)
        #[arg(short, long)]
        mode: Option<BuildMode>,

        /// Produce a legacy/modern bundle pair
        #[arg(long)]
        modern: bool,

        /// Build the modern half of the pair
        #[arg(long, requires = "modern")]
        modern_build: bool,

        /// Build target; only `app` is composed here
        #[arg(short, long)]
        target: Option<String>,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Install a plugin and run its generator
    ///
    /// Short names expand to full package names: `eslint` installs
    /// `@vue/cli-plugin-eslint`, `foo` installs `vue-cli-plugin-foo`.
    ///
    /// Examples:
    ///   webchain add eslint
    ///   webchain add eslint --opt config=airbnb --opt lintOn=save
    Add {
        /// Plugin name or full package name
        plugin: String,

        /// Generator option as key=value (repeatable)
        #[arg(short, long = "opt", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Project directory
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Command used to run plugin generators
        #[arg(long, env = "WEBCHAIN_INVOKE_COMMAND", default_value = CommandInvoker::DEFAULT_COMMAND)]
        invoke_command: String,
    },
}
