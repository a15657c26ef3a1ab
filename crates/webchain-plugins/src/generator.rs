//! Generator invocation boundary.

use serde_json::{Map, Value};
use tracing::info;
use webchain_fs::NormalizedPath;

use crate::error::{Error, Result};
use crate::installer::{quote_arg, run_inherited};

/// Options forwarded to a generator.
pub type GeneratorOptions = Map<String, Value>;

/// A built-in generator, run without installing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSpec {
    /// Stable identifier, e.g. `core:router`.
    pub id: String,
    /// Module path of the generator, resolved against the project.
    pub module: String,
    pub options: GeneratorOptions,
}

/// Hands generators to whatever applies them to the project.
pub trait GeneratorInvoker {
    /// Run the generator shipped by an installed plugin.
    fn invoke(&self, plugin: &str, options: &GeneratorOptions, context: &NormalizedPath) -> Result<()>;

    /// Run a built-in generator.
    fn run_generator(&self, context: &NormalizedPath, spec: &GeneratorSpec) -> Result<()>;
}

/// Invokes generators through an external command.
///
/// Installed plugins run as `<command> <plugin> --<key> <value>...`; built-in
/// generators run as `<command> <module> --<key> <value>...`.
#[derive(Debug, Clone)]
pub struct CommandInvoker {
    command: String,
}

impl Default for CommandInvoker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COMMAND)
    }
}

impl CommandInvoker {
    pub const DEFAULT_COMMAND: &'static str = "vue invoke";

    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Full shell command line for `target` with `options`.
    pub fn command_line(&self, target: &str, options: &GeneratorOptions) -> String {
        let mut line = format!("{} {}", self.command, quote_arg(target));
        for (key, value) in options {
            line.push_str(&format!(" --{} {}", quote_arg(key), quote_arg(&option_value(value))));
        }
        line
    }

    fn run(&self, id: &str, target: &str, options: &GeneratorOptions, context: &NormalizedPath) -> Result<()> {
        let command = self.command_line(target, options);
        info!(generator = id, %command, "invoking generator");
        run_inherited(&command, &context.to_native()).map_err(|exit_code| Error::GeneratorFailed {
            id: id.to_string(),
            command,
            exit_code,
        })
    }
}

impl GeneratorInvoker for CommandInvoker {
    fn invoke(&self, plugin: &str, options: &GeneratorOptions, context: &NormalizedPath) -> Result<()> {
        self.run(plugin, plugin, options, context)
    }

    fn run_generator(&self, context: &NormalizedPath, spec: &GeneratorSpec) -> Result<()> {
        self.run(&spec.id, &spec.module, &spec.options, context)
    }
}

fn option_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
