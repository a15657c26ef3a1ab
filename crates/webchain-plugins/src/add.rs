//! The `add` pipeline.
//!
//! ```text
//! dirty-tree preflight → legacy shortcut (version gated)
//!   → resolve identifier → install → locate generator → invoke | report absence
//! ```
//!
//! No step is retried. A failed install stops the pipeline before the
//! generator step and nothing is rolled back.

use semver::Version;
use tracing::{debug, info};
use webchain_fs::NormalizedPath;

use crate::error::{Error, Result};
use crate::generator::{GeneratorInvoker, GeneratorOptions};
use crate::git::confirm_if_git_dirty;
use crate::naming::NamingConvention;
use crate::package_manager::PackageManager;
use crate::prompt::Prompter;
use crate::resolver::{ModuleResolver, installed_version};
use crate::shortcuts::ShortcutRegistry;
use crate::version::{InstallSpec, LEGACY_SHORTCUT_RANGE, satisfies};

/// Test-mode flag: failures are reported but never turn into a failing exit.
pub const ENV_TEST: &str = "WEBCHAIN_TEST";
/// Skips the dirty working tree preflight when set.
pub const ENV_SKIP_DIRTY_GIT_PROMPT: &str = "WEBCHAIN_SKIP_DIRTY_GIT_PROMPT";

/// One `add` invocation.
#[derive(Debug, Clone)]
pub struct AddRequest {
    /// Plugin identifier as typed by the user.
    pub plugin: String,
    /// Options forwarded to the plugin's generator.
    pub options: GeneratorOptions,
    /// Project directory.
    pub context: NormalizedPath,
}

impl AddRequest {
    pub fn new(plugin: impl Into<String>, context: NormalizedPath) -> Self {
        Self {
            plugin: plugin.into(),
            options: GeneratorOptions::new(),
            context,
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }
}

/// What was installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    pub requested: String,
    /// Full package name after applying the naming convention.
    pub package: String,
    /// Exact spec handed to the package manager.
    pub spec: InstallSpec,
    pub installed_version: Option<String>,
}

/// How an `add` ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The user declined to continue on a dirty working tree.
    Aborted,
    /// A legacy shortcut ran a built-in generator; nothing was installed.
    Shortcut { generator: String },
    /// The plugin was installed and its generator invoked.
    Invoked(InstallRecord),
    /// The plugin was installed and ships no generator.
    NoGenerator(InstallRecord),
}

/// Runs `add` requests against injected collaborators.
pub struct AddPipeline<'a> {
    naming: NamingConvention,
    shortcuts: ShortcutRegistry,
    tool_version: Version,
    skip_dirty_check: bool,
    package_manager: &'a dyn PackageManager,
    resolver: &'a dyn ModuleResolver,
    invoker: &'a dyn GeneratorInvoker,
    prompter: &'a dyn Prompter,
}

impl<'a> AddPipeline<'a> {
    /// Pipeline with the default naming convention and built-in shortcuts.
    pub fn new(
        tool_version: Version,
        package_manager: &'a dyn PackageManager,
        resolver: &'a dyn ModuleResolver,
        invoker: &'a dyn GeneratorInvoker,
        prompter: &'a dyn Prompter,
    ) -> Result<Self> {
        Ok(Self {
            naming: NamingConvention::default(),
            shortcuts: ShortcutRegistry::with_builtins()?,
            tool_version,
            skip_dirty_check: false,
            package_manager,
            resolver,
            invoker,
            prompter,
        })
    }

    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_shortcuts(mut self, shortcuts: ShortcutRegistry) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    pub fn skip_dirty_check(mut self, skip: bool) -> Self {
        self.skip_dirty_check = skip;
        self
    }

    pub fn run(&self, request: &AddRequest) -> Result<AddOutcome> {
        let context = &request.context;

        if !self.skip_dirty_check && !confirm_if_git_dirty(&context.to_native(), self.prompter)? {
            info!("aborted on dirty working tree");
            return Ok(AddOutcome::Aborted);
        }

        if let Some(generator) = self.try_shortcut(request)? {
            return Ok(AddOutcome::Shortcut { generator });
        }

        let package = self.naming.resolve_plugin_id(&request.plugin);
        let official = self.naming.is_official_plugin(&package);
        let spec = InstallSpec::for_plugin(&package, official, &self.tool_version);
        info!(requested = %request.plugin, %spec, official, "installing plugin");

        let installed = self.package_manager.add(&spec)?;
        let record = InstallRecord {
            requested: request.plugin.clone(),
            package: package.clone(),
            spec,
            installed_version: installed.version,
        };

        let generator = format!("{package}/generator");
        if self.resolver.resolve_module(&generator, context).is_none() {
            info!(plugin = %package, "plugin has no generator");
            return Ok(AddOutcome::NoGenerator(record));
        }

        self.invoker.invoke(&package, &request.options, context)?;
        Ok(AddOutcome::Invoked(record))
    }

    /// Run a legacy shortcut if the plugin matches one and the service
    /// package is on the legacy line. Returns the generator id that ran.
    fn try_shortcut(&self, request: &AddRequest) -> Result<Option<String>> {
        let Some(shortcut) = self.shortcuts.find(&request.plugin) else {
            return Ok(None);
        };
        let context = &request.context;

        let service_version =
            installed_version(self.resolver, &self.naming.service_package, context);
        let legacy = match service_version.as_deref() {
            Some(version) => satisfies(version, LEGACY_SHORTCUT_RANGE)?,
            None => false,
        };
        if !legacy {
            debug!(
                plugin = %request.plugin,
                service_version = ?service_version,
                "shortcut not applicable, treating as a plugin"
            );
            return Ok(None);
        }

        let spec = shortcut.generator(self.prompter)?;
        if self.resolver.resolve_module(&spec.module, context).is_none() {
            return Err(Error::GeneratorNotFound {
                module: spec.module,
                context: context.to_native(),
            });
        }
        info!(generator = %spec.id, "running built-in generator");
        self.invoker.run_generator(context, &spec)?;
        Ok(Some(spec.id))
    }
}

/// Maps the result of `add` to a process exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminationPolicy {
    pub test_mode: bool,
}

impl TerminationPolicy {
    pub fn new(test_mode: bool) -> Self {
        Self { test_mode }
    }

    /// Read the test-mode flag from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(lookup(ENV_TEST).is_some_and(|v| !v.is_empty()))
    }

    /// `0` on success. Errors and aborts give `1`, except in test mode where
    /// nothing fails the process.
    pub fn exit_code<E>(&self, result: &std::result::Result<AddOutcome, E>) -> i32 {
        let failed = matches!(result, Err(_) | Ok(AddOutcome::Aborted));
        if failed && !self.test_mode { 1 } else { 0 }
    }
}
