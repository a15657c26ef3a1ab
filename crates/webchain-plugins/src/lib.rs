//! Plugin acquisition for webchain projects
//!
//! `add <plugin>` checks the working tree, applies legacy shortcuts, expands
//! the plugin identifier, installs it with the project's package manager and
//! runs its generator when it ships one.
//!
//! Every side effect sits behind a trait so the pipeline runs against fakes:
//! [`PackageManager`], [`ModuleResolver`], [`GeneratorInvoker`], [`Prompter`].

pub mod add;
pub mod error;
pub mod generator;
pub mod git;
pub mod installer;
pub mod naming;
pub mod package_manager;
pub mod prompt;
pub mod resolver;
pub mod shortcuts;
pub mod version;

pub use add::{
    AddOutcome, AddPipeline, AddRequest, ENV_SKIP_DIRTY_GIT_PROMPT, ENV_TEST, InstallRecord,
    TerminationPolicy,
};
pub use error::{Error, Result};
pub use generator::{CommandInvoker, GeneratorInvoker, GeneratorOptions, GeneratorSpec};
pub use git::{confirm_if_git_dirty, is_dirty, is_git_repository};
pub use naming::{NamingConvention, OFFICIAL_PLUGINS};
pub use package_manager::{InstalledPackage, PackageClient, PackageManager, ProjectPackageManager};
pub use prompt::{DefaultAnswers, Prompter};
pub use resolver::{ModuleResolver, NodeModuleResolver, installed_version};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use version::{InstallSpec, LEGACY_SHORTCUT_RANGE, satisfies};
