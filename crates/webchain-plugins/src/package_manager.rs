//! Package manager boundary.

use std::fmt;

use tracing::info;
use webchain_fs::NormalizedPath;

use crate::error::Result;
use crate::installer::{check_binary_on_path, quote_arg, run_install};
use crate::resolver::{NodeModuleResolver, installed_version};
use crate::version::InstallSpec;

/// What a successful install reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    /// Version found on disk after installing, if readable.
    pub version: Option<String>,
}

/// Installs one package as a development dependency of the project.
pub trait PackageManager {
    fn add(&self, spec: &InstallSpec) -> Result<InstalledPackage>;
}

/// Package manager client, chosen from the project's lockfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageClient {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageClient {
    /// `pnpm-lock.yaml` → pnpm, `yarn.lock` → yarn, anything else → npm.
    pub fn detect(root: &NormalizedPath) -> Self {
        if root.join("pnpm-lock.yaml").is_file() {
            Self::Pnpm
        } else if root.join("yarn.lock").is_file() {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    pub fn binary(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Shell command installing `spec` as a development dependency.
    pub fn add_command(&self, spec: &InstallSpec) -> String {
        let spec = quote_arg(&spec.to_string());
        match self {
            Self::Npm => format!("npm install --save-dev {spec}"),
            Self::Yarn | Self::Pnpm => format!("{} add -D {spec}", self.binary()),
        }
    }
}

impl fmt::Display for PackageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Installs into a project directory with its detected client.
#[derive(Debug, Clone)]
pub struct ProjectPackageManager {
    root: NormalizedPath,
    client: PackageClient,
}

impl ProjectPackageManager {
    pub fn new(root: NormalizedPath) -> Self {
        let client = PackageClient::detect(&root);
        Self { root, client }
    }

    pub fn with_client(mut self, client: PackageClient) -> Self {
        self.client = client;
        self
    }

    pub fn client(&self) -> PackageClient {
        self.client
    }
}

impl PackageManager for ProjectPackageManager {
    fn add(&self, spec: &InstallSpec) -> Result<InstalledPackage> {
        check_binary_on_path(self.client.binary())?;

        let command = self.client.add_command(spec);
        info!(client = %self.client, %command, "installing package");
        run_install(&spec.name, &command, &self.root.to_native())?;

        let version = installed_version(&NodeModuleResolver, &spec.name, &self.root);
        info!(package = %spec.name, version = ?version, "package installed");
        Ok(InstalledPackage {
            name: spec.name.clone(),
            version,
        })
    }
}
