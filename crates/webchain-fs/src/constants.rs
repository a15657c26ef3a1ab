//! Well-known locations inside a project.

use std::path::Path;

/// Conventional project-relative paths consulted during composition and
/// plugin installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `public` directory (static assets copied verbatim)
    PublicDir,
    /// The shared page template, `public/index.html`
    IndexTemplate,
    /// The default single-page entry module
    MainEntry,
    /// The npm manifest
    PackageJson,
    /// Installed dependencies
    NodeModules,
    /// The user-declared options file
    OptionsFile,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublicDir => "public",
            Self::IndexTemplate => "public/index.html",
            Self::MainEntry => "src/main.js",
            Self::PackageJson => "package.json",
            Self::NodeModules => "node_modules",
            Self::OptionsFile => "webchain.toml",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
