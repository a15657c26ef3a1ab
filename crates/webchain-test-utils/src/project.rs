//! [`TestProject`] builder for composition and plugin installation scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

/// A temporary project directory with helpers for laying out source files,
/// templates and installed packages.
///
/// # Example
///
/// ```rust,no_run
/// use webchain_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.package_json("demo");
/// project.file("public/index.html", "<html></html>");
/// project.installed_package("@vue/cli-plugin-eslint", "5.0.0", true);
/// project.assert_file_exists("node_modules/@vue/cli-plugin-eslint/generator/index.js");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self
    }

    /// Write a `package.json` with the given name.
    pub fn package_json(&self, name: &str) -> &Self {
        let manifest = json!({ "name": name, "version": "0.1.0" });
        self.file("package.json", &manifest.to_string())
    }

    /// Lay out `node_modules/<name>` as if the package were installed.
    pub fn installed_package(&self, name: &str, version: &str, with_generator: bool) -> &Self {
        let base = format!("node_modules/{name}");
        let manifest = json!({ "name": name, "version": version });
        self.file(&format!("{base}/package.json"), &manifest.to_string());
        if with_generator {
            self.file(&format!("{base}/generator/index.js"), "module.exports = () => {}\n");
        }
        self
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
