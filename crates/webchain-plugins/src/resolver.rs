//! Node-style module resolution.

use serde_json::Value;
use tracing::debug;
use webchain_fs::{ConfigStore, NormalizedPath, ProjectPath};

/// Locates installed modules relative to a project directory.
///
/// Both operations return `None` on absence; neither fails.
pub trait ModuleResolver {
    /// Resolve `request` (e.g. `pkg/generator`) to a file.
    fn resolve_module(&self, request: &str, context: &NormalizedPath) -> Option<NormalizedPath>;

    /// Resolve `request` and parse the file as JSON.
    fn load_json(&self, request: &str, context: &NormalizedPath) -> Option<Value>;
}

/// Resolves against `node_modules` directories on disk.
///
/// For `pkg/sub` every `node_modules` from `context` up to the filesystem
/// root is probed for `pkg/sub`, `pkg/sub.js`, `pkg/sub.json` and
/// `pkg/sub/index.js`, in that order.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeModuleResolver;

impl NodeModuleResolver {
    pub fn new() -> Self {
        Self
    }

    fn candidates(base: &NormalizedPath) -> [NormalizedPath; 4] {
        let raw = base.as_str();
        [
            base.clone(),
            NormalizedPath::new(format!("{raw}.js")),
            NormalizedPath::new(format!("{raw}.json")),
            base.join("index.js"),
        ]
    }
}

impl ModuleResolver for NodeModuleResolver {
    fn resolve_module(&self, request: &str, context: &NormalizedPath) -> Option<NormalizedPath> {
        let mut dir = Some(context.clone());
        while let Some(current) = dir {
            let base = current.join(ProjectPath::NodeModules.as_str()).join(request);
            if let Some(found) = Self::candidates(&base).into_iter().find(|c| c.is_file()) {
                debug!(request, resolved = %found, "module resolved");
                return Some(found);
            }
            dir = current.parent();
        }
        debug!(request, context = %context, "module not found");
        None
    }

    fn load_json(&self, request: &str, context: &NormalizedPath) -> Option<Value> {
        let path = self.resolve_module(request, context)?;
        ConfigStore::new()
            .load::<Value>(&path)
            .inspect_err(|e| debug!(path = %path, error = %e, "module is not valid JSON"))
            .ok()
    }
}

/// `version` from an installed package's manifest.
pub fn installed_version(
    resolver: &dyn ModuleResolver,
    package: &str,
    context: &NormalizedPath,
) -> Option<String> {
    resolver
        .load_json(&format!("{package}/package.json"), context)?
        .get("version")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use webchain_test_utils::project::TestProject;

    fn root(project: &TestProject) -> NormalizedPath {
        NormalizedPath::new(project.root())
    }

    #[test]
    fn test_resolves_directory_index() {
        let project = TestProject::new();
        project.installed_package("vue-cli-plugin-foo", "1.0.0", true);

        let found = NodeModuleResolver
            .resolve_module("vue-cli-plugin-foo/generator", &root(&project))
            .unwrap();
        assert!(found.as_str().ends_with("vue-cli-plugin-foo/generator/index.js"));
    }

    #[test]
    fn test_resolves_js_extension() {
        let project = TestProject::new();
        project.file("node_modules/pkg/generator.js", "module.exports = () => {}");

        let found = NodeModuleResolver.resolve_module("pkg/generator", &root(&project)).unwrap();
        assert!(found.as_str().ends_with("pkg/generator.js"));
    }

    #[test]
    fn test_walks_ancestors() {
        let project = TestProject::new();
        project
            .installed_package("@vue/cli-service", "3.12.1", false)
            .file("packages/app/src/main.js", "");

        let context = root(&project).join("packages/app");
        assert_eq!(
            installed_version(&NodeModuleResolver, "@vue/cli-service", &context).as_deref(),
            Some("3.12.1")
        );
    }

    #[test]
    fn test_absent_module_is_none() {
        let project = TestProject::new();
        assert!(NodeModuleResolver.resolve_module("missing/generator", &root(&project)).is_none());
        assert!(NodeModuleResolver.load_json("missing/package.json", &root(&project)).is_none());
    }

    #[test]
    fn test_unparseable_json_is_none() {
        let project = TestProject::new();
        project.file("node_modules/broken/package.json", "{ not json");
        assert!(NodeModuleResolver.load_json("broken/package.json", &root(&project)).is_none());
    }
}
