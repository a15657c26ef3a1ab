//! `webchain inspect`

use std::path::Path;

use webchain_core::{BuildMode, BuildVariant, ServiceContext, compose};
use webchain_fs::{RealFs, canonical_root};

use crate::error::Result;

/// Flag overrides applied on top of the environment snapshot.
#[derive(Debug, Clone, Default)]
pub struct VariantFlags {
    pub mode: Option<BuildMode>,
    pub modern: bool,
    pub modern_build: bool,
    pub target: Option<String>,
}

impl VariantFlags {
    pub fn apply(&self, mut variant: BuildVariant) -> BuildVariant {
        if let Some(mode) = self.mode {
            variant.mode = mode;
        }
        if let Some(target) = &self.target {
            variant.target = Some(target.clone());
        }
        if self.modern {
            variant = if self.modern_build {
                variant.modern()
            } else {
                variant.legacy()
            };
        }
        variant
    }
}

/// Compose the configuration for the project at `path` and return it as
/// pretty JSON.
pub fn render_inspect(path: &Path, flags: &VariantFlags) -> Result<String> {
    let root = canonical_root(path)?;
    let variant = flags.apply(BuildVariant::from_env());
    tracing::debug!(root = %root, ?variant, "inspecting");

    let ctx = ServiceContext::load(root, variant)?;
    let tree = compose(&ctx, &RealFs);
    Ok(tree.to_json_pretty()?)
}

/// Handle `webchain inspect`
pub fn run_inspect(path: &Path, flags: &VariantFlags) -> Result<()> {
    println!("{}", render_inspect(path, flags)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use webchain_test_utils::project::TestProject;

    #[test]
    fn test_flags_override_environment() {
        let env = BuildVariant::default().with_target("lib");
        let flags = VariantFlags {
            mode: Some(BuildMode::Production),
            modern: true,
            modern_build: false,
            target: Some("app".into()),
        };
        let variant = flags.apply(env);
        assert!(variant.is_production());
        assert!(variant.targets_app());
        assert!(variant.is_legacy_bundle());
    }

    #[test]
    fn test_no_flags_keeps_environment() {
        let env = BuildVariant::production().modern();
        assert_eq!(VariantFlags::default().apply(env.clone()), env);
    }

    #[test]
    fn test_render_production_project() {
        let project = TestProject::new();
        project.package_json("demo").file("public/index.html", "<html></html>");

        let flags = VariantFlags {
            mode: Some(BuildMode::Production),
            target: Some("app".into()),
            ..VariantFlags::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&render_inspect(project.root(), &flags).unwrap()).unwrap();

        assert_eq!(json["output"]["filename"], "js/[name].[contenthash:8].js");
        assert_eq!(json["plugins"][0]["name"], "html");
        assert_eq!(json["plugins"][0]["args"][0]["title"], "demo");
    }
}
