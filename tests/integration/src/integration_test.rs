//! Cross-crate workflows: fixture projects composed end to end, and a plugin
//! added to a project before its configuration is inspected.

use std::cell::RefCell;
use std::path::PathBuf;

use serde_json::{Value, json};
use webchain_core::{BuildVariant, ServiceContext, compose};
use webchain_fs::{NormalizedPath, RealFs};
use webchain_plugins::{
    AddOutcome, AddPipeline, AddRequest, DefaultAnswers, GeneratorInvoker, GeneratorOptions,
    GeneratorSpec, InstallSpec, InstalledPackage, NodeModuleResolver, PackageManager, Result,
};
use webchain_test_utils::git::{clean_git_repo, commit_all};
use webchain_test_utils::project::TestProject;

fn fixture(name: &str) -> NormalizedPath {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/projects")
        .join(name);
    NormalizedPath::new(dir)
}

fn plugin_options<'a>(plugins: &'a Value, name: &str) -> &'a Value {
    plugins
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .map(|p| &p["args"][0])
        .unwrap_or_else(|| panic!("no plugin named {name}"))
}

#[test]
fn test_multi_page_fixture_composes_in_declaration_order() {
    let root = fixture("multi-page");
    let ctx = ServiceContext::load(root.clone(), BuildVariant::production()).unwrap();
    let tree = compose(&ctx, &RealFs);

    assert_eq!(tree.entry_points().names(), vec!["index", "admin", "about"]);
    assert_eq!(
        tree.plugins().names(),
        vec!["html-index", "html-admin", "html-about", "cors", "copy"]
    );
    assert_eq!(
        tree.output().filename.as_deref(),
        Some("static/js/[name].[contenthash:8].js")
    );

    let json: Value = serde_json::from_str(&tree.to_json_pretty().unwrap()).unwrap();
    let plugins = &json["plugins"];

    let index = plugin_options(plugins, "html-index");
    assert_eq!(index["title"], "Home");
    assert_eq!(index["template"], json!(root.join("public/index.html").as_str()));

    let admin = plugin_options(plugins, "html-admin");
    assert_eq!(admin["filename"], "admin/index.html");
    assert_eq!(admin["chunks"], json!(["chunk-vendors", "admin"]));
    assert_eq!(admin["title"], "multi-page-fixture");
    assert_eq!(admin["template"], json!(root.join("public/index.html").as_str()));

    let about = plugin_options(plugins, "html-about");
    assert_eq!(about["template"], json!(root.join("public/about.html").as_str()));

    let copy = plugin_options(plugins, "copy");
    let ignore = &copy["patterns"][0]["globOptions"]["ignore"];
    assert_eq!(ignore.as_array().unwrap().len(), 4);
    assert_eq!(copy["patterns"][0]["to"], json!(root.join("build").as_str()));
}

/// Installs by writing the package into `node_modules`.
struct DiskPackageManager<'p> {
    project: &'p TestProject,
}

impl PackageManager for DiskPackageManager<'_> {
    fn add(&self, spec: &InstallSpec) -> Result<InstalledPackage> {
        self.project.installed_package(&spec.name, "5.0.8", true);
        Ok(InstalledPackage {
            name: spec.name.clone(),
            version: Some("5.0.8".into()),
        })
    }
}

#[derive(Default)]
struct RecordingInvoker {
    plugins: RefCell<Vec<String>>,
}

impl GeneratorInvoker for RecordingInvoker {
    fn invoke(&self, plugin: &str, _options: &GeneratorOptions, _context: &NormalizedPath) -> Result<()> {
        self.plugins.borrow_mut().push(plugin.to_string());
        Ok(())
    }

    fn run_generator(&self, _context: &NormalizedPath, spec: &GeneratorSpec) -> Result<()> {
        self.plugins.borrow_mut().push(spec.id.clone());
        Ok(())
    }
}

#[test]
fn test_add_then_inspect_same_project() {
    let project = TestProject::new();
    project
        .package_json("workflow")
        .file(".gitignore", "node_modules/\n")
        .file("public/index.html", "<html></html>")
        .file("src/main.js", "");
    let repo = clean_git_repo(project.root());
    commit_all(&repo, "scaffold");

    let root = NormalizedPath::new(project.root());
    let pm = DiskPackageManager { project: &project };
    let invoker = RecordingInvoker::default();
    let pipeline = AddPipeline::new(
        semver::Version::new(5, 0, 8),
        &pm,
        &NodeModuleResolver,
        &invoker,
        &DefaultAnswers,
    )
    .unwrap();

    let outcome = pipeline.run(&AddRequest::new("pwa", root.clone())).unwrap();
    assert!(matches!(outcome, AddOutcome::Invoked(ref r) if r.package == "@vue/cli-plugin-pwa"));
    assert_eq!(*invoker.plugins.borrow(), vec!["@vue/cli-plugin-pwa".to_string()]);

    let ctx = ServiceContext::load(root, BuildVariant::default()).unwrap();
    let tree = compose(&ctx, &RealFs);
    assert_eq!(tree.output().filename.as_deref(), Some("js/[name].js"));
    assert_eq!(tree.plugins().names(), vec!["html", "copy"]);
}
