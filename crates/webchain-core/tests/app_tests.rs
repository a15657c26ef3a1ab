//! End-to-end composition scenarios.

use pretty_assertions::assert_eq;
use serde_json::json;
use webchain_core::{
    AppOutcome, BuildMode, BuildVariant, BundlerMajor, ConfigBuilder, PageDeclarations,
    ProjectOptions, ServiceContext, apply_app_config, compose, seed_base,
};
use webchain_fs::{MemoryProbe, NormalizedPath, RealFs};
use webchain_test_utils::project::TestProject;

fn context(options: ProjectOptions, variant: BuildVariant) -> ServiceContext {
    ServiceContext::new(NormalizedPath::new("/app"), options, variant)
        .with_package_name(Some("demo".into()))
}

fn html_plugin_names(ctx: &ServiceContext, probe: &MemoryProbe) -> Vec<String> {
    compose(ctx, probe)
        .plugins()
        .iter()
        .filter(|(_, p)| p.implementation == "html-webpack-plugin")
        .map(|(name, _)| name.to_string())
        .collect()
}

#[test]
fn test_single_page_production_modern() {
    let ctx = context(ProjectOptions::default(), BuildVariant::production().modern());
    let probe = MemoryProbe::new().with_paths(["/app/public/index.html"]);

    let tree = compose(&ctx, &probe);

    assert_eq!(html_plugin_names(&ctx, &probe), vec!["html"]);
    assert_eq!(
        tree.output().filename.as_deref(),
        Some("js/[name].[contenthash:8].js")
    );
    assert_eq!(tree.output().chunk_filename, tree.output().filename);

    let split = tree.optimization().split_chunks.as_ref().unwrap();
    assert_eq!(split.cache_groups.names(), vec!["defaultVendors", "common"]);
    assert_eq!(split.cache_groups.get("common").unwrap().min_chunks, Some(2));

    assert_eq!(tree.entry_points().names(), vec!["app"]);
    assert_eq!(tree.plugins().names(), vec!["html", "copy"]);
}

#[test]
fn test_two_pages_end_to_end() {
    let pages: PageDeclarations = [("home", "src/home.js"), ("about", "src/about.js")]
        .into_iter()
        .collect();
    let ctx = context(ProjectOptions::default().with_pages(pages), BuildVariant::production());

    let tree = compose(&ctx, &MemoryProbe::new());

    assert_eq!(tree.entry_points().names(), vec!["home", "about"]);
    assert_eq!(tree.plugins().names(), vec!["html-home", "html-about"]);
    for page in ["home", "about"] {
        let options = tree
            .plugins()
            .get(&format!("html-{page}"))
            .and_then(|p| p.options())
            .unwrap();
        assert_eq!(options["chunks"], json!(["chunk-vendors", "chunk-common", page]));
    }
}

#[test]
fn test_non_app_target_leaves_tree_untouched() {
    let ctx = context(
        ProjectOptions::default(),
        BuildVariant::production().with_target("lib"),
    );
    let mut builder = ConfigBuilder::new();
    seed_base(&mut builder, &ctx);
    let before = builder.tree().clone();

    let outcome = apply_app_config(&mut builder, &ctx, &MemoryProbe::new());

    assert_eq!(outcome, AppOutcome::Skipped);
    assert_eq!(builder.tree(), &before);
}

#[test]
fn test_development_has_no_hash() {
    let ctx = context(ProjectOptions::default(), BuildVariant::default());
    let tree = compose(&ctx, &MemoryProbe::new());
    assert_eq!(tree.output().filename.as_deref(), Some("js/[name].js"));
}

#[test]
fn test_test_mode_skips_chunk_splitting() {
    let ctx = context(
        ProjectOptions::default(),
        BuildVariant::default().with_mode(BuildMode::Test),
    );
    let tree = compose(&ctx, &MemoryProbe::new());
    assert!(tree.optimization().split_chunks.is_none());
}

#[test]
fn test_legacy_bundle_skips_copy() {
    let ctx = context(ProjectOptions::default(), BuildVariant::production().legacy());
    let probe = MemoryProbe::new().with_paths(["/app/public/favicon.ico"]);

    let tree = compose(&ctx, &probe);

    assert_eq!(
        tree.output().filename.as_deref(),
        Some("js/[name]-legacy.[contenthash:8].js")
    );
    assert!(!tree.plugins().contains("copy"));
}

#[test]
fn test_copy_ignores_resolved_templates() {
    let pages: PageDeclarations = [("home", "src/home.js"), ("about", "src/about.js")]
        .into_iter()
        .collect();
    let ctx = context(ProjectOptions::default().with_pages(pages), BuildVariant::production());
    let probe = MemoryProbe::new().with_paths(["/app/public/index.html", "/app/public/about.html"]);

    let mut builder = ConfigBuilder::new();
    let outcome = apply_app_config(&mut builder, &ctx, &probe);

    let expected = vec![
        "**/.DS_Store".to_string(),
        "/app/public/index.html".to_string(),
        "/app/public/about.html".to_string(),
    ];
    assert_eq!(
        outcome,
        AppOutcome::Applied {
            copy_ignore: expected.clone()
        }
    );

    let copy = builder.tree().plugins().get("copy").unwrap();
    let pattern = &copy.options().unwrap()["patterns"][0];
    assert_eq!(pattern["from"], json!("/app/public"));
    assert_eq!(pattern["to"], json!("/app/dist"));
    assert_eq!(pattern["globOptions"]["ignore"], json!(expected));
}

#[test]
fn test_mutation_order_with_every_optional_plugin() {
    let options = ProjectOptions {
        index_path: "app.html".into(),
        crossorigin: Some("anonymous".into()),
        bundler_major: BundlerMajor::V4,
        ..ProjectOptions::default()
    };
    let ctx = context(options, BuildVariant::production());
    let probe = MemoryProbe::new().with_paths(["/app/public/index.html"]);

    let tree = compose(&ctx, &probe);

    assert_eq!(
        tree.plugins().names(),
        vec!["move-index", "named-chunks", "html", "cors", "copy"]
    );
    let move_index = tree.plugins().get("move-index").unwrap();
    assert_eq!(
        move_index.args,
        vec![json!("/app/dist/index.html"), json!("/app/dist/app.html")]
    );
    let cors = tree.plugins().get("cors").unwrap();
    assert_eq!(
        cors.args[0],
        json!({"crossorigin": "anonymous", "integrity": false, "publicPath": "/"})
    );
    let split = tree.optimization().split_chunks.as_ref().unwrap();
    assert_eq!(split.cache_groups.names(), vec!["vendors", "common"]);
}

#[test]
fn test_fallback_template_override() {
    let ctx = context(ProjectOptions::default(), BuildVariant::production())
        .with_fallback_template(NormalizedPath::new("/opt/templates/default.html"));

    let tree = compose(&ctx, &MemoryProbe::new());

    let html = tree.plugins().get("html").and_then(|p| p.options()).unwrap();
    assert_eq!(html["template"], json!("/opt/templates/default.html"));
}

#[test]
fn test_integrity_alone_registers_cors() {
    let options = ProjectOptions {
        integrity: true,
        ..ProjectOptions::default()
    };
    let tree = compose(&context(options, BuildVariant::production()), &MemoryProbe::new());
    assert!(tree.plugins().contains("cors"));
}

#[test]
fn test_compose_from_disk_project() {
    let project = TestProject::new();
    project
        .package_json("on-disk")
        .file("public/index.html", "<html></html>")
        .file(
            "webchain.toml",
            "output_dir = \"build\"\nassets_dir = \"static\"\n\n[pages]\nmain = \"src/main.js\"\n",
        );

    let root = NormalizedPath::new(project.root());
    let ctx = ServiceContext::load(root.clone(), BuildVariant::production()).unwrap();
    let tree = compose(&ctx, &RealFs);

    assert_eq!(
        tree.output().filename.as_deref(),
        Some("static/js/[name].[contenthash:8].js")
    );
    assert_eq!(tree.output().path.as_deref(), Some(root.join("build").as_str()));

    let options = tree.plugins().get("html-main").and_then(|p| p.options()).unwrap();
    assert_eq!(options["title"], json!("on-disk"));
    assert_eq!(options["template"], json!(root.join("public/index.html").as_str()));
    assert!(tree.plugins().contains("copy"));

    let json = tree.to_json_pretty().unwrap();
    assert!(json.contains("\"html-main\""));
}
