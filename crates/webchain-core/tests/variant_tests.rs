//! Decision table of the build variant resolver and the output filename
//! pattern it selects.

use rstest::rstest;
use webchain_core::{
    BuildMode, BuildVariant, BundlerMajor, ChunkIdStrategy, VariantResolver, VendorGroupKey,
    output_filename,
};

fn variant(mode: BuildMode, legacy: Option<bool>) -> BuildVariant {
    let base = BuildVariant::default().with_mode(mode);
    match legacy {
        None => base,
        Some(true) => base.legacy(),
        Some(false) => base.modern(),
    }
}

#[rstest]
#[case(BuildMode::Production, None, true, "js/[name].[contenthash:8].js")]
#[case(BuildMode::Production, Some(false), true, "js/[name].[contenthash:8].js")]
#[case(BuildMode::Production, Some(true), true, "js/[name]-legacy.[contenthash:8].js")]
#[case(BuildMode::Production, None, false, "js/[name].js")]
#[case(BuildMode::Production, Some(true), false, "js/[name]-legacy.js")]
#[case(BuildMode::Development, None, true, "js/[name].js")]
#[case(BuildMode::Development, Some(true), true, "js/[name]-legacy.js")]
#[case(BuildMode::Test, None, true, "js/[name].js")]
fn test_output_filename_table(
    #[case] mode: BuildMode,
    #[case] legacy: Option<bool>,
    #[case] hashing: bool,
    #[case] expected: &str,
) {
    let decisions = VariantResolver::new(BundlerMajor::V5)
        .resolve(&variant(mode, legacy))
        .unwrap();
    assert_eq!(output_filename(&decisions, hashing, ""), expected);
}

#[test]
fn test_output_filename_under_assets_dir() {
    let decisions = VariantResolver::new(BundlerMajor::V5)
        .resolve(&BuildVariant::production())
        .unwrap();
    assert_eq!(
        output_filename(&decisions, true, "static"),
        "static/js/[name].[contenthash:8].js"
    );
}

#[rstest]
#[case(None, true)]
#[case(Some("app"), true)]
#[case(Some("lib"), false)]
#[case(Some("wc"), false)]
fn test_target_gate(#[case] target: Option<&str>, #[case] applies: bool) {
    let mut variant = BuildVariant::production();
    if let Some(target) = target {
        variant = variant.with_target(target);
    }
    let resolved = VariantResolver::new(BundlerMajor::V5).resolve(&variant);
    assert_eq!(resolved.is_some(), applies);
}

#[rstest]
#[case(BuildMode::Development, BundlerMajor::V5, Some(VendorGroupKey::DefaultVendors))]
#[case(BuildMode::Production, BundlerMajor::V4, Some(VendorGroupKey::Vendors))]
#[case(BuildMode::Test, BundlerMajor::V5, None)]
#[case(BuildMode::Test, BundlerMajor::V4, None)]
fn test_split_chunks_decision(
    #[case] mode: BuildMode,
    #[case] bundler: BundlerMajor,
    #[case] expected: Option<VendorGroupKey>,
) {
    let decisions = VariantResolver::new(bundler)
        .resolve(&BuildVariant::default().with_mode(mode))
        .unwrap();
    assert_eq!(decisions.split_chunks, expected);
}

#[rstest]
#[case(BuildMode::Production, BundlerMajor::V4, ChunkIdStrategy::NameOrContentHash)]
#[case(BuildMode::Production, BundlerMajor::V5, ChunkIdStrategy::BundlerDefault)]
#[case(BuildMode::Development, BundlerMajor::V4, ChunkIdStrategy::BundlerDefault)]
fn test_chunk_id_decision(
    #[case] mode: BuildMode,
    #[case] bundler: BundlerMajor,
    #[case] expected: ChunkIdStrategy,
) {
    let decisions = VariantResolver::new(bundler)
        .resolve(&BuildVariant::default().with_mode(mode))
        .unwrap();
    assert_eq!(decisions.chunk_ids, expected);
}

#[test]
fn test_legacy_bundle_never_copies() {
    let resolver = VariantResolver::new(BundlerMajor::V5);
    let legacy = resolver.resolve(&BuildVariant::production().legacy()).unwrap();
    let modern = resolver.resolve(&BuildVariant::production().modern()).unwrap();

    assert!(!legacy.copy_public);
    assert!(modern.copy_public);
}
