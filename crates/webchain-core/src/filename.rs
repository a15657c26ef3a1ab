//! Output filename selection.

use crate::variant::VariantDecisions;

/// Content hash token appended to hashed filenames.
pub const CONTENT_HASH_TOKEN: &str = "[contenthash:8]";

/// Filename pattern shared by the primary bundle and its async chunks.
///
/// `js/[name]`, then `-legacy` for the legacy bundle, then `.[contenthash:8]`
/// when building for production with hashing enabled, then `.js`. The result
/// is placed under `assets_dir` when one is configured.
pub fn output_filename(decisions: &VariantDecisions, filename_hashing: bool, assets_dir: &str) -> String {
    let legacy = if decisions.legacy_bundle { "-legacy" } else { "" };
    let hash = if decisions.production && filename_hashing {
        format!(".{CONTENT_HASH_TOKEN}")
    } else {
        String::new()
    };
    asset_path(assets_dir, &format!("js/[name]{legacy}{hash}.js"))
}

/// POSIX-join `file` under `assets_dir`, or return it unchanged when no
/// assets directory is configured.
pub fn asset_path(assets_dir: &str, file: &str) -> String {
    let dir = assets_dir.trim_matches('/');
    if dir.is_empty() {
        return file.to_string();
    }
    webchain_fs::NormalizedPath::new(dir).join(file).to_string()
}
