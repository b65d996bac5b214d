//! Discover installed plugins from their `plugin.json` manifests.

use std::path::Path;

use {plugdex_common::InstalledMetadata, tracing::debug};

use crate::error::{Context, Result};

/// Manifest file each installed plugin carries in its own directory.
pub const MANIFEST_FILE: &str = "plugin.json";

/// Read `<plugins_dir>/*/plugin.json`.
///
/// The manifest's folder becomes the plugin directory. Folders without a
/// readable manifest are skipped. Results are sorted by directory so the
/// first-match join is stable.
pub fn discover(plugins_dir: &Path) -> Result<Vec<InstalledMetadata>> {
    let entries = std::fs::read_dir(plugins_dir)
        .with_context(|| format!("reading plugins directory {}", plugins_dir.display()))?;

    let mut installed = Vec::new();
    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        match read_manifest(&dir) {
            Ok(metadata) => installed.push(metadata),
            Err(e) => debug!(path = %dir.display(), error = %e, "skipping plugin directory"),
        }
    }
    installed.sort_by(|a, b| a.plugin_directory.cmp(&b.plugin_directory));
    Ok(installed)
}

fn read_manifest(dir: &Path) -> Result<InstalledMetadata> {
    let content = std::fs::read_to_string(dir.join(MANIFEST_FILE))?;
    let mut metadata: InstalledMetadata = serde_json::from_str(&content)?;
    metadata.plugin_directory = dir.to_path_buf();
    Ok(metadata)
}

/// Parse a host-supplied JSON array of installed plugin records.
pub fn from_json(content: &str) -> Result<Vec<InstalledMetadata>> {
    Ok(serde_json::from_str(content)?)
}
