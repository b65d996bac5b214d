//! Release asset selection.
//!
//! Two policies share the same filename-token heuristics:
//!
//! - **Curation** ([`prune_for_catalog`]) runs offline across every
//!   architecture. It keeps `.zip` archives, narrows noisy releases by plugin
//!   name, and leaves at most one asset per [`Bucket`].
//! - **Runtime** ([`select_for_architecture`]) picks the single asset that
//!   fits the current machine, or nothing.
//!
//! Neither policy treats "no match" as an error.

use std::collections::HashSet;

use crate::{
    arch::{Architecture, Bucket},
    types::Asset,
};

/// File extension of installable plugin archives.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Releases with at most this many archives are kept without name filtering.
pub const UNFILTERED_ARCHIVE_LIMIT: usize = 2;

/// Which policy to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Offline pruning for the catalog document.
    Curation { plugin_name: &'a str },
    /// Online selection for one architecture.
    Runtime { architecture: &'a Architecture },
}

/// Apply `mode` to `assets`.
///
/// Curation returns the pruned list; runtime returns zero or one asset.
pub fn resolve(assets: &[Asset], mode: Mode<'_>) -> Vec<Asset> {
    match mode {
        Mode::Curation { plugin_name } => prune_for_catalog(assets, plugin_name),
        Mode::Runtime { architecture } => select_for_architecture(assets, architecture)
            .cloned()
            .into_iter()
            .collect(),
    }
}

/// Prune a release's assets down to what the catalog should carry.
pub fn prune_for_catalog(assets: &[Asset], plugin_name: &str) -> Vec<Asset> {
    let archives: Vec<&Asset> = assets.iter().filter(|a| is_archive(a)).collect();

    let candidates: Vec<&Asset> = if archives.len() <= UNFILTERED_ARCHIVE_LIMIT {
        archives
    } else {
        archives
            .into_iter()
            .filter(|a| a.name_contains(plugin_name))
            .collect()
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|a| seen.insert(Bucket::of(a.name.as_deref().unwrap_or_default())))
        .cloned()
        .collect()
}

/// Pick the asset for `architecture`.
///
/// A lone asset is treated as universal unless its name carries the opposite
/// architecture token. Otherwise exactly one name must carry the
/// architecture's own token.
pub fn select_for_architecture<'a>(
    assets: &'a [Asset],
    architecture: &Architecture,
) -> Option<&'a Asset> {
    if let [only] = assets
        && let Some(opposite) = architecture.opposite()
        && only.name.is_some()
        && !only.name_contains(opposite.token())
    {
        return Some(only);
    }

    let mut matches = assets
        .iter()
        .filter(|a| a.name_contains(architecture.token()));
    let first = matches.next()?;
    matches.next().is_none().then_some(first)
}

fn is_archive(asset: &Asset) -> bool {
    asset
        .name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().ends_with(ARCHIVE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> Asset {
        Asset {
            name: Some(name.into()),
            url: Some(format!("https://example.com/{name}")),
            ..Default::default()
        }
    }

    fn names(assets: &[Asset]) -> Vec<&str> {
        assets.iter().filter_map(|a| a.name.as_deref()).collect()
    }

    // ── runtime ──────────────────────────────────────────────────────────

    #[test]
    fn runtime_empty_list_has_no_result() {
        assert!(select_for_architecture(&[], &Architecture::X64).is_none());
    }

    #[test]
    fn runtime_single_untagged_asset_is_universal() {
        let assets = [asset("GEmojiSharp.PowerToysRun-4.0.0.zip")];
        assert!(select_for_architecture(&assets, &Architecture::X64).is_some());
        assert!(select_for_architecture(&assets, &Architecture::Arm64).is_some());
    }

    #[test]
    fn runtime_single_asset_for_opposite_architecture_is_rejected() {
        let assets = [asset("GEmojiSharp.PowerToysRun-4.0.0-arm64.zip")];
        assert!(select_for_architecture(&assets, &Architecture::X64).is_none());
        assert!(select_for_architecture(&assets, &Architecture::Arm64).is_some());
    }

    #[test]
    fn runtime_picks_matching_token_among_many() {
        let assets = [
            asset("GEmojiSharp.PowerToysRun-4.0.0-x64.zip"),
            asset("GEmojiSharp.PowerToysRun-4.0.0-arm64.zip"),
        ];
        let picked = select_for_architecture(&assets, &Architecture::X64).unwrap();
        assert_eq!(
            picked.name.as_deref(),
            Some("GEmojiSharp.PowerToysRun-4.0.0-x64.zip")
        );
        let picked = select_for_architecture(&assets, &Architecture::Arm64).unwrap();
        assert_eq!(
            picked.name.as_deref(),
            Some("GEmojiSharp.PowerToysRun-4.0.0-arm64.zip")
        );
    }

    #[test]
    fn runtime_ambiguous_or_untagged_pair_has_no_result() {
        let untagged = [asset("Foo.zip"), asset("Bar.zip")];
        assert!(select_for_architecture(&untagged, &Architecture::X64).is_none());

        let doubled = [asset("Foo-x64.zip"), asset("Foo-x64-debug.zip")];
        assert!(select_for_architecture(&doubled, &Architecture::X64).is_none());
    }

    #[test]
    fn runtime_nameless_asset_never_resolves() {
        let assets = [Asset::default()];
        assert!(select_for_architecture(&assets, &Architecture::X64).is_none());
    }

    #[test]
    fn runtime_architecture_without_opposite_needs_its_token() {
        let assets = [asset("Tool.zip")];
        assert!(select_for_architecture(&assets, &Architecture::X86).is_none());
        let assets = [asset("Tool-x86.zip")];
        assert!(select_for_architecture(&assets, &Architecture::X86).is_some());
    }

    // ── curation ─────────────────────────────────────────────────────────

    #[test]
    fn curation_drops_non_archives() {
        let assets = [asset("Name.zip"), asset("Name.7z"), asset("checksums.txt")];
        assert_eq!(names(&prune_for_catalog(&assets, "Name")), ["Name.zip"]);
    }

    #[test]
    fn curation_archive_extension_ignores_case() {
        let assets = [asset("Name.ZIP")];
        assert_eq!(names(&prune_for_catalog(&assets, "Name")), ["Name.ZIP"]);
    }

    #[test]
    fn curation_keeps_up_to_two_archives_unfiltered() {
        let assets = [asset("Foo.zip"), asset("Bar-x64.zip")];
        assert_eq!(
            names(&prune_for_catalog(&assets, "Name")),
            ["Foo.zip", "Bar-x64.zip"]
        );
    }

    #[test]
    fn curation_filters_noisy_release_by_plugin_name() {
        let assets = [
            asset("Foo.zip"),
            asset("Bar.zip"),
            asset("Name-1.0.0-x64.zip"),
            asset("Name-1.0.0-arm64.zip"),
        ];
        assert_eq!(
            names(&prune_for_catalog(&assets, "Name")),
            ["Name-1.0.0-x64.zip", "Name-1.0.0-arm64.zip"]
        );
    }

    #[test]
    fn curation_keeps_first_asset_per_bucket() {
        let assets = [
            asset("Name-1.0.0-x64.zip"),
            asset("Name-1.0.0-X64-debug.zip"),
            asset("Name-1.0.0-arm64.zip"),
        ];
        assert_eq!(
            names(&prune_for_catalog(&assets, "Name")),
            ["Name-1.0.0-x64.zip", "Name-1.0.0-arm64.zip"]
        );
    }

    #[test]
    fn curation_two_untagged_archives_share_the_universal_bucket() {
        let assets = [asset("Foo.zip"), asset("Bar.zip")];
        assert_eq!(names(&prune_for_catalog(&assets, "Name")), ["Foo.zip"]);
    }

    #[test]
    fn resolve_dispatches_on_mode() {
        let assets = [asset("Name-x64.zip"), asset("Name-arm64.zip")];
        let pruned = resolve(&assets, Mode::Curation { plugin_name: "Name" });
        assert_eq!(pruned.len(), 2);

        let picked = resolve(&assets, Mode::Runtime {
            architecture: &Architecture::Arm64,
        });
        assert_eq!(names(&picked), ["Name-arm64.zip"]);
    }
}
