//! A catalog plugin joined with what is installed locally.

use plugdex_common::{
    Architecture, Asset, InstalledMetadata, Plugin, asset::select_for_architecture,
    version::is_newer,
};

/// Keyword appended to the searchable text of plugins with a pending update.
pub const OUTDATED_KEYWORD: &str = "outdated";

/// The unit lifecycle flags and ranking are computed on.
///
/// Every flag is derived from the fields on demand; nothing here performs
/// I/O or caches a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub plugin: Plugin,
    /// Present exactly when the plugin is installed.
    pub metadata: Option<InstalledMetadata>,
    /// Set by the query ranker; zero excludes the pair from results.
    pub score: i64,
    /// Machine architecture used to pick the release asset.
    pub architecture: Architecture,
}

impl Pair {
    pub fn new(
        plugin: Plugin,
        metadata: Option<InstalledMetadata>,
        architecture: Architecture,
    ) -> Self {
        Self {
            plugin,
            metadata,
            score: 0,
            architecture,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn is_not_installed(&self) -> bool {
        !self.is_installed()
    }

    /// The release asset for this machine, if exactly one fits.
    pub fn asset(&self) -> Option<&Asset> {
        let release = self.plugin.release.as_ref()?;
        select_for_architecture(&release.assets, &self.architecture)
    }

    pub fn is_install_available(&self) -> bool {
        self.is_not_installed() && self.asset().is_some()
    }

    /// Installed, an asset resolves, and the release tag is strictly newer
    /// than the installed version.
    pub fn is_update_available(&self) -> bool {
        let Some(metadata) = &self.metadata else {
            return false;
        };
        if self.asset().is_none() {
            return false;
        }
        self.plugin
            .release
            .as_ref()
            .and_then(|r| r.tag_name.as_deref())
            .is_some_and(|tag| is_newer(tag, &metadata.version))
    }

    pub fn has_repository(&self) -> bool {
        self.plugin
            .repository
            .as_ref()
            .and_then(|r| r.url.as_deref())
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub fn has_release_notes(&self) -> bool {
        self.plugin
            .release
            .as_ref()
            .and_then(|r| r.url.as_deref())
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub fn has_website(&self) -> bool {
        self.plugin
            .website
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Text the query ranker matches against.
    pub fn queryable(&self) -> String {
        let plugin = &self.plugin;
        format!(
            "{} {} {} {}",
            plugin.name.as_deref().unwrap_or_default(),
            plugin.description.as_deref().unwrap_or_default(),
            plugin.author.as_deref().unwrap_or_default(),
            if self.is_update_available() {
                OUTDATED_KEYWORD
            } else {
                ""
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        plugdex_common::{Release, Repository},
    };

    fn asset(name: &str) -> Asset {
        Asset {
            name: Some(name.into()),
            url: Some(format!("https://example.com/{name}")),
            ..Default::default()
        }
    }

    fn plugin(tag: &str, assets: Vec<Asset>) -> Plugin {
        Plugin {
            id: Some("A1".into()),
            name: Some("Name".into()),
            description: Some("Description".into()),
            author: Some("Author".into()),
            website: Some("https://github.com/o/r".into()),
            repository: Some(Repository {
                url: Some("https://github.com/o/r".into()),
                ..Default::default()
            }),
            release: Some(Release {
                url: Some("https://github.com/o/r/releases/tag/v1".into()),
                tag_name: Some(tag.into()),
                assets,
                ..Default::default()
            }),
        }
    }

    fn installed(version: &str) -> InstalledMetadata {
        InstalledMetadata {
            id: "a1".into(),
            name: "Name".into(),
            version: version.into(),
            plugin_directory: "/plugins/Name".into(),
            ..Default::default()
        }
    }

    #[test]
    fn update_available_when_tag_is_newer() {
        let pair = Pair::new(
            plugin("v1.1.0", vec![asset("Test-1.1.0-x64.zip")]),
            Some(installed("1.0.0")),
            Architecture::X64,
        );
        assert!(pair.is_installed());
        assert!(pair.is_update_available());
        assert!(!pair.is_install_available());
    }

    #[test]
    fn no_update_when_versions_match() {
        let pair = Pair::new(
            plugin("v1.1.0", vec![asset("Test-1.1.0-x64.zip")]),
            Some(installed("1.1.0")),
            Architecture::X64,
        );
        assert!(!pair.is_update_available());
    }

    #[test]
    fn not_installed_with_asset_offers_install() {
        let pair = Pair::new(
            plugin("v1.1.0", vec![asset("Test-1.1.0-x64.zip")]),
            None,
            Architecture::X64,
        );
        assert!(pair.is_not_installed());
        assert!(pair.is_install_available());
        assert!(!pair.is_update_available());
    }

    #[test]
    fn malformed_versions_resolve_to_minimum() {
        let pair = Pair::new(
            plugin("foo", vec![asset("Test.zip")]),
            Some(installed("bar")),
            Architecture::X64,
        );
        assert!(!pair.is_update_available());

        let pair = Pair::new(
            plugin("v2.0.0", vec![asset("Test.zip")]),
            Some(installed("bar")),
            Architecture::X64,
        );
        assert!(pair.is_update_available());
    }

    #[test]
    fn unresolvable_asset_blocks_install_and_update() {
        let assets = vec![asset("Test-x64.zip"), asset("Other-x64.zip")];
        let pair = Pair::new(plugin("v2.0.0", assets.clone()), None, Architecture::X64);
        assert!(pair.asset().is_none());
        assert!(!pair.is_install_available());

        let pair = Pair::new(
            plugin("v2.0.0", assets),
            Some(installed("1.0.0")),
            Architecture::X64,
        );
        assert!(!pair.is_update_available());
    }

    #[test]
    fn lone_asset_for_other_architecture_is_rejected() {
        let pair = Pair::new(
            plugin("v1.0.0", vec![asset("Test-arm64.zip")]),
            None,
            Architecture::X64,
        );
        assert!(!pair.is_install_available());
    }

    #[test]
    fn queryable_marks_outdated_plugins() {
        let outdated = Pair::new(
            plugin("v1.1.0", vec![asset("Test-1.1.0-x64.zip")]),
            Some(installed("1.0.0")),
            Architecture::X64,
        );
        assert_eq!(outdated.queryable(), "Name Description Author outdated");

        let current = Pair::new(
            plugin("v1.1.0", vec![asset("Test-1.1.0-x64.zip")]),
            Some(installed("1.1.0")),
            Architecture::X64,
        );
        assert_eq!(current.queryable(), "Name Description Author ");
    }

    #[test]
    fn link_flags_require_non_blank_urls() {
        let mut pair = Pair::new(plugin("v1", vec![]), None, Architecture::X64);
        assert!(pair.has_repository());
        assert!(pair.has_release_notes());
        assert!(pair.has_website());

        pair.plugin.repository = Some(Repository {
            url: Some("  ".into()),
            ..Default::default()
        });
        pair.plugin.release = None;
        pair.plugin.website = None;
        assert!(!pair.has_repository());
        assert!(!pair.has_release_notes());
        assert!(!pair.has_website());
    }
}
