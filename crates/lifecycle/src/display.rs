//! Host-facing presentation: tooltips, sizes and themed icons.

use std::path::PathBuf;

use plugdex_common::{Asset, InstalledMetadata, Release, Repository, Theme};

use crate::pair::Pair;

const SIZE_SUFFIXES: [&str; 4] = ["bytes", "KB", "MB", "GB"];

/// Human-readable size with a 1024 base, e.g. `1 KB`, `2 GB`.
pub fn format_size(bytes: i64) -> String {
    if bytes < 0 {
        return format!("-{}", format_size(bytes.saturating_neg()));
    }

    let mut value = bytes as f64;
    let mut index = 0;
    while value.round() >= 1000.0 && index < SIZE_SUFFIXES.len() - 1 {
        value /= 1024.0;
        index += 1;
    }
    format!("{} {}", group_thousands(value.round() as u64), SIZE_SUFFIXES[index])
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn metadata_tooltip(metadata: &InstalledMetadata) -> String {
    format!(
        "Installed: {} {}\n📁 {}",
        metadata.name,
        metadata.version,
        metadata.plugin_directory.display()
    )
}

pub fn repository_tooltip(repository: &Repository) -> String {
    format!(
        "Repo: {}\n{}\n{}\n🤩 {} stars\n🔱 {} forks",
        repository.full_name.as_deref().unwrap_or_default(),
        repository.description.as_deref().unwrap_or_default(),
        repository.topics.as_deref().unwrap_or_default().join(" | "),
        repository.stargazers_count,
        repository.forks_count,
    )
}

/// `asset` is the one resolved for the current machine, if any.
pub fn release_tooltip(release: &Release, asset: Option<&Asset>) -> String {
    format!(
        "Release: {}\n{}",
        release.tag_name.as_deref().unwrap_or_default(),
        asset.map(asset_tooltip).unwrap_or_default()
    )
}

pub fn asset_tooltip(asset: &Asset) -> String {
    format!(
        "{} | 📦 {} | 💾 {} downloads",
        asset.name.as_deref().unwrap_or_default(),
        format_size(asset.size),
        asset.download_count
    )
}

impl Pair {
    pub fn tooltip_title(&self) -> &str {
        self.plugin.name.as_deref().unwrap_or_default()
    }

    pub fn tooltip_text(&self) -> String {
        let installed = self
            .metadata
            .as_ref()
            .map_or_else(|| "Installed: ❌".to_string(), metadata_tooltip);
        let repository = self
            .plugin
            .repository
            .as_ref()
            .map(repository_tooltip)
            .unwrap_or_default();
        let release = self
            .plugin
            .release
            .as_ref()
            .map(|r| release_tooltip(r, self.asset()))
            .unwrap_or_default();
        format!("{installed}\n\n{repository}\n\n{release}")
    }
}

/// Icon shown for plugins that are not installed.
pub fn default_icon(theme: Theme) -> &'static str {
    if theme.is_light() {
        "Images/install.light.png"
    } else {
        "Images/install.dark.png"
    }
}

/// Icon for `pair` under `theme`.
///
/// Installed plugins use their own icon from the plugin directory.
pub fn icon_path(pair: &Pair, theme: Theme) -> PathBuf {
    match &pair.metadata {
        Some(metadata) => {
            let icon = if theme.is_light() {
                &metadata.ico_path_light
            } else {
                &metadata.ico_path_dark
            };
            metadata.plugin_directory.join(icon)
        },
        None => PathBuf::from(default_icon(theme)),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        plugdex_common::{Architecture, Plugin},
    };

    #[test]
    fn formats_sizes_with_binary_units() {
        assert_eq!(format_size(-1), "-1 bytes");
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1), "1 bytes");
        assert_eq!(format_size(999), "999 bytes");
        assert_eq!(format_size(1000), "1 KB");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1024 * 1024), "1 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1 GB");
        assert_eq!(format_size(i64::from(i32::MAX)), "2 GB");
        assert_eq!(format_size(2_000 * 1024 * 1024 * 1024), "2,000 GB");
    }

    #[test]
    fn empty_records_still_render() {
        assert!(!metadata_tooltip(&InstalledMetadata::default()).is_empty());
        assert!(!repository_tooltip(&Repository::default()).is_empty());
        assert!(!release_tooltip(&Release::default(), None).is_empty());
        assert!(!asset_tooltip(&Asset::default()).is_empty());

        let pair = Pair::new(Plugin::default(), None, Architecture::X64);
        assert_eq!(pair.tooltip_title(), "");
        assert!(pair.tooltip_text().starts_with("Installed: ❌"));
    }

    #[test]
    fn release_tooltip_includes_resolved_asset() {
        let asset = Asset {
            name: Some("Demo-x64.zip".into()),
            size: 2048,
            download_count: 7,
            ..Default::default()
        };
        let release = Release {
            tag_name: Some("v1.2.0".into()),
            assets: vec![asset.clone()],
            ..Default::default()
        };
        assert_eq!(
            release_tooltip(&release, Some(&asset)),
            "Release: v1.2.0\nDemo-x64.zip | 📦 2 KB | 💾 7 downloads"
        );
    }

    #[test]
    fn repository_tooltip_joins_topics() {
        let repository = Repository {
            full_name: Some("o/demo".into()),
            description: Some("Demo plugin".into()),
            topics: Some(vec!["powertoys".into(), "run".into()]),
            stargazers_count: 3,
            forks_count: 1,
            ..Default::default()
        };
        assert_eq!(
            repository_tooltip(&repository),
            "Repo: o/demo\nDemo plugin\npowertoys | run\n🤩 3 stars\n🔱 1 forks"
        );
    }

    #[test]
    fn icon_follows_theme_and_install_state() {
        let metadata = InstalledMetadata {
            plugin_directory: PathBuf::from("/plugins/Demo"),
            ico_path_dark: "Images/demo.dark.png".into(),
            ico_path_light: "Images/demo.light.png".into(),
            ..Default::default()
        };
        let installed = Pair::new(Plugin::default(), Some(metadata), Architecture::X64);
        assert_eq!(
            icon_path(&installed, Theme::HighContrastWhite),
            PathBuf::from("/plugins/Demo/Images/demo.light.png")
        );
        assert_eq!(
            icon_path(&installed, Theme::HighContrastBlack),
            PathBuf::from("/plugins/Demo/Images/demo.dark.png")
        );

        let available = Pair::new(Plugin::default(), None, Architecture::X64);
        assert_eq!(
            icon_path(&available, Theme::Light),
            PathBuf::from("Images/install.light.png")
        );
        assert_eq!(
            icon_path(&available, Theme::Dark),
            PathBuf::from("Images/install.dark.png")
        );
    }
}
