use std::path::PathBuf;

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

// ── Catalog document ─────────────────────────────────────────────────────────

/// The curated catalog document, serialized as `{"Plugins": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Catalog {
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

impl Catalog {
    pub fn new(plugins: Vec<Plugin>) -> Self {
        Self { plugins }
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A cataloged plugin.
///
/// The seed fields (`ID`, `Name`, `Description`, `Author`, `Website`) are
/// hand-maintained; `Repository` and `Release` are filled in by curation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Plugin {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub repository: Option<Repository>,
    #[serde(default)]
    pub release: Option<Release>,
}

impl Plugin {
    /// Case-insensitive identity match against an installed plugin ID.
    pub fn has_id(&self, id: &str) -> bool {
        self.id
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(id))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Repository {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Release {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assets: Vec<Asset>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A downloadable release artifact. Identity within a release is its file name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Case-insensitive substring test against the file name.
    ///
    /// An asset without a name never matches.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| contains_ignore_case(name, needle))
    }
}

// ── Host-supplied metadata ───────────────────────────────────────────────────

/// What the host reports about a physically installed plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstalledMetadata {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub plugin_directory: PathBuf,
    #[serde(default)]
    pub ico_path_dark: String,
    #[serde(default)]
    pub ico_path_light: String,
}

/// Host colour theme, used to pick light or dark icon variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    HighContrastWhite,
    HighContrastBlack,
}

impl Theme {
    pub fn is_light(self) -> bool {
        matches!(self, Self::Light | Self::HighContrastWhite)
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "high_contrast_white" => Ok(Self::HighContrastWhite),
            "high_contrast_black" => Ok(Self::HighContrastBlack),
            other => Err(crate::error::Error::message(format!("unknown theme '{other}'"))),
        }
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
