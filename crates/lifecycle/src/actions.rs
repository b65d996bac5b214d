//! Which actions a pair qualifies for, and the requests handed to the host.

use std::{fmt, path::PathBuf, str::FromStr};

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    tracing::info,
};

use crate::{
    error::{Error, Result},
    pair::Pair,
};

/// Per-plugin actions, in the order they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginAction {
    Install,
    Update,
    Uninstall,
    OpenRepo,
    OpenReleaseNotes,
    OpenFolder,
    /// Primary action on a result; not part of the context list.
    OpenWebsite,
}

impl PluginAction {
    pub const ALL: [Self; 7] = [
        Self::Install,
        Self::Update,
        Self::Uninstall,
        Self::OpenRepo,
        Self::OpenReleaseNotes,
        Self::OpenFolder,
        Self::OpenWebsite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Uninstall => "uninstall",
            Self::OpenRepo => "open-repo",
            Self::OpenReleaseNotes => "open-release-notes",
            Self::OpenFolder => "open-folder",
            Self::OpenWebsite => "open-website",
        }
    }

    /// Menu label as shown by a launcher.
    pub fn title(self) -> &'static str {
        match self {
            Self::Install => "Install plugin",
            Self::Update => "Update plugin",
            Self::Uninstall => "Uninstall plugin",
            Self::OpenRepo => "Open repo",
            Self::OpenReleaseNotes => "Open release notes",
            Self::OpenFolder => "Open plugin folder",
            Self::OpenWebsite => "Open website",
        }
    }
}

impl fmt::Display for PluginAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Message(format!("unknown action '{s}'")))
    }
}

/// Context actions `pair` qualifies for.
pub fn available_actions(pair: &Pair) -> Vec<PluginAction> {
    [
        (PluginAction::Install, pair.is_install_available()),
        (PluginAction::Update, pair.is_update_available()),
        (PluginAction::Uninstall, pair.is_installed()),
        (PluginAction::OpenRepo, pair.has_repository()),
        (PluginAction::OpenReleaseNotes, pair.has_release_notes()),
        (PluginAction::OpenFolder, pair.is_installed()),
    ]
    .into_iter()
    .filter_map(|(action, eligible)| eligible.then_some(action))
    .collect()
}

/// Exactly what the host needs to carry out an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ActionRequest {
    Install {
        asset_url: String,
    },
    Update {
        asset_url: String,
        plugin_directory: PathBuf,
    },
    Uninstall {
        plugin_directory: PathBuf,
    },
    OpenUrl {
        url: String,
    },
    OpenFolder {
        plugin_directory: PathBuf,
    },
}

impl ActionRequest {
    /// Build the request for `action`, failing if a required field is empty.
    pub fn for_pair(pair: &Pair, action: PluginAction) -> Result<Self> {
        let verb = action.as_str();
        Ok(match action {
            PluginAction::Install => Self::Install {
                asset_url: asset_url(pair, verb)?,
            },
            PluginAction::Update => Self::Update {
                asset_url: asset_url(pair, verb)?,
                plugin_directory: plugin_directory(pair, verb)?,
            },
            PluginAction::Uninstall => Self::Uninstall {
                plugin_directory: plugin_directory(pair, verb)?,
            },
            PluginAction::OpenFolder => Self::OpenFolder {
                plugin_directory: plugin_directory(pair, verb)?,
            },
            PluginAction::OpenRepo => Self::OpenUrl {
                url: non_blank(
                    pair.plugin.repository.as_ref().and_then(|r| r.url.as_deref()),
                    verb,
                    "repository url",
                )?,
            },
            PluginAction::OpenReleaseNotes => Self::OpenUrl {
                url: non_blank(
                    pair.plugin.release.as_ref().and_then(|r| r.url.as_deref()),
                    verb,
                    "release url",
                )?,
            },
            PluginAction::OpenWebsite => Self::OpenUrl {
                url: non_blank(pair.plugin.website.as_deref(), verb, "website")?,
            },
        })
    }
}

fn non_blank(value: Option<&str>, action: &'static str, field: &'static str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::missing(action, field))
}

fn asset_url(pair: &Pair, action: &'static str) -> Result<String> {
    non_blank(
        pair.asset().and_then(|a| a.url.as_deref()),
        action,
        "asset url",
    )
}

fn plugin_directory(pair: &Pair, action: &'static str) -> Result<PathBuf> {
    pair.metadata
        .as_ref()
        .map(|m| m.plugin_directory.clone())
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| Error::missing(action, "plugin directory"))
}

/// Carries out requests on the host (shell, browser, file manager).
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(&self, request: &ActionRequest) -> Result<()>;
}

/// Validate preconditions, then hand the request to `executor`.
///
/// The executor is never called when a required field is missing.
pub async fn dispatch(
    executor: &dyn ActionExecutor,
    pair: &Pair,
    action: PluginAction,
) -> Result<ActionRequest> {
    let request = ActionRequest::for_pair(pair, action)?;
    info!(
        plugin = pair.plugin.display_name(),
        %action,
        "dispatching plugin action"
    );
    executor.execute(&request).await?;
    Ok(request)
}
