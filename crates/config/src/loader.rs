use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::PlugdexConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "plugdex.toml",
    "plugdex.yaml",
    "plugdex.yml",
    "plugdex.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<PlugdexConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./plugdex.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/plugdex/plugdex.{toml,yaml,yml,json}` (user-global)
///
/// Falls back to defaults when nothing is found or the file is broken, then
/// applies environment overrides.
pub fn discover_and_load() -> PlugdexConfig {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                PlugdexConfig::default()
            })
        },
        None => {
            debug!("no config file found, using defaults");
            PlugdexConfig::default()
        },
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Apply `PLUGDEX_SOURCE` and `PLUGDEX_GITHUB_TOKEN`.
pub fn apply_env_overrides(config: &mut PlugdexConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(source) = lookup("PLUGDEX_SOURCE").filter(|s| !s.trim().is_empty()) {
        config.source.location = source;
    }
    if let Some(token) = lookup("PLUGDEX_GITHUB_TOKEN").filter(|s| !s.trim().is_empty()) {
        config.github.token = Some(Secret::new(token));
    }
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .or_else(|| {
            let dir = config_dir()?;
            CONFIG_FILENAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|p| p.exists())
        })
}

/// Returns the user-global config directory (`~/.config/plugdex/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "plugdex").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> Result<PlugdexConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse(path, e)),
        _ => Err(Error::UnsupportedFormat(ext.to_string())),
    }
}
