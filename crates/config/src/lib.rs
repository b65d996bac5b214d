//! Configuration loading and env substitution.
//!
//! Config files: `plugdex.toml`, `plugdex.yaml`, or `plugdex.json`
//! Searched in `./` then `~/.config/plugdex/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{apply_env_overrides, config_dir, discover_and_load, find_config_file, load_config},
    schema::{CacheConfig, GitHubConfig, PlugdexConfig, RuntimeConfig, SourceConfig},
};
