//! Offline catalog curation.
//!
//! Reads a seed catalog, enriches every plugin with repository and latest
//! release metadata from GitHub, prunes release assets to the archives a
//! launcher can install, reports missing fields, and publishes the result.

pub mod curate;
pub mod error;
pub mod github;
pub mod map;
pub mod validate;

pub use {
    curate::{CuratedCatalog, Curator, PluginReport, publish, run},
    error::{Error, Result},
    github::{GitHubApi, GitHubClient, RepoRef},
};
