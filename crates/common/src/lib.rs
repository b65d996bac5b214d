//! Shared catalog model and the resolution rules used by both the offline
//! curator and the runtime lifecycle resolver.

pub mod arch;
pub mod asset;
pub mod error;
pub mod source;
pub mod types;
pub mod version;

pub use {
    arch::{Architecture, Bucket},
    error::{Error, FromMessage, Result},
    types::{Asset, Catalog, InstalledMetadata, Plugin, Release, Repository, Theme},
    version::Version,
};
