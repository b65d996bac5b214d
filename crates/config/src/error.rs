use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("unsupported config format: .{0}")]
    UnsupportedFormat(String),
}

impl Error {
    #[must_use]
    pub fn parse(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
