//! Loading the catalog source from a local path or a remote URL.

use std::path::Path;

use tracing::debug;

use crate::{
    error::{Error, Result},
    types::Catalog,
};

/// Where a catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation<'a> {
    File(&'a Path),
    Url(&'a str),
}

impl<'a> SourceLocation<'a> {
    /// Classify `location`: existing files win, then `http(s)://` URLs.
    pub fn classify(location: &'a str) -> Result<Self> {
        let path = Path::new(location);
        if path.is_file() {
            return Ok(Self::File(path));
        }
        if is_url(location) {
            return Ok(Self::Url(location));
        }
        Err(Error::InvalidSource(location.to_string()))
    }
}

fn is_url(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Read the raw text at `location`.
pub async fn load_content(client: &reqwest::Client, location: &str) -> Result<String> {
    match SourceLocation::classify(location)? {
        SourceLocation::File(path) => {
            debug!(path = %path.display(), "reading catalog source from disk");
            Ok(tokio::fs::read_to_string(path).await?)
        },
        SourceLocation::Url(url) => {
            debug!(%url, "fetching catalog source");
            let response = client
                .get(url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| Error::http(url, e))?;
            response.text().await.map_err(|e| Error::http(url, e))
        },
    }
}

/// Read and parse the catalog document at `location`.
pub async fn load_catalog(client: &reqwest::Client, location: &str) -> Result<Catalog> {
    let content = load_content(client, location).await?;
    Ok(Catalog::from_json(&content)?)
}
