use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Source(#[from] plugdex_common::Error),

    /// A catalog seed carries a website that is not a GitHub repository URL.
    #[error("invalid website '{url}': {reason}")]
    InvalidWebsite { url: String, reason: String },

    #[error("{resource} not found for {owner}/{repo}")]
    NotFound {
        resource: &'static str,
        owner: String,
        repo: String,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("curation cancelled")]
    Cancelled,

    #[error("{0}")]
    Message(String),
}

impl Error {
    #[must_use]
    pub fn invalid_website(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidWebsite {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }
}

impl plugdex_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

plugdex_common::impl_context!();
