use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An action was requested on a pair that lacks the data it needs.
    #[error("cannot {action}: {field} is missing")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },

    #[error("invalid plugin source '{location}': {source}")]
    InvalidSource {
        location: String,
        #[source]
        source: plugdex_common::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

impl Error {
    #[must_use]
    pub fn missing(action: &'static str, field: &'static str) -> Self {
        Self::MissingField { action, field }
    }

    #[must_use]
    pub fn invalid_source(location: impl Into<String>, source: plugdex_common::Error) -> Self {
        Self::InvalidSource {
            location: location.into(),
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
