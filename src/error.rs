use crate::models::ListingKind;
use thiserror::Error;

/// Everything that can end a scrape invocation.
///
/// Per-card problems never show up here: the extractor logs and skips them.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("browser error: {0}")]
    Browser(String),

    #[error("No cards container found on the page")]
    ContainerNotFound,

    #[error("No {kind} listings found in the cards container")]
    NoListings { kind: ListingKind },

    #[error("No valid {kind} data could be extracted")]
    NoValidRecords { kind: ListingKind },

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub(crate) fn browser(context: &str, err: impl std::fmt::Display) -> Self {
        ScrapeError::Browser(format!("{context}: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
