use thiserror::Error;

use crate::options::OptionError;

/// Failures reported by a [`crate::http::adapter::SubmissionAdapter`].
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response is missing {0}")]
    MissingData(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Failures of a form session. None of them end the session.
#[derive(Error, Debug)]
pub enum DraftError {
    #[error(transparent)]
    Option(#[from] OptionError),

    #[error("{0}")]
    Validation(String),

    #[error("A submission is already in progress")]
    InFlight,

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl DraftError {
    pub fn validation(message: impl Into<String>) -> Self {
        DraftError::Validation(message.into())
    }
}
