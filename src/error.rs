use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} rejected the API key (unauthorized, HTTP {status}): {body}")]
    Unauthorized {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    ApiStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint} returned error {code}: {description}")]
    Api {
        endpoint: String,
        code: i64,
        description: String,
    },

    #[error("Unexpected {endpoint} response shape: {reason}")]
    Schema { endpoint: String, reason: String },

    #[error("Nothing to pick at the {stage} stage")]
    NoCandidates { stage: &'static str },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    #[error("Expectation failed: {reason}")]
    Expectation { reason: String },

    #[error("No element matches {locator}")]
    ElementNotFound { locator: String },

    #[error("Element for {locator} changed before it could be used")]
    StaleElement { locator: String },

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl QaError {
    /// HTTP status carried by the error, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::ApiStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

pub type Result<T> = std::result::Result<T, QaError>;
