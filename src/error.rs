//! Error type definitions.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// A `Result` alias where the `Err` case is `taskmind_auth::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the TaskMind auth client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Missing project id")]
    MissingProjectId,
    #[error("Invalid project id (make sure there are no invalid characters)")]
    InvalidProjectId,
    #[error("Failed to setup HTTP client: {0}")]
    HttpClientSetup(reqwest::Error),
    #[error("Failed to deserialize response: {0}")]
    Deserialize(reqwest::Error),
    #[error("Http error: {0}")]
    Http(reqwest::Error),
    #[error(transparent)]
    Auth(AuthServiceError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(url::ParseError),
}

/// An error returned by the authentication service.
///
/// The service does not distinguish sub-cases for the client: an unknown
/// email, an expired code and a rate limit all surface as this one type.
#[derive(Deserialize, Debug)]
pub struct AuthServiceError {
    #[serde(skip)]
    pub status: u16,
    #[serde(skip)]
    pub method: http::Method,
    #[serde(skip)]
    pub path: String,
    pub message: Option<String>,
}

impl AuthServiceError {
    pub(crate) fn new(
        status: u16,
        method: http::Method,
        path: String,
        message: Option<String>,
    ) -> Self {
        Self {
            status,
            method,
            path,
            message,
        }
    }
}

impl std::error::Error for AuthServiceError {}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = self.message.as_ref() {
            write!(
                f,
                "Received {} on {} {}: {}",
                self.status, self.method, self.path, msg
            )
        } else {
            write!(
                f,
                "Received {} on {} {}",
                self.status, self.method, self.path
            )
        }
    }
}

/// A problem with the persisted session snapshot. Always recovered locally
/// (fall back to the default state on load, log and continue on save), never
/// propagated to callers.
#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("Failed to access session snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse session snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}
