//! Error types and handling for the Weather Explorer proxy and client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Weather Explorer application
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The location query was missing or empty
    #[error("Invalid location query: {message}")]
    InvalidQuery { message: String },

    /// The weather provider answered with a non-success status
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        /// Provider's own explanation, e.g. `city not found`
        detail: Option<String>,
    },

    /// The proxy answered the client with a non-success status
    #[error("{message}")]
    Proxy { status: u16, message: String },

    /// Network-level failure talking to a remote service
    #[error("{source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// A response body could not be decoded
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Coarse classification of an [`ExplorerError`], reported to clients as the
/// `kind` field of an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    InvalidQuery,
    NotFound,
    Unauthorized,
    Upstream,
    Transport,
    Decode,
}

impl ExplorerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invalid query error
    pub fn invalid_query<S: Into<String>>(message: S) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a new upstream error; the message names only the status
    pub fn upstream(status: u16, detail: Option<String>) -> Self {
        Self::Upstream {
            status,
            message: status_message(status),
            detail,
        }
    }

    /// Create a new proxy error; the message names only the status
    pub fn proxy(status: u16) -> Self {
        Self::Proxy {
            status,
            message: status_message(status),
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Provider explanation carried by upstream failures
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            ExplorerError::Upstream { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExplorerError::Config { .. } => ErrorKind::Config,
            ExplorerError::InvalidQuery { .. } => ErrorKind::InvalidQuery,
            ExplorerError::Upstream { status, .. } | ExplorerError::Proxy { status, .. } => {
                match status {
                    404 => ErrorKind::NotFound,
                    401 | 403 => ErrorKind::Unauthorized,
                    _ => ErrorKind::Upstream,
                }
            }
            ExplorerError::Transport { .. } | ExplorerError::Io { .. } => ErrorKind::Transport,
            ExplorerError::Decode { .. } => ErrorKind::Decode,
        }
    }
}

fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}
