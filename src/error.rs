//! Error handling for the LIMS client

use std::fmt;
use thiserror::Error;

/// Fallback text when the server fails without saying why
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Unified error type for the LIMS client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Session storage errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input rejected before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server answered with an error payload or a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Server-provided error string, or [`UNKNOWN_ERROR`]
        message: String,
    },

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// An action for the same request is still outstanding
    #[error("Request {0} is already being processed")]
    Busy(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new API error
    pub fn api<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Api {
            status,
            message: msg.to_string(),
        }
    }

    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Whether the server could not be reached at all
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Text shown inline next to the form or table that triggered the call.
    ///
    /// Connectivity failures always name the endpoint the client expected
    /// to reach; server errors are passed through verbatim.
    pub fn user_message(&self, base_url: &str) -> String {
        match self {
            Error::Http(_) => format!(
                "Network error. Make sure the backend is running on {}",
                base_url
            ),
            Error::Api { message, .. } => message.clone(),
            Error::Validation(msg) | Error::Auth(msg) | Error::General(msg) => msg.clone(),
            Error::Busy(id) => format!("Request {} is already being processed", id),
            Error::Json(_) => UNKNOWN_ERROR.to_string(),
            Error::Url(e) => format!("Invalid server address: {}", e),
            Error::Io(e) => format!("Local storage error: {}", e),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
