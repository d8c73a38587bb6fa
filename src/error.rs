//! Error types for the I/O surfaces of `marine-telex`
//!
//! The decoder and renderer are total and never fail; only configuration,
//! catalog/station loading and the network collaborators report errors.

use thiserror::Error;

/// Main error type for the `marine-telex` library
#[derive(Error, Debug)]
pub enum TelexError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport-level failure talking to a remote host
    #[error("Network error: {message}")]
    Network { message: String },

    /// Remote host answered with something other than 200 OK
    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// A response body or data file could not be parsed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Localization catalog or station table could not be loaded
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TelexError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn http_status<S: Into<String>>(url: S, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TelexError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TelexError::Network { .. } => {
                "Unable to reach the remote host. Please check your internet connection."
                    .to_string()
            }
            TelexError::HttpStatus { url, status } => {
                format!("The server refused {url} with status {status}")
            }
            TelexError::Parse { message } => format!("Malformed data: {message}"),
            TelexError::Catalog { message } => {
                format!("Could not load translations or stations: {message}")
            }
            TelexError::Io { .. } => {
                "File operation failed. Please check the path and file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for TelexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TelexError::parse(err.to_string())
        } else {
            TelexError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TelexError {
    fn from(err: serde_json::Error) -> Self {
        TelexError::parse(err.to_string())
    }
}
