use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for Shutterbox API operations
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by the server, either through the response envelope
    /// or as a bare HTTP failure status
    #[error("code {code}: {message}")]
    Api { code: i32, message: String },

    /// Upload rejected because a byte-identical photo already exists
    #[error("duplicate photo, code {code}: {message}")]
    Duplicate { code: i32, message: String },

    /// HTTP 404 from the server (resource not found)
    #[error("HTTP error {status}: {reason}")]
    NotFound { status: u16, reason: String },

    /// POST issued without OAuth credentials
    #[error("cannot issue POST without OAuth tokens")]
    AuthRequired,

    /// Endpoint or variant not supported by this client
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Client configuration problem
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a generic API error from a bare HTTP failure status
    pub fn from_status(status: StatusCode) -> Self {
        Error::Api {
            code: status.as_u16() as i32,
            message: format!(
                "HTTP error: {}",
                status.canonical_reason().unwrap_or("unknown")
            ),
        }
    }

    /// Create a not-found error from an HTTP 404 status
    pub fn not_found(status: StatusCode) -> Self {
        Error::NotFound {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        }
    }

    /// Check if this error was reported by the server API.
    ///
    /// Duplicate-photo errors are a refinement of the API error kind,
    /// so this returns true for them as well.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. } | Error::Duplicate { .. })
    }

    /// Check if this error is the duplicate-photo refinement
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::Duplicate { .. })
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Get the server-reported code, if this error carries one
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Api { code, .. } => Some(*code),
            Error::Duplicate { code, .. } => Some(*code),
            Error::NotFound { status, .. } => Some(*status as i32),
            _ => None,
        }
    }
}

/// Result type for Shutterbox operations
pub type Result<T> = std::result::Result<T, Error>;
