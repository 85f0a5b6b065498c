use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Blocked (403): the endpoint is rejecting automated requests")]
    Blocked,

    #[error("HTTP status {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("GraphQL error: {errors}")]
    GraphQlError { errors: serde_json::Value },

    #[error("Request failed: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Response could not be decoded: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Response is missing field: {path}")]
    MissingFieldError { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// How a failed fetch is classified before it collapses into an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    Blocked,
    HttpError,
    GraphQlError,
    NetworkFailure,
}

impl ScanError {
    /// Returns `None` for configuration and IO errors, which never come out of a fetch.
    pub fn fetch_failure(&self) -> Option<FetchFailure> {
        match self {
            ScanError::Blocked => Some(FetchFailure::Blocked),
            ScanError::HttpError { .. } => Some(FetchFailure::HttpError),
            ScanError::GraphQlError { .. } => Some(FetchFailure::GraphQlError),
            ScanError::NetworkFailure(_)
            | ScanError::DecodeError(_)
            | ScanError::MissingFieldError { .. } => Some(FetchFailure::NetworkFailure),
            ScanError::IoError(_)
            | ScanError::ConfigError { .. }
            | ScanError::InvalidConfigValueError { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
