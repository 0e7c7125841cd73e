use reqwest::StatusCode;
use thiserror::Error;

/// Problems with a search form, caught before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a job title or keyword")]
    MissingQuery,
    #[error("Please enter a location")]
    MissingLocation,
    #[error("Distance must be one of 5, 10, 15, 25, 50 or 100 miles (got {0})")]
    InvalidDistance(u32),
    #[error("Start date {from} is after end date {to}")]
    InvertedDateRange {
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    },
}

/// Failures of a call to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected our credentials; the session has been cleared.
    #[error("Session expired, please log in again")]
    Unauthorized,
    /// Login or signup was refused; no session was involved.
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Request failed with HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }

    /// HTTP status behind this error, when there was a response at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials(_) => {
                Some(StatusCode::UNAUTHORIZED)
            }
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::Conflict(_) => Some(StatusCode::CONFLICT),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Failures of the local session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("not logged in")]
    NotLoggedIn,
}

pub type ApiResult<T> = Result<T, ApiError>;
