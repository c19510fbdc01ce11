use thiserror::Error;

/// Failure of a single backend request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered 401; the session has already been torn down
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// Any other non-success HTTP status
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not what the endpoint promises
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
