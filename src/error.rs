use std::fmt;

/// Error types that can occur while labeling reviews or serving the chat
/// assistant.
#[derive(Debug)]
pub enum LensError {
    /// HTTP request/response errors
    HttpError(String),
    /// Authentication and authorization errors
    AuthError(String),
    /// Invalid request parameters or format
    InvalidRequest(String),
    /// Errors returned by a generation backend
    ProviderError(String),
    /// Response from a backend could not be decoded
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// The review table is missing, unreadable, or malformed
    DatasetError(String),
}

impl fmt::Display for LensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LensError::HttpError(e) => write!(f, "HTTP Error: {e}"),
            LensError::AuthError(e) => write!(f, "Auth Error: {e}"),
            LensError::InvalidRequest(e) => write!(f, "Invalid Request: {e}"),
            LensError::ProviderError(e) => write!(f, "Provider Error: {e}"),
            LensError::ResponseFormatError {
                message,
                raw_response,
            } => {
                write!(f, "Response Format Error: {message} (raw: {raw_response})")
            }
            LensError::DatasetError(e) => write!(f, "Dataset Error: {e}"),
        }
    }
}

impl std::error::Error for LensError {}

/// Converts reqwest HTTP errors into LensErrors
impl From<reqwest::Error> for LensError {
    fn from(err: reqwest::Error) -> Self {
        LensError::HttpError(err.to_string())
    }
}

/// Converts CSV read/write errors into LensErrors
impl From<csv::Error> for LensError {
    fn from(err: csv::Error) -> Self {
        LensError::DatasetError(err.to_string())
    }
}
