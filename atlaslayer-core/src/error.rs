//! Error types for the Data API layer.
//!
//! Two families live here. [`TransportError`] is what a [`Transport`](crate::transport::Transport)
//! reports when a single call goes wrong; it never escapes a verb operation, because the
//! operation layer folds it into a [`Failure`](crate::response::Failure) value. [`DataApiError`]
//! covers construction-time problems (bad configuration, unbuildable clients) and is the only
//! error that callers see as an `Err`.

use serde_json::{Error as SerdeJsonError, Value};
use thiserror::Error;

/// A fault raised while issuing or decoding a single Data API call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    /// `payload` is the decoded error body, or the raw text if it was not JSON.
    #[error("Request failed with status {status}: {payload}")]
    Status { status: u16, payload: Value },
    /// The action endpoint could not be built from the base URL. Nothing was sent.
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
    /// The request never produced a response (DNS, TLS, refused connection, timeout).
    #[error("Connection error: {0}")]
    Connection(String),
    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// The request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TransportError {
    /// Returns the HTTP status code if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<SerdeJsonError> for TransportError {
    fn from(err: SerdeJsonError) -> Self {
        TransportError::Serialization(err.to_string())
    }
}

/// Errors raised while setting up a Data API client.
#[derive(Error, Debug)]
pub enum DataApiError {
    /// A required setting is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The transport could not be constructed.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A value could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A specialized `Result` type for client construction.
pub type DataApiResult<T> = Result<T, DataApiError>;

impl From<SerdeJsonError> for DataApiError {
    fn from(err: SerdeJsonError) -> Self {
        DataApiError::Serialization(err.to_string())
    }
}
