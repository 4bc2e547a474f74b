//! Response envelope and normalization.
//!
//! Every verb in [`operations`](crate::operations) returns an [`OperationResult`]: the raw
//! server payload, or a [`Failure`] built from whatever went wrong. The collection binding
//! then runs that through [`Response::normalize`], the single place where the server's
//! heterogeneous shapes collapse into one of:
//!
//! - a list of documents (the server's `{"documents": [...]}` envelope, unwrapped),
//! - a single document or scalar acknowledgment, passed through unchanged,
//! - a per-chunk batch of the above (bulk inserts),
//! - a `{code, error}` failure descriptor.
//!
//! Failures are values here, not errors. Callers branch on the variant.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, from_value};

use crate::error::TransportError;

/// The key under which the server wraps list results.
pub const DOCUMENTS_KEY: &str = "documents";

/// A failure descriptor: `{code, error}`.
///
/// `code` is the HTTP status when the server produced one, and `None` for faults that
/// never reached a response (connection errors, undecodable bodies). Server-reported
/// errors and transport faults share this shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Failure {
    pub code: Option<u16>,
    pub error: Value,
}

impl Failure {
    pub fn new(code: Option<u16>, error: impl Into<Value>) -> Self {
        Self { code, error: error.into() }
    }
}

impl From<TransportError> for Failure {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, payload } => Failure::new(Some(status), payload),
            other => Failure::new(None, other.to_string()),
        }
    }
}

/// Result type returned by every generic verb.
pub type OperationResult<T = Value> = Result<T, Failure>;

/// The normalized shape handed to callers of a collection binding.
///
/// Serializes untagged, so a `Documents` renders as a JSON array, a `Value` as itself,
/// a `Batch` as an array of its members and a `Failure` as `{"code": .., "error": ..}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Response {
    /// A list of documents unwrapped from the server's list envelope.
    Documents(Vec<Value>),
    /// A single document, acknowledgment or scalar, unchanged.
    Value(Value),
    /// Per-chunk results of a bulk insert, in submission order.
    Batch(Vec<Response>),
    /// A captured failure.
    Failure(Failure),
}

impl Response {
    /// Collapses a raw operation result into its normalized shape.
    ///
    /// A failure never has its payload inspected for a `documents` key. A bare array is
    /// treated as an already-unwrapped list, which makes normalization idempotent. A
    /// `documents` key that is absent or `null` leaves the whole mapping in place.
    pub fn normalize(raw: OperationResult) -> Self {
        match raw {
            Err(failure) => Response::Failure(failure),
            Ok(Value::Object(map)) if matches!(map.get(DOCUMENTS_KEY), None | Some(Value::Null)) => {
                Response::Value(Value::Object(map))
            }
            Ok(Value::Object(mut map)) => match map.remove(DOCUMENTS_KEY) {
                Some(Value::Array(documents)) => Response::Documents(documents),
                Some(other) => Response::Value(other),
                None => Response::Value(Value::Object(map)),
            },
            Ok(Value::Array(documents)) => Response::Documents(documents),
            Ok(other) => Response::Value(other),
        }
    }

    /// Normalizes each chunk result independently, preserving order.
    pub fn normalize_batch(raw: Vec<OperationResult>) -> Self {
        Response::Batch(raw.into_iter().map(Response::normalize).collect())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failure(_))
    }

    /// Returns the failure descriptor, if this is one.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Response::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns the unwrapped document list, if this is one.
    pub fn documents(&self) -> Option<&[Value]> {
        match self {
            Response::Documents(documents) => Some(documents),
            _ => None,
        }
    }

    /// Failures found in a batch (or this response itself, if it is one).
    pub fn failures(&self) -> Vec<&Failure> {
        match self {
            Response::Failure(failure) => vec![failure],
            Response::Batch(items) => items.iter().flat_map(Response::failures).collect(),
            _ => vec![],
        }
    }

    /// Converts back into the JSON value the caller would serialize.
    pub fn into_value(self) -> Value {
        match self {
            Response::Documents(documents) => Value::Array(documents),
            Response::Value(value) => value,
            Response::Batch(items) => Value::Array(items.into_iter().map(Response::into_value).collect()),
            Response::Failure(Failure { code, error }) => {
                let mut map = serde_json::Map::new();
                map.insert("code".to_string(), code.map(Value::from).unwrap_or(Value::Null));
                map.insert("error".to_string(), error);
                Value::Object(map)
            }
        }
    }

    /// Deserializes the success payload into `D`.
    ///
    /// A captured failure is returned as `Err` unchanged; a payload that does not fit `D`
    /// becomes a failure without a status code.
    pub fn deserialize<D: DeserializeOwned>(self) -> OperationResult<D> {
        if let Response::Failure(failure) = self {
            return Err(failure);
        }

        from_value(self.into_value()).map_err(|e| Failure::new(None, e.to_string()))
    }
}

impl From<OperationResult> for Response {
    fn from(raw: OperationResult) -> Self {
        Response::normalize(raw)
    }
}
