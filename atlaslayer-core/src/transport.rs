//! Transport abstraction for the Data API.
//!
//! A [`Transport`] issues exactly one POST to a named action endpoint and hands back the
//! decoded JSON payload, or a [`TransportError`] describing why it could not. Everything
//! above this seam (payload building, chunking, normalization) is transport-agnostic, so
//! the same operations run against the HTTP client in production and a recording
//! transport in tests.
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::transport::{Action, Transport};
//! use serde_json::json;
//!
//! let payload = transport
//!     .post(Action::FindOne, json!({ "collection": "users", "database": "app", "dataSource": "cluster0", "filter": {} }))
//!     .await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::{fmt, fmt::Debug, sync::Arc};

use crate::error::{DataApiResult, TransportError};

/// A Data API action endpoint.
///
/// Each variant maps to a fixed path under the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    FindOne,
    Find,
    InsertOne,
    InsertMany,
    UpdateOne,
    UpdateMany,
    ReplaceOne,
    DeleteOne,
    DeleteMany,
    Aggregate,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 10] = [
        Action::FindOne,
        Action::Find,
        Action::InsertOne,
        Action::InsertMany,
        Action::UpdateOne,
        Action::UpdateMany,
        Action::ReplaceOne,
        Action::DeleteOne,
        Action::DeleteMany,
        Action::Aggregate,
    ];

    /// Returns the relative endpoint path, e.g. `action/findOne`.
    pub fn path(&self) -> &'static str {
        match self {
            Action::FindOne => "action/findOne",
            Action::Find => "action/find",
            Action::InsertOne => "action/insertOne",
            Action::InsertMany => "action/insertMany",
            Action::UpdateOne => "action/updateOne",
            Action::UpdateMany => "action/updateMany",
            Action::ReplaceOne => "action/replaceOne",
            Action::DeleteOne => "action/deleteOne",
            Action::DeleteMany => "action/deleteMany",
            Action::Aggregate => "action/aggregate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Abstract interface for issuing Data API calls.
///
/// Implementations own connection management, default headers and the base URL. They
/// must not retry: one `post` is one request.
///
/// # Errors
///
/// Non-2xx responses are reported as [`TransportError::Status`] carrying the decoded error
/// body. Connection problems and undecodable bodies use the remaining variants.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Posts `body` as JSON to `action` and returns the decoded response payload.
    async fn post(&self, action: Action, body: Value) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    async fn post(&self, action: Action, body: Value) -> Result<Value, TransportError> {
        (**self).post(action, body).await
    }
}

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn post(&self, action: Action, body: Value) -> Result<Value, TransportError> {
        (**self).post(action, body).await
    }
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn post(&self, action: Action, body: Value) -> Result<Value, TransportError> {
        (**self).post(action, body).await
    }
}

/// Factory trait for transports that need configuration before use.
#[async_trait]
pub trait TransportBuilder {
    type Transport: Transport;

    async fn build(self) -> DataApiResult<Self::Transport>;
}
