//! Recording transport implementation.
//!
//! Calls are appended to a shared log and answered from a per-action FIFO script. When an
//! action's script is empty the transport synthesizes the acknowledgment the Data API
//! would send for an empty collection.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use async_trait::async_trait;
use bson::oid::ObjectId;
use mea::rwlock::RwLock;
use serde_json::{Value, json};
use tracing::trace;

use atlaslayer_core::{
    error::{DataApiResult, TransportError},
    transport::{Action, Transport, TransportBuilder},
};

type Scripted = Result<Value, TransportError>;
type ScriptMap = HashMap<Action, VecDeque<Scripted>>;

/// A call received by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub action: Action,
    pub body: Value,
}

/// Thread-safe transport that records calls and replays scripted responses.
///
/// `RecordingTransport` is cloneable and uses `Arc`-wrapped internal state: clones share
/// the same call log and scripts, so a test can hand one clone to a client and inspect
/// the other.
///
/// # Example
///
/// ```ignore
/// use atlaslayer_memory::RecordingTransport;
/// use atlaslayer_core::{error::TransportError, transport::Action};
/// use serde_json::json;
///
/// let transport = RecordingTransport::new();
/// transport
///     .respond(Action::Find, Ok(json!({ "documents": [{ "name": "John" }] })))
///     .await;
/// transport
///     .respond(Action::DeleteOne, Err(TransportError::Connection("refused".into())))
///     .await;
/// ```
#[derive(Default, Clone, Debug)]
pub struct RecordingTransport {
    /// Every call received, in arrival order
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// Pending scripted responses per action
    scripts: Arc<RwLock<ScriptMap>>,
}

impl RecordingTransport {
    /// Creates a transport with an empty log and no scripts.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            scripts: Arc::new(RwLock::new(ScriptMap::new())),
        }
    }

    /// Creates a builder for a transport with pre-loaded scripts.
    pub fn builder() -> RecordingTransportBuilder {
        RecordingTransportBuilder::default()
    }

    /// Queues a response for the next unanswered call to `action`.
    pub async fn respond(&self, action: Action, response: Result<Value, TransportError>) {
        self.scripts
            .write()
            .await
            .entry(action)
            .or_default()
            .push_back(response);
    }

    /// Returns every recorded call, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Returns the recorded calls to `action`, in order.
    pub async fn calls_to(&self, action: Action) -> Vec<RecordedCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.action == action)
            .cloned()
            .collect()
    }

    /// Forgets all recorded calls and pending scripts.
    pub async fn reset(&self) {
        self.calls.write().await.clear();
        self.scripts.write().await.clear();
    }

    /// Builds the acknowledgment the Data API sends when nothing matched.
    ///
    /// Inserts get fresh object ids, one per submitted document; upserts report an
    /// `upsertedId`.
    pub fn acknowledge(action: Action, body: &Value) -> Value {
        match action {
            Action::FindOne => json!({ "document": null }),
            Action::Find | Action::Aggregate => json!({ "documents": [] }),
            Action::InsertOne => json!({ "insertedId": ObjectId::new().to_hex() }),
            Action::InsertMany => {
                let submitted = body
                    .get("documents")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                let ids = (0..submitted)
                    .map(|_| Value::from(ObjectId::new().to_hex()))
                    .collect::<Vec<_>>();

                json!({ "insertedIds": ids })
            }
            Action::UpdateOne | Action::UpdateMany | Action::ReplaceOne => {
                if body.get("upsert").and_then(Value::as_bool).unwrap_or(false) {
                    json!({ "matchedCount": 0, "modifiedCount": 0, "upsertedId": ObjectId::new().to_hex() })
                } else {
                    json!({ "matchedCount": 0, "modifiedCount": 0 })
                }
            }
            Action::DeleteOne | Action::DeleteMany => json!({ "deletedCount": 0 }),
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, action: Action, body: Value) -> Result<Value, TransportError> {
        trace!(action = %action, "Recording call");

        self.calls
            .write()
            .await
            .push(RecordedCall { action, body: body.clone() });

        let scripted = self
            .scripts
            .write()
            .await
            .get_mut(&action)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(response) => response,
            None => Ok(Self::acknowledge(action, &body)),
        }
    }
}

/// Builder for [`RecordingTransport`] instances with pre-loaded scripts.
///
/// # Example
///
/// ```ignore
/// use atlaslayer_memory::RecordingTransport;
/// use atlaslayer_core::transport::{Action, TransportBuilder};
/// use serde_json::json;
///
/// let transport = RecordingTransport::builder()
///     .respond(Action::Aggregate, Ok(json!({ "documents": [{ "count": 3 }] })))
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct RecordingTransportBuilder {
    scripts: ScriptMap,
}

impl RecordingTransportBuilder {
    /// Queues a response for `action`.
    pub fn respond(mut self, action: Action, response: Result<Value, TransportError>) -> Self {
        self.scripts
            .entry(action)
            .or_default()
            .push_back(response);
        self
    }
}

#[async_trait]
impl TransportBuilder for RecordingTransportBuilder {
    type Transport = RecordingTransport;

    /// Always succeeds.
    async fn build(self) -> DataApiResult<Self::Transport> {
        Ok(RecordingTransport {
            calls: Arc::new(RwLock::new(Vec::new())),
            scripts: Arc::new(RwLock::new(self.scripts)),
        })
    }
}
