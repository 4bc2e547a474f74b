//! Generic verb-to-wire translation.
//!
//! [`Operations`] exposes one method per Data API verb. Each method builds the verb's
//! payload, merges it over the [`TargetContext`] and posts it through the [`Transport`].
//! Transport faults are captured right here and returned as [`Failure`] values, so every
//! verb's return type already carries its failure branch.
//!
//! Bulk inserts are split into chunks of at most [`INSERT_MANY_CHUNK_SIZE`] documents,
//! issued one after another in order. Every chunk is attempted regardless of how earlier
//! chunks fared, and the per-chunk results are returned as-is: chunks are not
//! transactional with each other, so partial success is possible and visible.

use futures::{StreamExt, stream::iter};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    context::TargetContext,
    filter::{Document, FindOptions, into_document},
    response::{DOCUMENTS_KEY, Failure, OperationResult},
    transport::{Action, Transport},
};

/// Server-imposed ceiling on documents per `insertMany` call.
pub const INSERT_MANY_CHUNK_SIZE: usize = 1000;

/// Stateless verb dispatcher for one target context.
#[derive(Debug)]
pub struct Operations<'a, T: Transport> {
    context: TargetContext,
    transport: &'a T,
}

impl<'a, T: Transport> Operations<'a, T> {
    pub fn new(context: TargetContext, transport: &'a T) -> Self {
        Self { context, transport }
    }

    /// Returns the target context merged into every request.
    pub fn context(&self) -> &TargetContext {
        &self.context
    }

    /// Issues one call, folding any transport fault into a [`Failure`].
    async fn call(&self, action: Action, fields: Value) -> OperationResult {
        debug!(
            action = %action,
            collection = %self.context.collection,
            database = %self.context.database,
            "Issuing Data API call"
        );

        self.transport
            .post(action, self.context.body(into_document(fields)))
            .await
            .map_err(|e| {
                warn!(action = %action, collection = %self.context.collection, error = %e, "Data API call failed");
                Failure::from(e)
            })
    }

    /// Finds a single document.
    ///
    /// Posts `filter` and `projection` to `action/findOne`. The server answers with
    /// `{"document": ...}`, where the document is `null` when nothing matched.
    pub async fn find_one(&self, filter: Document, projection: Document) -> OperationResult {
        self.call(
            Action::FindOne,
            json!({ "filter": filter, "projection": projection }),
        )
        .await
    }

    /// Finds documents matching `filter`.
    ///
    /// Posts `filter`, `limit`, `sort`, `skip` and `projection` to `action/find`. The
    /// server answers with `{"documents": [...]}`.
    pub async fn find(&self, filter: Document, options: FindOptions) -> OperationResult {
        self.call(
            Action::Find,
            json!({
                "limit": options.limit,
                "filter": filter,
                "sort": options.sort,
                "skip": options.skip,
                "projection": options.projection,
            }),
        )
        .await
    }

    /// Inserts a single document via `action/insertOne`.
    ///
    /// The server answers with `{"insertedId": ...}`.
    pub async fn insert_one(&self, document: Document) -> OperationResult {
        self.call(Action::InsertOne, json!({ "document": document }))
            .await
    }

    /// Inserts documents in sequential chunks of at most [`INSERT_MANY_CHUNK_SIZE`].
    ///
    /// Returns one result per chunk, in submission order. An empty input issues no calls.
    pub async fn insert_many(&self, documents: Vec<Document>) -> Vec<OperationResult> {
        let total = documents.len().div_ceil(INSERT_MANY_CHUNK_SIZE);

        // Chunks own their documents.
        iter(documents)
            .chunks(INSERT_MANY_CHUNK_SIZE)
            .enumerate()
            .then(|(index, chunk)| async move {
                debug!(
                    chunk = index + 1,
                    chunks = total,
                    size = chunk.len(),
                    collection = %self.context.collection,
                    "Inserting chunk"
                );
                self.insert_chunk(chunk).await
            })
            .collect::<Vec<_>>()
            .await
    }

    /// Posts one chunk to `action/insertMany`.
    async fn insert_chunk(&self, documents: Vec<Document>) -> OperationResult {
        self.call(Action::InsertMany, json!({ "documents": documents }))
            .await
    }

    /// Applies `update` to the first document matching `filter`.
    ///
    /// `update` is sent as given; wrap flat field mappings with
    /// [`set_operator`](crate::filter::set_operator) first. The server answers with
    /// `{"matchedCount": n, "modifiedCount": n}` plus `upsertedId` when an upsert inserted.
    pub async fn update_one(&self, filter: Document, update: Document, upsert: bool) -> OperationResult {
        self.call(
            Action::UpdateOne,
            json!({ "filter": filter, "update": update, "upsert": upsert }),
        )
        .await
    }

    /// Applies `update` to every document matching `filter`.
    pub async fn update_many(&self, filter: Document, update: Document, upsert: bool) -> OperationResult {
        self.call(
            Action::UpdateMany,
            json!({ "filter": filter, "update": update, "upsert": upsert }),
        )
        .await
    }

    /// Replaces the first document matching `filter` with `replacement`.
    pub async fn replace_one(
        &self,
        filter: Document,
        replacement: Document,
        upsert: bool,
    ) -> OperationResult {
        self.call(
            Action::ReplaceOne,
            json!({ "filter": filter, "replacement": replacement, "upsert": upsert }),
        )
        .await
    }

    /// Deletes the first document matching `filter`.
    ///
    /// The server answers with `{"deletedCount": n}`.
    pub async fn delete_one(&self, filter: Document) -> OperationResult {
        self.call(Action::DeleteOne, json!({ "filter": filter }))
            .await
    }

    /// Deletes every document matching `filter`.
    pub async fn delete_many(&self, filter: Document) -> OperationResult {
        self.call(Action::DeleteMany, json!({ "filter": filter }))
            .await
    }

    /// Runs an aggregation pipeline via `action/aggregate`.
    pub async fn aggregate(&self, pipeline: Vec<Value>) -> OperationResult {
        self.call(Action::Aggregate, json!({ "pipeline": pipeline }))
            .await
    }

    /// Counts documents matching `filter`, answering `{"count": n}`.
    ///
    /// Runs a `$match` + `$count` pipeline. The server omits the count document entirely
    /// when nothing matches, which is reported as zero. Any other reply shape is a failure
    /// without a status code.
    pub async fn count(&self, filter: Document) -> OperationResult {
        let payload = self
            .aggregate(vec![
                json!({ "$match": filter }),
                json!({ "$count": "count" }),
            ])
            .await?;

        let count = match payload.get(DOCUMENTS_KEY).and_then(Value::as_array) {
            Some(documents) => match documents.first() {
                None => Value::from(0),
                Some(document) => document
                    .get("count")
                    .filter(|count| count.is_u64())
                    .cloned()
                    .ok_or_else(|| malformed_count(&payload))?,
            },
            None => return Err(malformed_count(&payload)),
        };

        Ok(json!({ "count": count }))
    }
}

fn malformed_count(payload: &Value) -> Failure {
    warn!(payload = %payload, "Unexpected count reply");
    Failure::new(None, format!("Malformed response: unexpected count reply {payload}"))
}
