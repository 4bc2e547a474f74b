//! Collection bindings.
//!
//! A [`Collection`] binds the generic [`Operations`] to one target context and exposes
//! CRUD-style convenience verbs. Every verb passes its raw result through
//! [`Response::normalize`], so callers receive one of a document list, a single value,
//! a per-chunk batch or a `{code, error}` failure, regardless of which wire action ran.
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::{prelude::*, memory::RecordingTransport};
//! use serde_json::json;
//!
//! let api = DataApi::new(RecordingTransport::new());
//! let users = api.bind::<Users>();
//!
//! let created = users.insert(into_document(json!({ "name": "John", "email": "user@test.com" }))).await;
//! let johns = users.select(into_document(json!({ "name": "John" })), ListOptions::default().limit(10)).await;
//! ```

use crate::{
    context::TargetContext,
    filter::{Document, Filter, ListOptions, set_operator},
    operations::Operations,
    response::Response,
    transport::Transport,
};

/// A collection bound to a fixed target context.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the transport reference
/// * `T` - The transport type
#[derive(Debug)]
pub struct Collection<'a, T: Transport> {
    operations: Operations<'a, T>,
}

impl<'a, T: Transport> Collection<'a, T> {
    /// Creates a new collection binding (internal use).
    pub(crate) fn new(context: TargetContext, transport: &'a T) -> Self {
        Self { operations: Operations::new(context, transport) }
    }

    /// Returns the target context of this binding.
    pub fn context(&self) -> &TargetContext {
        self.operations.context()
    }

    /// Returns the name of the bound collection.
    pub fn name(&self) -> &str {
        &self.context().collection
    }

    /// Returns the un-normalized verb layer for this binding.
    pub fn operations(&self) -> &Operations<'a, T> {
        &self.operations
    }

    /// Lists documents.
    ///
    /// Defaults are a limit of 100 sorted by `_id` ascending; see [`ListOptions`].
    pub async fn all(&self, options: ListOptions) -> Response {
        self.select(Filter::all(), options).await
    }

    /// Lists documents matching `filter`. The filter is sent unmodified.
    pub async fn select(&self, filter: Document, options: ListOptions) -> Response {
        Response::normalize(
            self.operations
                .find(filter, options.into())
                .await,
        )
    }

    /// Finds the first document matching `filter`.
    ///
    /// The result is the server's `{"document": ...}` mapping, unchanged.
    pub async fn find_one(&self, filter: Document) -> Response {
        Response::normalize(
            self.operations
                .find_one(filter, Document::new())
                .await,
        )
    }

    /// Finds a document by its string-encoded object id.
    pub async fn find_by_id(&self, id: &str) -> Response {
        self.find_one(Filter::by_id(id)).await
    }

    /// Inserts one document and returns the server acknowledgment (the inserted id).
    pub async fn insert(&self, document: Document) -> Response {
        Response::normalize(
            self.operations
                .insert_one(document)
                .await,
        )
    }

    /// Inserts documents in chunks, returning a [`Response::Batch`] with one entry per chunk.
    ///
    /// Chunks are not atomic with each other. Inspect [`Response::failures`] for the chunks
    /// that did not go through.
    pub async fn insert_all(&self, documents: Vec<Document>) -> Response {
        Response::normalize_batch(
            self.operations
                .insert_many(documents)
                .await,
        )
    }

    /// Deletes the first document matching `filter`.
    pub async fn destroy(&self, filter: Document) -> Response {
        Response::normalize(
            self.operations
                .delete_one(filter)
                .await,
        )
    }

    /// Deletes every document matching `filter`. An empty filter matches everything.
    pub async fn destroy_all(&self, filter: Document) -> Response {
        Response::normalize(
            self.operations
                .delete_many(filter)
                .await,
        )
    }

    /// Sets the fields in `set` on the first document matching `filter`.
    ///
    /// `set` is a flat field mapping and is always wrapped as `{"$set": set}`.
    pub async fn update(&self, filter: Document, set: Document) -> Response {
        Response::normalize(
            self.operations
                .update_one(filter, set_operator(set), false)
                .await,
        )
    }

    /// Sets the fields in `set` on every document matching `filter`.
    pub async fn update_all(&self, filter: Document, set: Document) -> Response {
        Response::normalize(
            self.operations
                .update_many(filter, set_operator(set), false)
                .await,
        )
    }

    /// Like [`update`](Self::update), inserting a new document when nothing matches.
    pub async fn upsert(&self, filter: Document, set: Document) -> Response {
        Response::normalize(
            self.operations
                .update_one(filter, set_operator(set), true)
                .await,
        )
    }

    /// Replaces the first document matching `filter` with `document`.
    pub async fn replace(&self, filter: Document, document: Document) -> Response {
        Response::normalize(
            self.operations
                .replace_one(filter, document, false)
                .await,
        )
    }

    /// Counts the documents in the collection, answering `{"count": n}`.
    pub async fn size(&self) -> Response {
        Response::normalize(
            self.operations
                .count(Filter::all())
                .await,
        )
    }
}
