//! Filters, update specifications and find options.
//!
//! Filters are opaque to this layer: they are JSON mappings in the server's query
//! language and travel to the wire unmodified. The helpers here only build the few
//! shapes the layer itself needs to produce, such as identity lookups and `$set` updates.
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::filter::{Filter, FindOptions};
//! use serde_json::json;
//!
//! let by_id = Filter::by_id("65f1c0ffee0000000000beef");
//! let options = FindOptions::default()
//!     .limit(50)
//!     .sort(json!({ "name": -1 }));
//! ```

use bson::oid::ObjectId;
use serde_json::{Map, Value, json};

/// A JSON mapping: a document, a filter, a projection, a sort or an update specification.
pub type Document = Map<String, Value>;

/// Builds the handful of filters this layer constructs itself.
pub struct Filter;

impl Filter {
    /// Matches every document.
    pub fn all() -> Document {
        Document::new()
    }

    /// Matches the document whose `_id` is the given string-encoded object id.
    ///
    /// The id is wrapped in the server's `$oid` tagging convention and is not validated.
    pub fn by_id(id: impl Into<String>) -> Document {
        into_document(json!({ "_id": { "$oid": id.into() } }))
    }

    /// Matches the document with the given object id.
    pub fn by_object_id(id: &ObjectId) -> Document {
        Self::by_id(id.to_hex())
    }
}

/// Wraps a flat field mapping into the server's `$set` update operator.
pub fn set_operator(fields: Document) -> Document {
    let mut update = Document::new();
    update.insert("$set".to_string(), Value::Object(fields));
    update
}

/// Converts a JSON value into a mapping, treating anything that is not an object as empty.
pub fn into_document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// Options for the generic `find` verb.
#[derive(Debug, Clone, PartialEq)]
pub struct FindOptions {
    pub limit: u64,
    pub sort: Document,
    pub projection: Document,
    pub skip: u64,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            limit: FindOptions::DEFAULT_LIMIT,
            sort: Document::new(),
            projection: Document::new(),
            skip: 0,
        }
    }
}

impl FindOptions {
    pub const DEFAULT_LIMIT: u64 = 20;

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the sort specification. Non-object values are treated as an empty sort.
    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = into_document(sort.into());
        self
    }

    /// Sets the projection. Non-object values are treated as an empty projection.
    pub fn projection(mut self, projection: impl Into<Value>) -> Self {
        self.projection = into_document(projection.into());
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }
}

/// Listing options used by collection bindings: limit 100, sorted by `_id` ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    pub limit: u64,
    pub sort: Document,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: ListOptions::DEFAULT_LIMIT,
            sort: into_document(json!({ "_id": 1 })),
        }
    }
}

impl ListOptions {
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = into_document(sort.into());
        self
    }
}

impl From<ListOptions> for FindOptions {
    fn from(options: ListOptions) -> Self {
        FindOptions {
            limit: options.limit,
            sort: options.sort,
            ..FindOptions::default()
        }
    }
}
