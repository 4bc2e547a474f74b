//! Target context: which remote collection a binding talks to.
//!
//! Every request body carries the `dataSource`, `database` and `collection` fields of a
//! [`TargetContext`], merged with the verb-specific fields. Contexts are fixed when a
//! binding is created and never change afterwards.
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::context::CollectionBinding;
//!
//! pub struct Users;
//!
//! impl CollectionBinding for Users {
//!     const DATA_SOURCE: &'static str = "cluster0";
//!     const DATABASE: &'static str = "app";
//!     const COLLECTION: &'static str = "users";
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Value, to_value};

use crate::filter::{Document, into_document};

/// The `{dataSource, database, collection}` triple identifying a remote collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TargetContext {
    pub data_source: String,
    pub database: String,
    pub collection: String,
}

impl TargetContext {
    pub fn new(
        data_source: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Returns the context fields as a mapping.
    pub fn to_document(&self) -> Document {
        // Three string fields always serialize to an object.
        to_value(self)
            .map(into_document)
            .unwrap_or_default()
    }

    /// Merges verb-specific `fields` over the context fields to form a request body.
    pub fn body(&self, fields: Document) -> Value {
        let mut body = self.to_document();
        body.extend(fields);

        Value::Object(body)
    }
}

/// A statically configured collection binding.
///
/// Implement this on a marker type to hardcode a collection's target context, then use
/// [`DataApi::bind`](crate::api::DataApi::bind) to obtain a
/// [`Collection`](crate::collection::Collection) for it.
pub trait CollectionBinding {
    const DATA_SOURCE: &'static str;
    const DATABASE: &'static str;
    const COLLECTION: &'static str;

    /// Returns this binding's target context.
    fn target() -> TargetContext {
        TargetContext::new(Self::DATA_SOURCE, Self::DATABASE, Self::COLLECTION)
    }
}
