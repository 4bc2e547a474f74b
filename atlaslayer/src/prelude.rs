//! Convenient re-exports of commonly used types from atlaslayer.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use atlaslayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client entry point and collection bindings
//! - Target contexts and the binding trait
//! - Filters, update helpers and find options
//! - The response envelope and error types
//! - Transport traits

pub use atlaslayer_core::{
    api::DataApi,
    collection::Collection,
    context::{CollectionBinding, TargetContext},
    filter::{Document, Filter, FindOptions, ListOptions, into_document, set_operator},
    operations::{INSERT_MANY_CHUNK_SIZE, Operations},
    response::{Failure, OperationResult, Response},
    transport::{Action, Transport, TransportBuilder},
    error::{DataApiError, DataApiResult, TransportError},
};
