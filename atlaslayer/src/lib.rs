//! Main atlaslayer crate providing a uniform client for HTTP document database Data APIs.
//!
//! This crate is the primary entry point for users of atlaslayer. It re-exports the core
//! types from the sub-crates and provides access to the available transports.
//!
//! # Features
//!
//! - **Verb-to-wire translation** - `find`, `insert`, `update`, `replace`, `delete` and `aggregate` as JSON POSTs
//! - **Collection bindings** - Hardcode a `{dataSource, database, collection}` once, use CRUD verbs everywhere
//! - **Failures as values** - Every verb returns a [`Response`](response::Response); nothing to `catch`
//! - **Chunked bulk inserts** - Batches split at the server's 1000-document ceiling, reported per chunk
//! - **Pluggable transports** - HTTP in production, a recording transport in tests
//!
//! # Quick Start
//!
//! ```ignore
//! use atlaslayer::{prelude::*, http::HttpTransportBuilder};
//! use serde_json::json;
//!
//! pub struct Users;
//!
//! impl CollectionBinding for Users {
//!     const DATA_SOURCE: &'static str = "ojeda";
//!     const DATABASE: &'static str = "app_name";
//!     const COLLECTION: &'static str = "users";
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CLUSTER_URL and CLUSTER_API_KEY
//!     let api = DataApi::new(HttpTransportBuilder::from_env()?.build().await?);
//!     let users = api.bind::<Users>();
//!
//!     // Insert a user and list everyone called John
//!     users.insert(into_document(json!({ "name": "John", "email": "user@test.com" }))).await;
//!     let johns = users
//!         .select(into_document(json!({ "name": "John" })), ListOptions::default().limit(10))
//!         .await;
//!
//!     match johns {
//!         Response::Documents(documents) => println!("found {}", documents.len()),
//!         Response::Failure(failure) => eprintln!("lookup failed: {:?}", failure),
//!         other => println!("unexpected shape: {}", other.into_value()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Bulk inserts
//!
//! ```ignore
//! let batch = users.insert_all(documents).await;
//!
//! // One entry per chunk of at most 1000 documents, in order
//! for failure in batch.failures() {
//!     eprintln!("chunk failed with {:?}: {}", failure.code, failure.error);
//! }
//! ```
//!
//! # Transports
//!
//! - [`memory`] - Recording transport for development and testing
//! - [`http`] - `reqwest`-based transport (requires the `http` feature, enabled by default)

pub mod prelude;

pub use atlaslayer_core::{api, collection, context, error, filter, operations, response, transport};

// Re-export BSON and JSON types for convenience
pub use bson;
pub use serde_json;

/// Recording transport implementations.
pub mod memory {
    pub use atlaslayer_memory::{RecordedCall, RecordingTransport, RecordingTransportBuilder};
}

/// HTTP transport implementations.
///
/// This module is only available when the `http` feature is enabled.
#[cfg(feature = "http")]
pub mod http {
    pub use atlaslayer_http::{HttpConfig, HttpTransport, HttpTransportBuilder};
}
