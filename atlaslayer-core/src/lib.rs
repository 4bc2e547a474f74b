//! A thin layer that turns document-store verbs into calls against an HTTP document
//! database Data API and normalizes whatever comes back.
//!
//! This crate is the core of the atlaslayer project and provides:
//!
//! - **Transport abstraction** ([`transport`]) - The single-call seam that HTTP and test transports implement
//! - **Target contexts** ([`context`]) - The `{dataSource, database, collection}` triple merged into every request
//! - **Filters and options** ([`filter`]) - Identity filters, `$set` wrapping, find and listing options
//! - **Generic verbs** ([`operations`]) - One method per Data API action, including chunked bulk inserts
//! - **Collection bindings** ([`collection`]) - CRUD-style verbs with uniform response normalization
//! - **Response envelope** ([`response`]) - Failures as values, list envelopes unwrapped
//! - **Error handling** ([`error`]) - Transport faults and construction errors
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::prelude::*;
//!
//! pub struct Users;
//!
//! impl CollectionBinding for Users {
//!     const DATA_SOURCE: &'static str = "cluster0";
//!     const DATABASE: &'static str = "app";
//!     const COLLECTION: &'static str = "users";
//! }
//!
//! let api = DataApi::new(transport);
//! match api.bind::<Users>().find_by_id("65f1c0ffee0000000000beef").await {
//!     Response::Failure(failure) => eprintln!("lookup failed: {:?}", failure),
//!     found => println!("{}", found.into_value()),
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as atlaslayer_core;

pub mod api;
pub mod collection;
pub mod context;
pub mod error;
pub mod filter;
pub mod operations;
pub mod response;
pub mod transport;
