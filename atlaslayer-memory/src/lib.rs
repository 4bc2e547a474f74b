//! Recording transport for atlaslayer.
//!
//! This crate provides a thread-safe, in-process implementation of the `Transport` trait.
//! Instead of talking to a server it records every call it receives and answers from a
//! per-action script, falling back to synthesized acknowledgments shaped like the real
//! Data API's. It is meant for development and tests.
//!
//! # Features
//!
//! - **Call recording** - Every posted action and body is kept, in order
//! - **Scripted responses** - Queue successes or faults per action
//! - **Plausible defaults** - Unscripted calls get realistic acknowledgments (fresh object ids, zero counts)
//! - **Shared state** - Clones share the same recording, so a test can keep a handle
//!
//! # Quick Start
//!
//! ```ignore
//! use atlaslayer::{prelude::*, memory::RecordingTransport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = RecordingTransport::new();
//!     let api = DataApi::new(transport.clone());
//!
//!     api.bind::<Users>().size().await;
//!
//!     assert_eq!(transport.calls().await.len(), 1);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as atlaslayer_memory;

pub mod transport;

pub use transport::{RecordedCall, RecordingTransport, RecordingTransportBuilder};
