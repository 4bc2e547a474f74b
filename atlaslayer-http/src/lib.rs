//! HTTP transport for atlaslayer.
//!
//! This crate provides a `reqwest`-based implementation of the `Transport` trait that
//! talks to a remote Data API: one JSON POST per call to `<base url>/action/<verb>`.
//!
//! To use this transport, keep the `http` feature enabled in your `Cargo.toml` (it is on
//! by default):
//!
//! ```toml
//! [dependencies]
//! atlaslayer = { version = "x.y.z", features = ["http"] }
//! ```
//!
//! # Configuration
//!
//! The base URL and API key are read once, either passed to the builder or taken from
//! the `CLUSTER_URL` and `CLUSTER_API_KEY` environment variables. Default headers
//! (`Content-Type`, `api-key`, `Access-Control-Request-Headers`) are installed on the
//! client at build time.
//!
//! Connection pooling belongs to the underlying `reqwest::Client`. Nothing here retries.
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::{http::HttpTransportBuilder, transport::TransportBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransportBuilder::from_env()?
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as atlaslayer_http;

pub mod config;
pub mod transport;

pub use config::HttpConfig;
pub use transport::{HttpTransport, HttpTransportBuilder};
