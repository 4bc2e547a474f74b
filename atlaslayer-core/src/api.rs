//! Entry point tying a transport to collection bindings.
//!
//! [`DataApi`] owns a [`Transport`] and hands out [`Collection`] bindings that borrow it.
//! It holds no mutable state: bindings are cheap to create and each carries its own
//! immutable [`TargetContext`].
//!
//! # Example
//!
//! ```ignore
//! use atlaslayer::{api::DataApi, http::HttpTransportBuilder, transport::TransportBuilder};
//!
//! let api = DataApi::new(HttpTransportBuilder::from_env()?.build().await?);
//! let users = api.bind::<Users>();
//! ```

use crate::{
    collection::Collection,
    context::{CollectionBinding, TargetContext},
    operations::Operations,
    transport::Transport,
};

/// A Data API client bound to a specific transport implementation.
///
/// # Type Parameters
///
/// * `T` - The transport implementation type
#[derive(Debug)]
pub struct DataApi<T: Transport> {
    transport: T,
}

impl<T: Transport> DataApi<T> {
    /// Creates a new client over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the client and returns its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Gets the binding for a statically configured collection.
    pub fn bind<'a, B: CollectionBinding>(&'a self) -> Collection<'a, T> {
        Collection::new(B::target(), &self.transport)
    }

    /// Gets a binding for an ad-hoc target context.
    pub fn collection<'a>(&'a self, context: TargetContext) -> Collection<'a, T> {
        Collection::new(context, &self.transport)
    }

    /// Gets the raw, un-normalized verb layer for a target context.
    pub fn operations<'a>(&'a self, context: TargetContext) -> Operations<'a, T> {
        Operations::new(context, &self.transport)
    }
}
