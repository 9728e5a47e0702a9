//! The blob store boundary.
//!
//! [`ObjectSource`] is the only capability the gateway needs from storage: a
//! lazy prefix listing and a single-shot streamed object read.
//! Implementations map a missing object to [`GatewayError::NotFound`] and
//! every other failure to [`GatewayError::Backend`].
//!
//! The trait uses `#[async_trait]` because the dispatcher holds it as
//! `Arc<dyn ObjectSource>`.
//!
//! [`GatewayError::NotFound`]: crate::error::GatewayError::NotFound
//! [`GatewayError::Backend`]: crate::error::GatewayError::Backend

use std::fmt;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::GatewayResult;
use crate::types::StorageKey;

/// Attributes reported by the blob store for one object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectAttributes {
    /// Stored content type, if the backend recorded one.
    pub content_type: Option<String>,
    /// Object size in bytes.
    pub size: u64,
    /// Stored content encoding (e.g. `gzip`), if any.
    pub content_encoding: Option<String>,
}

/// Lazy stream of an object's bytes.
pub type ObjectBody = BoxStream<'static, GatewayResult<Bytes>>;

/// An object whose read has started.
///
/// Attributes are known up front; the bytes arrive through [`body`](Self::body)
/// as the backend produces them.
pub struct FetchedObject {
    /// Object attributes.
    pub attributes: ObjectAttributes,
    /// Object bytes, streamed from the backend.
    pub body: ObjectBody,
}

impl fmt::Debug for FetchedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedObject")
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Read-only access to the document set's objects.
#[async_trait::async_trait]
pub trait ObjectSource: Send + Sync + 'static {
    /// List keys under `prefix`, in ascending lexicographic order.
    ///
    /// `prefix` is a listing scope such as `"abc123/"`.
    fn list(&self, prefix: &str) -> BoxStream<'_, GatewayResult<StorageKey>>;

    /// Start reading an object, returning its attributes and a byte stream.
    ///
    /// A missing object fails here, before any bytes are streamed.
    async fn fetch(&self, key: &StorageKey) -> GatewayResult<FetchedObject>;
}
