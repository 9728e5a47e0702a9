//! [`ObjectSource`] backed by the `object_store` crate.
//!
//! The bucket setting selects the backend by URL scheme:
//!
//! | Bucket | Backend |
//! |--------|---------|
//! | `gs://bucket` or a bare `bucket` name | Google Cloud Storage (`GOOGLE_*` env credentials) |
//! | `s3://bucket` | Amazon S3 (`AWS_*` env credentials) |
//! | `memory:///` | in-process memory store |
//! | `file:///srv/site` | local directory |
//!
//! GCS and S3 list keys in ascending order. The local directory backend
//! does not guarantee listing order, so index fallback there is only
//! deterministic when an `index.html` exists.

use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, ObjectStoreScheme, PutOptions, PutPayload};
use tracing::{debug, info};
use url::Url;

use crate::error::{GatewayError, GatewayResult};
use crate::source::{FetchedObject, ObjectAttributes, ObjectSource};
use crate::types::StorageKey;

/// Object source over any [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct ObjectStoreSource {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreSource {
    /// Wrap an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Build a source for the configured bucket.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if the bucket URL is malformed, uses an
    /// unsupported scheme, or the backend builder rejects it.
    pub fn from_bucket(bucket: &str) -> GatewayResult<Self> {
        let url_str = bucket_url(bucket);
        let url = Url::parse(&url_str)
            .map_err(|e| GatewayError::Config(format!("invalid bucket url {url_str}: {e}")))?;
        let (scheme, _) = ObjectStoreScheme::parse(&url)
            .map_err(|e| GatewayError::Config(format!("unsupported bucket url {url_str}: {e}")))?;

        let store: Arc<dyn ObjectStore> = match scheme {
            ObjectStoreScheme::GoogleCloudStorage => Arc::new(
                GoogleCloudStorageBuilder::from_env()
                    .with_url(url_str.as_str())
                    .build()
                    .map_err(|e| config_error(&url_str, &e))?,
            ),
            ObjectStoreScheme::AmazonS3 => Arc::new(
                AmazonS3Builder::from_env()
                    .with_url(url_str.as_str())
                    .build()
                    .map_err(|e| config_error(&url_str, &e))?,
            ),
            ObjectStoreScheme::Memory => Arc::new(InMemory::new()),
            ObjectStoreScheme::Local => {
                let root = url.to_file_path().map_err(|()| {
                    GatewayError::Config(format!("invalid local bucket path: {url_str}"))
                })?;
                Arc::new(
                    LocalFileSystem::new_with_prefix(root)
                        .map_err(|e| config_error(&url_str, &e))?,
                )
            }
            _ => {
                return Err(GatewayError::Config(format!(
                    "unsupported bucket scheme: {url_str}"
                )));
            }
        };

        info!(bucket = %url_str, "configured object store");
        Ok(Self { store })
    }

    /// Create a source over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    /// Write an object with optional content metadata.
    ///
    /// The gateway itself never writes; this seeds development and test stores.
    ///
    /// # Errors
    /// Returns [`GatewayError::Backend`] if the store rejects the write.
    pub async fn put_object(
        &self,
        key: &str,
        body: impl Into<Bytes>,
        content_type: Option<&str>,
        content_encoding: Option<&str>,
    ) -> GatewayResult<()> {
        let mut attributes = Attributes::new();
        if let Some(ct) = content_type {
            attributes.insert(Attribute::ContentType, ct.to_owned().into());
        }
        if let Some(ce) = content_encoding {
            attributes.insert(Attribute::ContentEncoding, ce.to_owned().into());
        }

        let opts = PutOptions {
            attributes,
            ..Default::default()
        };
        self.store
            .put_opts(&Path::from(key), PutPayload::from(body.into()), opts)
            .await
            .map_err(GatewayError::backend)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ObjectSource for ObjectStoreSource {
    fn list(&self, prefix: &str) -> BoxStream<'_, GatewayResult<StorageKey>> {
        let prefix = Path::from(prefix.trim_end_matches('/'));
        debug!(prefix = %prefix, "listing objects");

        self.store
            .list(Some(&prefix))
            .map(|entry| {
                entry
                    .map(|meta| StorageKey::new(meta.location.to_string()))
                    .map_err(GatewayError::backend)
            })
            .boxed()
    }

    async fn fetch(&self, key: &StorageKey) -> GatewayResult<FetchedObject> {
        let location = Path::from(key.as_str());
        let result = self
            .store
            .get(&location)
            .await
            .map_err(|e| map_store_error(key, e))?;

        let attributes = ObjectAttributes {
            content_type: attribute(&result.attributes, &Attribute::ContentType),
            size: result.meta.size,
            content_encoding: attribute(&result.attributes, &Attribute::ContentEncoding),
        };
        let stream_key = key.clone();
        let body = result
            .into_stream()
            .map(move |chunk| chunk.map_err(|e| map_store_error(&stream_key, e)))
            .boxed();

        debug!(key = %key, size = attributes.size, "streaming object");
        Ok(FetchedObject { attributes, body })
    }
}

/// Normalize the bucket setting into an object store URL.
fn bucket_url(bucket: &str) -> String {
    let bucket = bucket.trim();
    if bucket.contains("://") {
        bucket.to_owned()
    } else {
        format!("gs://{bucket}")
    }
}

fn attribute(attributes: &Attributes, key: &Attribute) -> Option<String> {
    attributes
        .get(key)
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
}

fn map_store_error(key: &StorageKey, err: object_store::Error) -> GatewayError {
    match err {
        object_store::Error::NotFound { .. } => {
            GatewayError::not_found(format!("object {key} does not exist"))
        }
        other => GatewayError::backend(other),
    }
}

fn config_error(url: &str, err: &object_store::Error) -> GatewayError {
    GatewayError::Config(format!("failed to build object store for {url}: {err}"))
}
