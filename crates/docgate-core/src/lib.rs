//! Core types, path translation and index resolution for docgate.
//!
//! docgate republishes a generated document set stored under a namespace
//! prefix in a blob store at a stable public mount path. This crate holds
//! the decision logic shared by the HTTP layer and the server binary:
//!
//! - [`path`]: public path to storage key translation and back
//! - [`index`]: index document selection over a prefix listing
//! - [`content_type`]: extension based content-type fallback
//! - [`source`]: the blob store boundary ([`ObjectSource`])
//! - [`store`]: an [`ObjectSource`] over the `object_store` crate
//! - [`config`]: environment driven [`GatewayConfig`]
//!
//! # Architecture
//!
//! ```text
//! public path ──PathTranslator──▶ StorageKey ──ObjectSource::fetch──▶ byte stream
//!                                     ▲
//! ObjectSource::list ──resolve_index──┘──PathTranslator──▶ redirect target
//! ```

pub mod config;
pub mod content_type;
pub mod error;
pub mod index;
pub mod path;
pub mod source;
pub mod store;
pub mod types;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use index::resolve_index;
pub use path::PathTranslator;
pub use source::{FetchedObject, ObjectAttributes, ObjectBody, ObjectSource};
pub use store::ObjectStoreSource;
pub use types::{MountPath, NamespacePrefix, StorageKey};
