//! Request dispatch: classify a request and drive the core components.
//!
//! The dispatcher is a two-outcome state machine over one request:
//!
//! 1. Method gate (`GET`/`HEAD` only) and optional root redirect
//! 2. Mount check: paths outside the mount are `404`
//! 3. Classification of the path below the mount ([`RequestKind`])
//! 4. Index-style: prefix listing, index resolution, `303` to the index
//! 5. Asset-style: key translation, object fetch, `200` with object bytes
//!
//! Each request performs at most one listing or one fetch and nothing is
//! cached. Dropping the future returned by [`GatewayDispatcher::dispatch`]
//! (as hyper does when the client goes away) drops the in-flight backend
//! call with it.

use std::sync::Arc;

use docgate_core::path::{PathTranslator, encode_location};
use docgate_core::source::ObjectSource;
use docgate_core::{GatewayError, GatewayResult, resolve_index};
use percent_encoding::percent_decode_str;
use tracing::{debug, error, info, warn};

use crate::body::GatewayBody;
use crate::response::{error_to_response, method_not_allowed, object_response, see_other};

/// How a request path is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// No `.` in the last segment: redirect to the index document.
    Index,
    /// The last segment has an extension: serve the object.
    Asset,
}

impl RequestKind {
    /// Classify a request by its path relative to the mount.
    ///
    /// The mount itself and any path ending in `/` are index-style, whatever
    /// dots earlier segments contain. Otherwise the last segment decides. An
    /// extensionless asset is indistinguishable from a directory request and
    /// is treated as index-style.
    #[must_use]
    pub fn classify(relative: &str) -> Self {
        if relative.is_empty() || relative.ends_with('/') {
            return Self::Index;
        }
        let last = relative.rsplit('/').next().unwrap_or(relative);
        if last.contains('.') {
            Self::Asset
        } else {
            Self::Index
        }
    }
}

/// Routes requests for one mounted document set.
pub struct GatewayDispatcher {
    translator: PathTranslator,
    source: Arc<dyn ObjectSource>,
    root_redirect: bool,
}

impl std::fmt::Debug for GatewayDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayDispatcher")
            .field("translator", &self.translator)
            .field("source", &"...")
            .field("root_redirect", &self.root_redirect)
            .finish()
    }
}

impl GatewayDispatcher {
    /// Create a dispatcher over a translator and an object source.
    #[must_use]
    pub fn new(translator: PathTranslator, source: Arc<dyn ObjectSource>) -> Self {
        Self {
            translator,
            source,
            root_redirect: false,
        }
    }

    /// Enable or disable redirecting `/` to the mount path.
    #[must_use]
    pub fn with_root_redirect(mut self, enabled: bool) -> Self {
        self.root_redirect = enabled;
        self
    }

    /// The path translator in use.
    #[must_use]
    pub fn translator(&self) -> &PathTranslator {
        &self.translator
    }

    /// Handle one request, always producing a response.
    pub async fn dispatch(&self, method: &http::Method, raw_path: &str) -> http::Response<GatewayBody> {
        if *method != http::Method::GET && *method != http::Method::HEAD {
            debug!(%method, path = raw_path, "rejecting method");
            return method_not_allowed();
        }

        let path = percent_decode_str(raw_path).decode_utf8_lossy();
        let mount = self.translator.mount();

        if self.root_redirect && !mount.is_root() && path.trim_start_matches('/').is_empty() {
            return see_other(&encode_location(mount.as_str()));
        }

        let Some(relative) = self.translator.relative_path(&path) else {
            warn!(path = %path, mount = %mount, "request outside mount path");
            return error_to_response(&GatewayError::not_found(format!(
                "no document set mounted at {path}"
            )));
        };

        let kind = RequestKind::classify(relative);
        debug!(path = %path, relative, ?kind, "classified request");

        let result = match kind {
            RequestKind::Index => self.redirect_to_index().await,
            RequestKind::Asset => self.serve_asset(&path).await,
        };

        match result {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    GatewayError::NotFound(msg) => warn!(path = %path, reason = %msg, "not found"),
                    other => error!(path = %path, error = %other, "backend request failed"),
                }
                error_to_response(&err)
            }
        }
    }

    /// Resolve the index document and redirect to its public path.
    async fn redirect_to_index(&self) -> GatewayResult<http::Response<GatewayBody>> {
        let scope = self.translator.prefix().listing_scope();
        let key = resolve_index(self.source.list(&scope)).await?;
        let target = self.translator.to_public_path(&key);

        info!(key = %key, location = %target, "redirecting to index document");
        Ok(see_other(&encode_location(&target)))
    }

    /// Fetch the object named by `path` and return its bytes.
    async fn serve_asset(&self, path: &str) -> GatewayResult<http::Response<GatewayBody>> {
        let key = self
            .translator
            .to_storage_key(path)
            .ok_or_else(|| GatewayError::not_found(format!("no document set mounted at {path}")))?;
        let object = self.source.fetch(&key).await?;

        debug!(key = %key, size = object.attributes.size, "serving object");
        Ok(object_response(object, path))
    }
}
