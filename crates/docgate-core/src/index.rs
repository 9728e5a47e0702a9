//! Index document resolution over a prefix listing.
//!
//! The listing is consumed in a single forward pass. A key ending in
//! `/index.html` wins immediately and the rest of the listing is never
//! pulled. Otherwise the last `.html` key seen is kept, which for a
//! lexicographically sorted listing is the greatest `.html` key.
//!
//! Suffix comparison is ASCII case-insensitive.

use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use crate::error::{GatewayError, GatewayResult};
use crate::types::StorageKey;

const INDEX_SUFFIX: &str = "/index.html";
const HTML_SUFFIX: &str = ".html";

/// Outcome of feeding one key to an [`IndexSelector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The key is the canonical index; stop scanning.
    Done,
    /// Keep scanning.
    Continue,
}

/// Incremental state of the index scan.
#[derive(Debug, Default)]
pub struct IndexSelector {
    winner: Option<StorageKey>,
    best_html: Option<StorageKey>,
}

impl IndexSelector {
    /// Create an empty selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe the next listing entry.
    pub fn observe(&mut self, key: StorageKey) -> Selection {
        if ends_with_ignore_ascii_case(key.as_str(), INDEX_SUFFIX) {
            self.winner = Some(key);
            return Selection::Done;
        }
        if ends_with_ignore_ascii_case(key.as_str(), HTML_SUFFIX) {
            trace!(key = %key, "candidate html page");
            self.best_html = Some(key);
        }
        Selection::Continue
    }

    /// Finish the scan, yielding the chosen key if any.
    #[must_use]
    pub fn finish(self) -> Option<StorageKey> {
        self.winner.or(self.best_html)
    }
}

/// Resolve the index document from a lazy listing of keys.
///
/// # Errors
/// Returns [`GatewayError::NotFound`] if the listing holds no `.html` key, and
/// propagates the first listing error unchanged.
pub async fn resolve_index<S>(listing: S) -> GatewayResult<StorageKey>
where
    S: Stream<Item = GatewayResult<StorageKey>>,
{
    let mut listing = std::pin::pin!(listing);
    let mut selector = IndexSelector::new();
    let mut scanned = 0_usize;

    while let Some(entry) = listing.next().await {
        scanned += 1;
        if selector.observe(entry?) == Selection::Done {
            break;
        }
    }

    debug!(scanned, "index scan finished");
    selector
        .finish()
        .ok_or_else(|| GatewayError::not_found("could not find an html index document"))
}

fn ends_with_ignore_ascii_case(haystack: &str, suffix: &str) -> bool {
    haystack.len() >= suffix.len()
        && haystack.is_char_boundary(haystack.len() - suffix.len())
        && haystack[haystack.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
