//! Translation between public request paths and storage keys.
//!
//! A request for `{mount}/{relative}` maps to the object `{prefix}/{relative}`
//! and back. Both directions are pure and total:
//!
//! ```
//! use docgate_core::path::PathTranslator;
//! use docgate_core::types::{MountPath, NamespacePrefix, StorageKey};
//!
//! let translator = PathTranslator::new(
//!     MountPath::new("/docs"),
//!     NamespacePrefix::new("abc123").unwrap(),
//! );
//! let key = translator.to_storage_key("/docs/site_libs/app.js").unwrap();
//! assert_eq!(key.as_str(), "abc123/site_libs/app.js");
//! assert_eq!(translator.to_public_path(&key), "/docs/site_libs/app.js");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::types::{MountPath, NamespacePrefix, StorageKey};

/// Characters escaped when a public path is written into a `Location` header.
/// `/` is kept so segment structure survives.
const LOCATION_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Maps public paths under a mount onto keys under a namespace prefix.
#[derive(Debug, Clone)]
pub struct PathTranslator {
    mount: MountPath,
    prefix: NamespacePrefix,
}

impl PathTranslator {
    /// Create a translator for one mount / namespace pair.
    #[must_use]
    pub fn new(mount: MountPath, prefix: NamespacePrefix) -> Self {
        Self { mount, prefix }
    }

    /// The configured mount path.
    #[must_use]
    pub fn mount(&self) -> &MountPath {
        &self.mount
    }

    /// The configured namespace prefix.
    #[must_use]
    pub fn prefix(&self) -> &NamespacePrefix {
        &self.prefix
    }

    /// Strip the mount from a public path, returning the relative remainder.
    ///
    /// Leading slashes are tolerated (missing or doubled). The mount only
    /// matches on a whole segment, so `/docsx/a.css` is not under `/docs`.
    /// Returns `None` when the path lies outside the mount.
    #[must_use]
    pub fn relative_path<'a>(&self, public_path: &'a str) -> Option<&'a str> {
        let trimmed = public_path.trim_start_matches('/');
        if self.mount.is_root() {
            return Some(trimmed);
        }

        let rest = trimmed.strip_prefix(self.mount.segment())?;
        if rest.is_empty() {
            Some(rest)
        } else if rest.starts_with('/') {
            Some(rest.trim_start_matches('/'))
        } else {
            None
        }
    }

    /// Whether a public path lies under the mount.
    #[must_use]
    pub fn is_under_mount(&self, public_path: &str) -> bool {
        self.relative_path(public_path).is_some()
    }

    /// Translate a public path into the storage key it names.
    ///
    /// An empty remainder maps to the namespace prefix itself. Returns `None`
    /// when the path lies outside the mount.
    #[must_use]
    pub fn to_storage_key(&self, public_path: &str) -> Option<StorageKey> {
        let relative = self.relative_path(public_path)?;

        if relative.is_empty() {
            Some(StorageKey::new(self.prefix.as_str()))
        } else {
            Some(StorageKey::new(format!("{}/{relative}", self.prefix)))
        }
    }

    /// Translate a storage key back into its public path.
    ///
    /// The key equal to the prefix maps to `{mount}/`. A key outside the
    /// namespace is appended to the mount unchanged.
    #[must_use]
    pub fn to_public_path(&self, key: &StorageKey) -> String {
        let key = key.as_str();
        let relative = if key == self.prefix.as_str() {
            ""
        } else {
            key.strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(key)
        };

        format!("{}/{relative}", self.mount.as_str())
    }
}

/// Percent-encode a public path so it can be sent as a `Location` header.
#[must_use]
pub fn encode_location(public_path: &str) -> String {
    utf8_percent_encode(public_path, LOCATION_ENCODE_SET).to_string()
}
