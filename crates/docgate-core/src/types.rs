//! Identifier types shared across the gateway.

use std::fmt;

use crate::error::GatewayError;

/// Public URL segment under which the document set is exposed.
///
/// Normalized to exactly one leading `/` and no trailing `/`. The root mount
/// (`/` or an empty string) is stored as `""`, so that `mount + "/" + rel`
/// always yields a rooted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MountPath(String);

impl MountPath {
    /// Create a mount path, normalizing slashes.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        let trimmed = path.as_ref().trim().trim_matches('/');
        if trimmed.is_empty() {
            Self(String::new())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    /// Get the mount path as a string slice (`""` for the root mount).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root mount.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The mount without its leading slash (`"docs"` for `/docs`).
    #[must_use]
    pub fn segment(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl fmt::Display for MountPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Opaque identifier scoping every storage key of one document set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NamespacePrefix(String);

impl NamespacePrefix {
    /// Create a namespace prefix. Surrounding slashes are trimmed.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if the prefix is empty after trimming.
    pub fn new(prefix: impl AsRef<str>) -> Result<Self, GatewayError> {
        let trimmed = prefix.as_ref().trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(GatewayError::Config(
                "namespace prefix must not be empty".to_owned(),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Get the prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The listing scope for this namespace: `"{prefix}/"`.
    #[must_use]
    pub fn listing_scope(&self) -> String {
        format!("{}/", self.0)
    }
}

impl fmt::Display for NamespacePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-qualified object key in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Wrap a raw key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for StorageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
