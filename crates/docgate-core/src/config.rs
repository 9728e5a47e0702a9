//! Gateway configuration.
//!
//! Provides [`GatewayConfig`], loaded once at startup from environment
//! variables and shared read-only afterwards. The bucket, namespace prefix
//! and mount path are required; a missing value is a
//! [`GatewayError::Config`] and the process must not serve traffic.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{GatewayError, GatewayResult};
use crate::path::PathTranslator;
use crate::types::{MountPath, NamespacePrefix};

/// Environment variable naming the bucket (or object store URL).
pub const ENV_STORAGE_BUCKET: &str = "STORAGE_BUCKET";
/// Environment variable naming the document set's namespace prefix.
pub const ENV_NAMESPACE_PREFIX: &str = "NAMESPACE_PREFIX";
/// Environment variable naming the public mount path.
pub const ENV_MOUNT_PATH: &str = "MOUNT_PATH";

/// Gateway configuration.
///
/// # Examples
///
/// ```
/// use docgate_core::config::GatewayConfig;
///
/// let config = GatewayConfig::builder()
///     .bucket("memory:///".into())
///     .namespace_prefix("abc123".into())
///     .mount_path("/docs".into())
///     .build();
/// assert_eq!(config.gateway_listen, "0.0.0.0:8080");
/// assert!(config.translator().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Bind address (e.g. `"0.0.0.0:8080"`).
    #[builder(default = String::from("0.0.0.0:8080"))]
    pub gateway_listen: String,

    /// Bucket name or object store URL holding the document set.
    pub bucket: String,

    /// Namespace prefix under which the document set's objects live.
    pub namespace_prefix: String,

    /// Public mount path the document set is served under.
    pub mount_path: String,

    /// Whether `GET /` redirects to the mount path.
    #[builder(default = false)]
    pub root_redirect: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `STORAGE_BUCKET` | *(required)* |
    /// | `NAMESPACE_PREFIX` | *(required)* |
    /// | `MOUNT_PATH` | *(required)* |
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8080` |
    /// | `ROOT_REDIRECT` | `false` |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] naming the first missing variable.
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] naming the first missing variable.
    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| GatewayError::Config(format!("{name} is not set")))
        };

        let mut config = Self::builder()
            .bucket(required(ENV_STORAGE_BUCKET)?)
            .namespace_prefix(required(ENV_NAMESPACE_PREFIX)?)
            .mount_path(required(ENV_MOUNT_PATH)?)
            .build();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("ROOT_REDIRECT") {
            config.root_redirect = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// The normalized mount path.
    #[must_use]
    pub fn mount(&self) -> MountPath {
        MountPath::new(&self.mount_path)
    }

    /// Build the path translator for this configuration.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if the namespace prefix is blank.
    pub fn translator(&self) -> GatewayResult<PathTranslator> {
        let prefix = NamespacePrefix::new(&self.namespace_prefix)?;
        Ok(PathTranslator::new(self.mount(), prefix))
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
