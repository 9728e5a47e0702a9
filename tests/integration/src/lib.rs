//! End-to-end tests for the docgate server.
//!
//! Each test starts the real hyper service on an ephemeral port over an
//! in-memory object store and talks to it with `reqwest`. Redirects are not
//! followed so `303` responses can be asserted directly.
//!
//! Run them with:
//! ```text
//! cargo test -p docgate-integration
//! ```

use std::sync::{Arc, Once};

use docgate_core::ObjectStoreSource;
use docgate_core::path::PathTranslator;
use docgate_core::types::{MountPath, NamespacePrefix};
use docgate_http::{GatewayDispatcher, GatewayHttpService, serve_with_shutdown};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

static INIT: Once = Once::new();

/// Namespace prefix used by every test gateway.
pub const NAMESPACE: &str = "abc123";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A gateway running on a background task.
#[derive(Debug)]
pub struct TestGateway {
    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    /// The store behind the gateway, for seeding more objects.
    pub source: ObjectStoreSource,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestGateway {
    /// Absolute URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Stop accepting connections and wait for the server task to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Options for [`spawn_gateway`].
#[derive(Debug, Clone, Copy)]
pub struct GatewayOptions<'a> {
    /// Public mount path.
    pub mount: &'a str,
    /// Whether `/` redirects to the mount.
    pub root_redirect: bool,
}

impl Default for GatewayOptions<'_> {
    fn default() -> Self {
        Self {
            mount: "/docs",
            root_redirect: false,
        }
    }
}

/// Start a gateway seeded with `(key, body, content_type)` objects.
pub async fn spawn_gateway(
    objects: &[(&str, &str, Option<&str>)],
    options: GatewayOptions<'_>,
) -> TestGateway {
    init_tracing();

    let source = ObjectStoreSource::in_memory();
    for (key, body, content_type) in objects {
        source
            .put_object(key, body.to_string(), *content_type, None)
            .await
            .unwrap_or_else(|e| panic!("failed to seed {key}: {e}"));
    }

    let translator = PathTranslator::new(
        MountPath::new(options.mount),
        NamespacePrefix::new(NAMESPACE).expect("valid prefix"),
    );
    let dispatcher = GatewayDispatcher::new(translator, Arc::new(source.clone()))
        .with_root_redirect(options.root_redirect);
    let service = GatewayHttpService::new(dispatcher);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve_with_shutdown(listener, service, async {
        rx.await.ok();
    }));

    TestGateway {
        base_url: format!("http://{addr}"),
        source,
        shutdown: Some(tx),
        handle: Some(handle),
    }
}

/// HTTP client that does not follow redirects.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build reqwest client")
}

mod test_asset;
mod test_health;
mod test_index;
