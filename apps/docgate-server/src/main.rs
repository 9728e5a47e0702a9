//! docgate server - republishes a generated document set from a blob store.
//!
//! Requests under the mount path are either redirected to the document
//! set's index page (`303`) or answered with the object bytes (`200`).
//!
//! # Usage
//!
//! ```text
//! STORAGE_BUCKET=my-bucket NAMESPACE_PREFIX=0b6f3c2e MOUNT_PATH=/docs docgate-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STORAGE_BUCKET` | *(required)* | Bucket name (`gs://` assumed) or object store URL |
//! | `NAMESPACE_PREFIX` | *(required)* | Prefix holding the document set |
//! | `MOUNT_PATH` | *(required)* | Public path the document set is served under |
//! | `GATEWAY_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `ROOT_REDIRECT` | `false` | Redirect `/` to the mount path |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docgate_core::{GatewayConfig, ObjectStoreSource};
use docgate_http::{GatewayDispatcher, GatewayHttpService, serve_with_shutdown};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the dispatcher from configuration, connecting to the object store.
fn build_dispatcher(config: &GatewayConfig) -> Result<GatewayDispatcher> {
    let translator = config.translator()?;
    let source = ObjectStoreSource::from_bucket(&config.bucket)?;

    Ok(GatewayDispatcher::new(translator, Arc::new(source)).with_root_redirect(config.root_redirect))
}

/// Perform a health check by connecting to the gateway and requesting the health endpoint.
///
/// Exits with code 0 if healthy, 1 otherwise.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /_health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle --health-check flag for container HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let listen = std::env::var("GATEWAY_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
        let addr = listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let config = GatewayConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.log_level)?;

    info!(
        gateway_listen = %config.gateway_listen,
        bucket = %config.bucket,
        namespace_prefix = %config.namespace_prefix,
        mount_path = %config.mount_path,
        root_redirect = config.root_redirect,
        version = VERSION,
        "starting docgate server",
    );

    let dispatcher = build_dispatcher(&config)?;
    let service = GatewayHttpService::new(dispatcher);

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };
    serve_with_shutdown(listener, service, shutdown).await;

    Ok(())
}
