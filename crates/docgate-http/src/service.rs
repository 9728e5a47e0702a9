//! The gateway HTTP service implementing hyper's `Service` trait.
//!
//! [`GatewayHttpService`] wraps a [`GatewayDispatcher`] and handles:
//!
//! 1. Health check interception (`GET /_health`, `GET /health`)
//! 2. Dispatch of every other request
//! 3. Common response headers (`x-request-id`, `Server`)
//! 4. Body suppression for `HEAD`
//!
//! The request body is never read.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, info};
use uuid::Uuid;

use crate::body::GatewayBody;
use crate::dispatch::GatewayDispatcher;
use crate::response::health_check_response;

/// Value of the `Server` response header.
pub const SERVER_NAME: &str = "docgate";

/// The gateway HTTP service.
///
/// Cloning is cheap: the dispatcher is shared behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct GatewayHttpService {
    dispatcher: Arc<GatewayDispatcher>,
}

impl GatewayHttpService {
    /// Create a new service around a dispatcher.
    #[must_use]
    pub fn new(dispatcher: GatewayDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Process a request given only its head.
    pub async fn handle(&self, parts: &http::request::Parts) -> http::Response<GatewayBody> {
        let request_id = Uuid::new_v4().to_string();
        let response = process_request(&self.dispatcher, parts, &request_id).await;
        add_common_headers(response, &request_id)
    }
}

impl Service<http::Request<Incoming>> for GatewayHttpService {
    type Response = http::Response<GatewayBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let (parts, _body) = req.into_parts();
            Ok(service.handle(&parts).await)
        })
    }
}

/// Run a request through health check interception and dispatch.
async fn process_request(
    dispatcher: &GatewayDispatcher,
    parts: &http::request::Parts,
    request_id: &str,
) -> http::Response<GatewayBody> {
    let method = &parts.method;
    let path = parts.uri.path();
    debug!(%method, path, request_id, "processing request");

    if is_health_check(method, path) {
        return health_check_response();
    }

    let mut response = dispatcher.dispatch(method, path).await;

    info!(
        %method,
        path,
        status = response.status().as_u16(),
        request_id,
        "handled request"
    );

    if *method == http::Method::HEAD {
        *response.body_mut() = GatewayBody::empty();
    }
    response
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/_health" || path == "/health")
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<GatewayBody>,
    request_id: &str,
) -> http::Response<GatewayBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }
    headers.insert(
        http::header::SERVER,
        http::header::HeaderValue::from_static(SERVER_NAME),
    );

    response
}
