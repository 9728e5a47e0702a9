//! HTTP response construction for gateway outcomes.

use docgate_core::GatewayError;
use docgate_core::content_type::mime_for;
use docgate_core::source::FetchedObject;
use http::header::{self, HeaderValue};
use tracing::warn;

use crate::body::GatewayBody;

/// `Allow` header value sent with `405` responses.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// Build the `200` response for a fetched object, streaming its bytes.
///
/// `Content-Type` comes from the stored attributes, falling back to the
/// extension of `requested_path`, and is omitted when neither is known.
/// Header values the blob store reports that are not valid HTTP header
/// values are dropped.
#[must_use]
pub fn object_response(object: FetchedObject, requested_path: &str) -> http::Response<GatewayBody> {
    let attributes = object.attributes;
    let mut response = http::Response::new(GatewayBody::from_object(object.body));
    let headers = response.headers_mut();

    let content_type = attributes
        .content_type
        .or_else(|| mime_for(requested_path).map(|m| m.to_string()));
    if let Some(ct) = content_type {
        insert_header(headers, header::CONTENT_TYPE, &ct);
    }

    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(attributes.size));

    if let Some(ce) = attributes.content_encoding {
        insert_header(headers, header::CONTENT_ENCODING, &ce);
    }

    response
}

/// Build a `303 See Other` redirect to an already encoded location.
#[must_use]
pub fn see_other(location: &str) -> http::Response<GatewayBody> {
    let mut response = http::Response::new(GatewayBody::empty());
    *response.status_mut() = http::StatusCode::SEE_OTHER;
    insert_header(response.headers_mut(), header::LOCATION, location);
    response
}

/// Build a `405 Method Not Allowed` response.
#[must_use]
pub fn method_not_allowed() -> http::Response<GatewayBody> {
    http::Response::builder()
        .status(http::StatusCode::METHOD_NOT_ALLOWED)
        .header(header::ALLOW, ALLOWED_METHODS)
        .body(GatewayBody::empty())
        .expect("static 405 response should be valid")
}

/// Produce a health check response.
#[must_use]
pub fn health_check_response() -> http::Response<GatewayBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(GatewayBody::from_string(
            r#"{"status":"running","service":"docgate"}"#,
        ))
        .expect("static health response should be valid")
}

/// Convert a [`GatewayError`] into a JSON error response.
///
/// Backend failures are reported with a generic message; the cause is
/// expected to have been logged by the caller.
#[must_use]
pub fn error_to_response(err: &GatewayError) -> http::Response<GatewayBody> {
    let message = match err {
        GatewayError::NotFound(msg) => msg.clone(),
        GatewayError::Config(_) | GatewayError::Backend(_) => "internal server error".to_owned(),
    };
    let body = serde_json::json!({
        "code": err.code(),
        "message": message,
    });

    http::Response::builder()
        .status(err.status_code())
        .header(header::CONTENT_TYPE, "application/json")
        .body(GatewayBody::from_string(body.to_string()))
        .unwrap_or_else(|_| {
            http::Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(GatewayBody::empty())
                .expect("static response should be valid")
        })
}

fn insert_header(headers: &mut http::HeaderMap, name: header::HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(hv) => {
            headers.insert(name, hv);
        }
        Err(e) => warn!(header = %name, value, error = %e, "dropping invalid header value"),
    }
}
