//! Extension based content-type fallback.
//!
//! Only consulted when the blob store reports no content type for an object.
//! Matching is case-sensitive on the final extension.

use mime::Mime;

/// Look up the content type for a path by its final extension.
///
/// Returns `None` for unknown or missing extensions; the caller then leaves
/// the `Content-Type` header unset.
#[must_use]
pub fn mime_for(path: &str) -> Option<Mime> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = file_name.rsplit_once('.')?;

    match extension {
        "html" => Some(mime::TEXT_HTML),
        "css" => Some(mime::TEXT_CSS),
        "js" => Some(mime::APPLICATION_JAVASCRIPT),
        "json" => Some(mime::APPLICATION_JSON),
        "svg" => Some(mime::IMAGE_SVG),
        _ => None,
    }
}
