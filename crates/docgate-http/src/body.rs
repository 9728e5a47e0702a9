//! Response body for the gateway.
//!
//! Object bytes are forwarded chunk by chunk as the blob store yields them,
//! so a large asset is never held in memory whole. JSON documents (errors,
//! health) are small and buffered; redirects and `HEAD` responses are empty.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::Bytes;
use docgate_core::ObjectBody;
use futures::StreamExt;
use http_body::{Frame, SizeHint};
use http_body_util::Full;
use tracing::error;

/// Gateway response body.
#[derive(Default)]
pub enum GatewayBody {
    /// Object bytes streamed from the blob store.
    Object(ObjectBody),
    /// A small in-memory document.
    Buffered(Full<Bytes>),
    /// No body.
    #[default]
    Empty,
}

impl GatewayBody {
    /// Stream an object's bytes.
    #[must_use]
    pub fn from_object(body: ObjectBody) -> Self {
        Self::Object(body)
    }

    /// Buffer a UTF-8 document.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self::Buffered(Full::new(Bytes::from(s.into())))
    }

    /// An empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }
}

impl fmt::Debug for GatewayBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(_) => f.write_str("GatewayBody::Object(..)"),
            Self::Buffered(full) => f.debug_tuple("GatewayBody::Buffered").field(full).finish(),
            Self::Empty => f.write_str("GatewayBody::Empty"),
        }
    }
}

impl http_body::Body for GatewayBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.get_mut() {
            Self::Object(stream) => match ready!(stream.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => Poll::Ready(Some(Ok(Frame::data(chunk)))),
                Some(Err(e)) => {
                    error!(error = %e, "object stream failed mid-response");
                    Poll::Ready(Some(Err(std::io::Error::other(e))))
                }
                None => Poll::Ready(None),
            },
            Self::Buffered(full) => Pin::new(full)
                .poll_frame(cx)
                .map_err(|never| match never {}),
            Self::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Object(_) => false,
            Self::Buffered(full) => full.is_end_stream(),
            Self::Empty => true,
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            // Length comes from the Content-Length header set from object metadata.
            Self::Object(_) => SizeHint::default(),
            Self::Buffered(full) => full.size_hint(),
            Self::Empty => SizeHint::with_exact(0),
        }
    }
}
