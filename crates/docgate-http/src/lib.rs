//! HTTP layer for docgate: dispatch, responses and the hyper service.
//!
//! - **Dispatch** ([`dispatch`]): classifies each request as index-style or
//!   asset-style and drives the core components through
//!   [`GatewayDispatcher`](dispatch::GatewayDispatcher).
//! - **Response** ([`response`]): builds `200`, `303`, `405` and JSON error
//!   responses.
//! - **Service** ([`service`]): [`GatewayHttpService`](service::GatewayHttpService)
//!   implements hyper's `Service` trait and adds common headers.
//! - **Server** ([`server`]): accept loop with graceful shutdown.
//! - **Body** ([`body`]): the [`GatewayBody`](body::GatewayBody) response body.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> GatewayHttpService (hyper Service)
//!     -> Health check interception
//!     -> GatewayDispatcher
//!        -> method gate / root redirect / mount check
//!        -> RequestKind::classify
//!        -> index: ObjectSource::list -> resolve_index -> 303
//!        -> asset: PathTranslator -> ObjectSource::fetch -> 200
//!     -> Common response headers (x-request-id, Server)
//!   <- HTTP Response
//! ```

pub mod body;
pub mod dispatch;
pub mod response;
pub mod server;
pub mod service;

pub use body::GatewayBody;
pub use dispatch::{GatewayDispatcher, RequestKind};
pub use server::serve_with_shutdown;
pub use service::GatewayHttpService;
