//! Handler subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDescriptor (from routing layer)
//!     → registry.rs (canonical type name → factory lookup)
//!     → factory builds one Handler instance around the RequestContext
//!     → Handler::invoke(operation) produces the response
//! ```
//!
//! # Design Decisions
//! - Handlers are registered in a table built at startup, so a missing
//!   handler is caught at resolution time with no filesystem probing
//! - One handler instance per request; instances are never reused
//! - Operations are async and awaited to completion by the dispatcher

pub mod registry;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::routing::error::DispatchError;
use crate::routing::url::RouteDescriptor;

pub use registry::{HandlerFactory, HandlerRegistry, HandlerResolver};

/// Transport-level facts about one request, minus the parsed route.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// Correlation id assigned when the request entered the server.
    pub request_id: String,

    /// HTTP method of the request.
    pub method: Method,

    /// Request headers as received.
    pub headers: HeaderMap,
}

/// Everything a handler gets to see about the request it was built for.
///
/// Scoped to a single request; constructed once by the dispatcher and handed
/// to the handler factory, never shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The parsed route descriptor for this request.
    pub route: RouteDescriptor,

    /// Transport-level request data.
    pub head: RequestHead,
}

/// A logical unit owning a set of named operations.
///
/// Implementations match on the operation name and return
/// [`DispatchError::operation_not_found`] for names they do not expose.
/// Any other error returned from an operation is propagated to the HTTP
/// layer unchanged.
#[async_trait]
pub trait Handler: Send {
    /// Run the named operation and produce a response.
    async fn invoke(&mut self, operation: &str) -> Result<Response, DispatchError>;
}
