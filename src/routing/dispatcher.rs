//! Per-request dispatch orchestration.
//!
//! # Responsibilities
//! - Parse the raw request URL into a route descriptor
//! - Resolve the handler name to a request-scoped handler instance
//! - Invoke the named operation and await its outcome
//!
//! # Design Decisions
//! - One linear pass per request: parse → resolve → invoke, no retries
//! - Any failure aborts the request; the HTTP layer translates the error
//!   kind into a status code
//! - Operation errors are awaited and surfaced, never swallowed; dropping
//!   the dispatch future cancels the in-flight operation

use std::sync::Arc;

use axum::response::Response;

use crate::config::schema::RoutingConfig;
use crate::handler::{Handler, HandlerResolver, RequestContext, RequestHead};
use crate::routing::error::DispatchError;
use crate::routing::url::{self, RouteDescriptor};

const HANDLER_SUFFIX: &str = "Handler";

/// Canonical naming transform from a logical handler name to the type name
/// it is registered under: first letter capitalized, rest lowercased, fixed
/// suffix appended. `"users"` becomes `"UsersHandler"`.
pub fn handler_type_name(handler_name: &str) -> String {
    let mut chars = handler_name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };
    format!("{capitalized}{HANDLER_SUFFIX}")
}

/// Routes one request at a time from raw URL to handler operation.
///
/// Holds only configuration and the resolver table; all per-request state
/// lives in the [`RequestContext`] handed to the handler instance.
pub struct Dispatcher {
    config: RoutingConfig,
    resolver: Arc<dyn HandlerResolver>,
}

impl Dispatcher {
    pub fn new(config: RoutingConfig, resolver: Arc<dyn HandlerResolver>) -> Self {
        Self { config, resolver }
    }

    /// Parse a raw URL against the configured routing defaults.
    pub fn parse_url(&self, raw_url: &str) -> Result<RouteDescriptor, DispatchError> {
        Ok(url::parse(raw_url, &self.config)?)
    }

    /// Build a request-scoped handler instance for the given logical name.
    fn resolve_handler(
        &self,
        handler_name: &str,
        ctx: RequestContext,
    ) -> Result<Box<dyn Handler>, DispatchError> {
        let type_name = handler_type_name(handler_name);
        let factory = self.resolver.resolve(&type_name)?;
        Ok(factory(ctx))
    }

    /// Route one request: parse the URL, resolve the handler, invoke the
    /// operation, and await its response.
    pub async fn dispatch(
        &self,
        raw_url: &str,
        head: RequestHead,
    ) -> Result<Response, DispatchError> {
        let route = self.parse_url(raw_url)?;

        tracing::debug!(
            request_id = %head.request_id,
            handler = %route.handler_name,
            operation = %route.operation_name,
            static_asset = route.is_static_asset,
            api_request = route.is_api_request,
            "route resolved"
        );

        let handler_name = route.handler_name.clone();
        let operation = route.operation_name.clone();
        let ctx = RequestContext { route, head };

        let mut handler = self.resolve_handler(&handler_name, ctx)?;
        handler.invoke(&operation).await
    }
}
