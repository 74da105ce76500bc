//! URL routing and handler dispatch layer.
//!
//! Given an incoming request URL and host, decide which handler and
//! operation should process the request, extract path- and query-derived
//! parameters, and classify static-asset, API, and subdomain-scoped
//! requests.

pub mod bootstrap;
pub mod config;
pub mod handler;
pub mod http;
pub mod routing;

pub use config::AppConfig;
pub use handler::{Handler, HandlerRegistry, RequestContext, RequestHead};
pub use http::HttpServer;
pub use routing::{DispatchError, Dispatcher, RouteDescriptor};
