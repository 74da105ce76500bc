//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (host header + request URI)
//!     → url.rs (parse into RouteDescriptor)
//!     → dispatcher.rs (resolve handler, invoke operation)
//!     → Response, or DispatchError for the HTTP layer to translate
//! ```
//!
//! # Design Decisions
//! - Parsing is pure and request-scoped; the dispatcher holds no per-request
//!   state
//! - Deterministic: the same URL and defaults always produce the same
//!   routing decision
//! - Reserved markers (`_apis`, `_static`) are recognized on the first path
//!   segment only

pub mod dispatcher;
pub mod error;
pub mod url;

pub use dispatcher::{handler_type_name, Dispatcher};
pub use error::DispatchError;
pub use url::{MalformedUrlError, RouteDescriptor};
