//! Static handler registration and lookup.
//!
//! # Responsibilities
//! - Map canonical handler type names to constructor functions
//! - Resolve a type name to its factory, or fail with `HandlerNotFound`
//!
//! # Design Decisions
//! - Table is built at startup and immutable afterwards (thread-safe
//!   without locks, shared via Arc)
//! - Keys are canonical type names so registration and resolution agree on
//!   the naming transform

use std::collections::HashMap;

use crate::handler::{Handler, RequestContext};
use crate::routing::dispatcher::handler_type_name;
use crate::routing::error::DispatchError;

/// Constructs one request-scoped handler instance.
pub type HandlerFactory = Box<dyn Fn(RequestContext) -> Box<dyn Handler> + Send + Sync>;

/// Resolves a canonical handler type name to a factory.
///
/// The registry below is the production implementation. Alternative
/// implementations that load handlers from elsewhere may also fail with
/// [`DispatchError::HandlerExportMissing`].
pub trait HandlerResolver: Send + Sync {
    fn resolve(&self, type_name: &str) -> Result<&HandlerFactory, DispatchError>;
}

/// Startup-built table of handler factories keyed by canonical type name.
#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its logical name (e.g. `"users"`).
    ///
    /// The entry is stored under the canonical type name, so the same
    /// transform applied during resolution finds it again.
    pub fn register<H, F>(&mut self, name: &str, factory: F)
    where
        H: Handler + 'static,
        F: Fn(RequestContext) -> H + Send + Sync + 'static,
    {
        self.factories.insert(
            handler_type_name(name),
            Box::new(move |ctx| Box::new(factory(ctx)) as Box<dyn Handler>),
        );
    }

    /// Whether a handler is registered under the given logical name.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&handler_type_name(name))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl HandlerResolver for HandlerRegistry {
    fn resolve(&self, type_name: &str) -> Result<&HandlerFactory, DispatchError> {
        self.factories
            .get(type_name)
            .ok_or_else(|| DispatchError::HandlerNotFound {
                type_name: type_name.to_string(),
            })
    }
}
