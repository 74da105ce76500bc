//! Routing and dispatch error definitions.

use thiserror::Error;

use crate::routing::url::MalformedUrlError;

/// Errors the dispatcher itself can produce.
///
/// `MalformedUrl` is a client-level rejection; the remaining kinds indicate a
/// missing or misconfigured handler. Errors raised by an invoked operation
/// pass through the `Operation` variant without any added wrapping. The
/// HTTP layer owns the translation of each kind into a status code.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request URL could not be decomposed.
    #[error(transparent)]
    MalformedUrl(#[from] MalformedUrlError),

    /// No handler is registered under the canonical type name.
    #[error("no handler registered for {type_name}")]
    HandlerNotFound { type_name: String },

    /// A handler unit was found but does not expose the expected construct.
    /// The built-in registry resolver cannot produce this; it exists for
    /// resolver implementations that load handlers from elsewhere.
    #[error("handler unit for {type_name} exposes no member {type_name}")]
    HandlerExportMissing { type_name: String },

    /// The resolved handler exposes no operation under the requested name.
    #[error("handler {handler} exposes no operation {operation:?}")]
    OperationNotFound { handler: String, operation: String },

    /// An error raised by the invoked operation, propagated verbatim.
    #[error("{source}")]
    Operation {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DispatchError {
    /// Error for a handler that exposes no operation under `operation`.
    pub fn operation_not_found(handler: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::OperationNotFound {
            handler: handler.into(),
            operation: operation.into(),
        }
    }

    /// Wrap an operation-level failure for propagation through the dispatcher.
    pub fn operation(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Operation {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_url_display_is_transparent() {
        let err = DispatchError::from(MalformedUrlError {
            url: "bogus".to_string(),
            reason: "relative URL without a base".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "could not parse request url \"bogus\": relative URL without a base"
        );
    }

    #[test]
    fn test_operation_error_display_adds_no_wrapping() {
        let err = DispatchError::operation("backing store unavailable");

        assert_eq!(err.to_string(), "backing store unavailable");
    }

    #[test]
    fn test_operation_not_found_names_handler_and_operation() {
        let err = DispatchError::operation_not_found("widgets", "explode");

        assert_eq!(
            err.to_string(),
            "handler widgets exposes no operation \"explode\""
        );
    }
}
