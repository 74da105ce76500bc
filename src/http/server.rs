//! HTTP server setup and dispatch wiring.
//!
//! # Responsibilities
//! - Create the Axum router feeding every request into the dispatcher
//! - Wire up middleware (tracing, request timeout)
//! - Assign a request id as early as possible
//! - Rebuild the raw absolute URL from the Host header and request URI
//! - Translate dispatch error kinds into wire-level status codes

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handler::RequestHead;
use crate::routing::{DispatchError, Dispatcher};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server that fronts the dispatcher.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around a configured dispatcher.
    pub fn new(config: AppConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState { dispatcher };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main dispatch handler. Every request, regardless of path, lands here and
/// is routed by the dispatcher. Client disconnects drop this future, which
/// cancels the in-flight handler operation.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let Some(host) = request_host(&request) else {
        tracing::warn!(request_id = %request_id, "request carries no host");
        return (StatusCode::BAD_REQUEST, "Missing Host header").into_response();
    };

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let raw_url = format!("http://{host}{path_and_query}");

    let (parts, _body) = request.into_parts();
    let head = RequestHead {
        request_id: request_id.clone(),
        method: parts.method,
        headers: parts.headers,
    };

    match state.dispatcher.dispatch(&raw_url, head).await {
        Ok(response) => response,
        Err(error) => {
            let status = status_for(&error);
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, url = %raw_url, error = %error, "dispatch failed");
            } else {
                tracing::warn!(request_id = %request_id, url = %raw_url, error = %error, "request rejected");
            }
            (status, error.to_string()).into_response()
        }
    }
}

/// Host the request was addressed to, from the Host header or the request
/// target's authority. An empty Host header counts as missing; passing it
/// through would hand the parser a URL with an empty authority.
fn request_host(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
}

/// Translate a dispatch error kind into a wire-level status code. This
/// mapping lives in the HTTP layer only; the dispatcher knows nothing about
/// status codes.
fn status_for(error: &DispatchError) -> StatusCode {
    match error {
        DispatchError::MalformedUrl(_) => StatusCode::BAD_REQUEST,
        DispatchError::HandlerNotFound { .. } | DispatchError::OperationNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        DispatchError::HandlerExportMissing { .. } | DispatchError::Operation { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::MalformedUrlError;

    #[test]
    fn test_request_host_prefers_host_header() {
        let request = Request::builder()
            .uri("/widgets/show")
            .header("Host", "example.com")
            .body(Body::empty())
            .unwrap();

        assert_eq!(request_host(&request).as_deref(), Some("example.com"));
    }

    #[test]
    fn test_request_host_treats_empty_header_as_missing() {
        let request = Request::builder()
            .uri("/widgets/show")
            .header("Host", "")
            .body(Body::empty())
            .unwrap();

        assert_eq!(request_host(&request), None);
    }

    #[test]
    fn test_request_host_falls_back_to_uri_authority() {
        let request = Request::builder()
            .uri("http://example.com:8080/widgets")
            .body(Body::empty())
            .unwrap();

        assert_eq!(request_host(&request).as_deref(), Some("example.com:8080"));
    }

    #[test]
    fn test_status_translation() {
        let malformed = DispatchError::from(MalformedUrlError {
            url: "x".to_string(),
            reason: "bad".to_string(),
        });
        assert_eq!(status_for(&malformed), StatusCode::BAD_REQUEST);

        let not_found = DispatchError::HandlerNotFound {
            type_name: "GhostHandler".to_string(),
        };
        assert_eq!(status_for(&not_found), StatusCode::NOT_FOUND);

        let no_operation = DispatchError::operation_not_found("ghost", "walk");
        assert_eq!(status_for(&no_operation), StatusCode::NOT_FOUND);

        let export_missing = DispatchError::HandlerExportMissing {
            type_name: "GhostHandler".to_string(),
        };
        assert_eq!(status_for(&export_missing), StatusCode::INTERNAL_SERVER_ERROR);

        let operation = DispatchError::operation("boom");
        assert_eq!(status_for(&operation), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
