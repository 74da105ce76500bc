//! signpost server binary.
//!
//! Loads configuration, builds the handler registry, and serves requests
//! through the dispatcher. Ships a minimal `home` handler so a default
//! install answers `/` out of the box.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use signpost::config::{load_config, AppConfig};
use signpost::handler::{Handler, HandlerRegistry, RequestContext};
use signpost::http::HttpServer;
use signpost::routing::{DispatchError, Dispatcher};

#[derive(Parser)]
#[command(name = "signpost", about = "URL routing and handler dispatch server")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Default handler answering the routing defaults (`/`).
struct HomeHandler {
    ctx: RequestContext,
}

#[async_trait]
impl Handler for HomeHandler {
    async fn invoke(&mut self, operation: &str) -> Result<Response, DispatchError> {
        match operation {
            "index" => Ok(Json(serde_json::json!({
                "request_id": self.ctx.head.request_id,
                "handler": self.ctx.route.handler_name,
                "subdomain": self.ctx.route.subdomain,
                "parameters": self.ctx.route.parameters,
            }))
            .into_response()),
            _ => Err(DispatchError::operation_not_found("home", operation)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    // Initialize tracing subscriber
    let default_filter = format!("signpost={},tower_http=info", config.observability.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("signpost v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_handler = %config.routing.default_handler,
        default_operation = %config.routing.default_operation,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let mut registry = HandlerRegistry::new();
    registry.register("home", |ctx| HomeHandler { ctx });
    let dispatcher = Arc::new(Dispatcher::new(config.routing.clone(), Arc::new(registry)));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config, dispatcher);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
