//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use signpost::config::AppConfig;
use signpost::handler::HandlerRegistry;
use signpost::http::HttpServer;
use signpost::routing::Dispatcher;

/// Boot the full server on an ephemeral port, dispatching into the given
/// registry. The listener is bound before returning, so requests made
/// immediately afterwards are queued rather than refused.
pub async fn start_server(registry: HandlerRegistry) -> SocketAddr {
    let config = AppConfig::default();
    let dispatcher = Arc::new(Dispatcher::new(config.routing.clone(), Arc::new(registry)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, dispatcher);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}
