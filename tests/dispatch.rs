//! End-to-end dispatch tests driving the real server over HTTP.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use signpost::handler::{Handler, HandlerRegistry, RequestContext};
use signpost::routing::DispatchError;

mod common;

/// Test handler echoing the routing decision back as JSON.
struct EchoHandler {
    name: &'static str,
    ctx: RequestContext,
}

#[async_trait]
impl Handler for EchoHandler {
    async fn invoke(&mut self, operation: &str) -> Result<Response, DispatchError> {
        match operation {
            "index" | "show" | "list" => Ok(Json(serde_json::json!({
                "handler": self.ctx.route.handler_name,
                "operation": operation,
                "is_api_request": self.ctx.route.is_api_request,
                "is_static_asset": self.ctx.route.is_static_asset,
                "pathname": self.ctx.route.pathname,
                "parameters": self.ctx.route.parameters,
            }))
            .into_response()),
            "fail" => Err(DispatchError::operation("synthetic operation failure")),
            _ => Err(DispatchError::operation_not_found(self.name, operation)),
        }
    }
}

fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("home", |ctx| EchoHandler { name: "home", ctx });
    registry.register("widgets", |ctx| EchoHandler { name: "widgets", ctx });
    registry.register("static", |ctx| EchoHandler { name: "static", ctx });
    registry
}

async fn get_json(addr: std::net::SocketAddr, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_root_path_routes_to_defaults() {
    let addr = common::start_server(registry()).await;

    let (status, body) = get_json(addr, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handler"], "home");
    assert_eq!(body["operation"], "index");
    assert_eq!(body["is_api_request"], false);
    assert_eq!(body["is_static_asset"], false);
    assert_eq!(body["parameters"], serde_json::json!({}));
}

#[tokio::test]
async fn test_positional_and_query_parameters_reach_the_handler() {
    let addr = common::start_server(registry()).await;

    let (status, body) = get_json(addr, "/widgets/show/id:42?color=red").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handler"], "widgets");
    assert_eq!(body["operation"], "show");
    assert_eq!(body["parameters"]["id"], "42");
    assert_eq!(body["parameters"]["color"], "red");
}

#[tokio::test]
async fn test_query_parameter_overrides_positional() {
    let addr = common::start_server(registry()).await;

    let (_, body) = get_json(addr, "/widgets/show/id:42?id=99").await;

    assert_eq!(body["parameters"]["id"], "99");
}

#[tokio::test]
async fn test_api_marker_is_consumed_and_flagged() {
    let addr = common::start_server(registry()).await;

    let (status, body) = get_json(addr, "/_apis/widgets/list").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handler"], "widgets");
    assert_eq!(body["operation"], "list");
    assert_eq!(body["is_api_request"], true);
    assert_eq!(body["is_static_asset"], false);
}

#[tokio::test]
async fn test_static_marker_routes_to_static_handler() {
    let addr = common::start_server(registry()).await;

    let (status, body) = get_json(addr, "/_static/css/app.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handler"], "static");
    assert_eq!(body["operation"], "index");
    assert_eq!(body["is_static_asset"], true);
    // Static requests skip positional parameter collection.
    assert_eq!(body["parameters"], serde_json::json!({}));
}

#[tokio::test]
async fn test_unknown_handler_is_not_found() {
    let addr = common::start_server(registry()).await;

    let response = reqwest::get(format!("http://{addr}/gadgets/show"))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert!(response.text().await.unwrap().contains("GadgetsHandler"));
}

#[tokio::test]
async fn test_unknown_operation_is_not_found() {
    let addr = common::start_server(registry()).await;

    let response = reqwest::get(format!("http://{addr}/widgets/vanish"))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_operation_error_surfaces_as_server_error() {
    let addr = common::start_server(registry()).await;

    let response = reqwest::get(format!("http://{addr}/widgets/fail"))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        response.text().await.unwrap(),
        "synthetic operation failure"
    );
}
