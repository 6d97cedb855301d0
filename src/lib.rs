use std::sync::Arc;

use axum::{
    body::Bytes,
    middleware,
    routing::{get, post},
    Router,
};

pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod rpc;

use domain::facade::Facade;

#[derive(Clone)]
pub struct AppState {
    pub facades: Arc<[Arc<Facade>]>,
}

impl AppState {
    pub fn new(facades: Vec<Arc<Facade>>) -> Self {
        Self {
            facades: Arc::from(facades),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/dispomon", get(http::handlers::discovery));

    for facade in state.facades.iter() {
        let route = facade.route().to_string();
        let facade = Arc::clone(facade);
        app = app.route(
            &route,
            post(move |body: Bytes| {
                let facade = Arc::clone(&facade);
                async move { http::handlers::serve_rpc(&facade, &body) }
            }),
        );
    }

    app.layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::availability::{AvailabilitySource, FixedSource};

    use super::*;

    fn app() -> Router {
        let source: Arc<dyn AvailabilitySource> = Arc::new(FixedSource(0.5));
        build_app(AppState::new(Facade::standard_set(&source)))
    }

    fn single_app(name: &str) -> Router {
        let source: Arc<dyn AvailabilitySource> = Arc::new(FixedSource(0.5));
        build_app(AppState::new(vec![Arc::new(Facade::single(name, &source))]))
    }

    async fn post_rpc(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(path)
                    .method("POST")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body_json: Value = serde_json::from_slice(&body).expect("valid json response");
        (status, body_json)
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        assert_eq!(body, "{\"status\":\"ok\"}");
    }

    #[tokio::test]
    async fn discovery_lists_the_mounted_facades() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/dispomon")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body_json: Value = serde_json::from_slice(&body).expect("valid json response");

        assert_eq!(body_json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(body_json["facades"].as_array().map(Vec::len), Some(5));
        assert_eq!(body_json["facades"][0]["route"], "/database");
        assert_eq!(body_json["facades"][0]["service"], "DATABASE");
    }

    #[tokio::test]
    async fn disponibility_request_with_positional_params_succeeds() {
        let (status, body) = post_rpc(
            app(),
            "/database",
            r#"{"jsonrpc":"2.0","id":1,"method":"get_disponibility","params":["2020-01-01","2020-01-31"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["name"], "DATABASE");
        assert_eq!(body["result"]["disponibility"], 0.5);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn disponibility_request_with_named_params_succeeds() {
        let (status, body) = post_rpc(
            app(),
            "/router",
            r#"{"jsonrpc":"2.0","id":2,"method":"get_disponibility","params":{"start_date":"2020-01-01","end_date":"2020-01-31"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
        assert_eq!(body["result"]["name"], "INTERNET ROUTER");
        assert_eq!(body["result"]["disponibility"], 0.5);
    }

    #[tokio::test]
    async fn notification_is_rejected_with_the_extension_code() {
        let (status, body) = post_rpc(
            app(),
            "/database",
            r#"{"jsonrpc":"2.0","method":"get_disponibility","params":["a","b"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], Value::Null);
        assert_eq!(body["error"]["code"], -32089);
        assert_eq!(body["error"]["message"], "JSON-RPC notifications not supported");
    }

    #[tokio::test]
    async fn batch_request_is_rejected_with_the_extension_code() {
        let (status, body) = post_rpc(
            app(),
            "/database",
            r#"[{"jsonrpc":"2.0","id":1,"method":"ping"},{"jsonrpc":"2.0","id":2,"method":"ping"}]"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], Value::Null);
        assert_eq!(body["error"]["code"], -32088);
        assert_eq!(body["error"]["message"], "JSON-RPC batch requests not supported");
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error_at_http_200() {
        let (status, body) = post_rpc(app(), "/database", "{").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["code"], -32700);
        assert_eq!(body["error"]["message"], "Parse error");
        assert_eq!(body["id"], Value::Null);
    }

    #[tokio::test]
    async fn scalar_root_is_an_invalid_request() {
        let (_, body) = post_rpc(app(), "/database", "42").await;

        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(
            body["error"]["message"],
            "Invalid request: request root is not an object"
        );
    }

    #[tokio::test]
    async fn wrong_version_keeps_the_request_id() {
        let (_, body) = post_rpc(
            app(),
            "/database",
            r#"{"jsonrpc":"1.0","id":9,"method":"get_disponibility","params":["a","b"]}"#,
        )
        .await;

        assert_eq!(body["id"], 9);
        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(
            body["error"]["message"],
            "Invalid request: invalid version number: 1.0"
        );
    }

    #[tokio::test]
    async fn unknown_method_returns_method_not_found() {
        let (_, body) = post_rpc(
            app(),
            "/database",
            r#"{"jsonrpc":"2.0","id":1,"method":"delete_everything"}"#,
        )
        .await;

        assert_eq!(body["id"], 1);
        assert_eq!(body["error"]["code"], -32601);
        assert_eq!(body["error"]["message"], "Method 'delete_everything' not found");
    }

    #[tokio::test]
    async fn three_element_params_are_invalid() {
        let (_, body) = post_rpc(
            app(),
            "/database",
            r#"{"jsonrpc":"2.0","id":1,"method":"get_disponibility","params":["a","b","c"]}"#,
        )
        .await;

        assert_eq!(body["error"]["code"], -32602);
        assert_eq!(
            body["error"]["message"],
            "Invalid parameters: array params must contain two values"
        );
    }

    #[tokio::test]
    async fn missing_params_are_invalid() {
        let (_, body) = post_rpc(
            app(),
            "/database",
            r#"{"jsonrpc":"2.0","id":1,"method":"get_disponibility"}"#,
        )
        .await;

        assert_eq!(body["error"]["code"], -32602);
        assert_eq!(
            body["error"]["message"],
            "Invalid parameters: params are required for \"get_disponibility\""
        );
    }

    #[tokio::test]
    async fn ping_answers_with_a_raw_empty_object() {
        let (_, body) = post_rpc(app(), "/link", r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#).await;

        assert_eq!(body["id"], 3);
        assert_eq!(body["result"], serde_json::json!({}));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn ping_with_params_is_invalid() {
        let (_, body) = post_rpc(
            app(),
            "/link",
            r#"{"jsonrpc":"2.0","id":3,"method":"ping","params":[]}"#,
        )
        .await;

        assert_eq!(body["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn each_catalog_facade_reports_its_own_identity() {
        for (route, name) in [
            ("/database", "DATABASE"),
            ("/server", "SERVER HARDWARE"),
            ("/app", "APPLICATION"),
            ("/link", "INTERNET LINK"),
            ("/router", "INTERNET ROUTER"),
        ] {
            let (_, body) = post_rpc(
                app(),
                route,
                r#"{"jsonrpc":"2.0","id":1,"method":"get_disponibility","params":["a","b"]}"#,
            )
            .await;
            assert_eq!(body["result"]["name"], name, "route {route}");
        }
    }

    #[tokio::test]
    async fn single_mode_serves_one_facade_at_rpc() {
        let (_, body) = post_rpc(
            single_app("STAGING DATABASE"),
            "/rpc",
            r#"{"jsonrpc":"2.0","id":1,"method":"get_disponibility","params":["a","b"]}"#,
        )
        .await;

        assert_eq!(body["result"]["name"], "STAGING DATABASE");
    }

    #[tokio::test]
    async fn single_mode_does_not_mount_the_catalog_routes() {
        let response = single_app("STAGING DATABASE")
            .oneshot(
                Request::builder()
                    .uri("/database")
                    .method("POST")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_post_is_not_a_service() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .method("POST")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
