//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{health, metrics_endpoint, ready, scan, status, test_endpoint, AppState};

/// Create the API router.
///
/// Cross-origin requests are allowed from any origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Mock scan API
        .route("/api/scan", post(scan))
        .route("/api/test", get(test_endpoint))
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Status and metrics
        .route("/api/v1/status", get(status))
        .route("/metrics", get(metrics_endpoint))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::scan::MockScanner;

    fn instant_state() -> AppState {
        AppState::with_scanner(MockScanner::with_delay(Duration::ZERO))
    }

    async fn send(app: Router, request: Request<Body>) -> Response {
        app.oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn test_endpoint_returns_exact_message() {
        let response = send(create_router(instant_state()), get_request("/api/test")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"message":"Mock API is working!"}"#);
    }

    #[tokio::test]
    async fn scan_endpoint_returns_success_payload() {
        let response = send(
            create_router(instant_state()),
            post_request("/api/scan", Body::empty()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Mock scan processed");
        assert_eq!(json["modelUrl"], "models/130.glb");

        let scan_id = json["scanId"].as_str().unwrap();
        let seconds = scan_id.strip_prefix("mock_").unwrap();
        assert!(seconds.parse::<i64>().is_ok(), "bad scan id: {scan_id}");
    }

    #[tokio::test]
    async fn scan_endpoint_ignores_request_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/scan")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
            .body(Body::from("not really multipart"))
            .unwrap();

        let response = send(create_router(instant_state()), request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test(start_paused = true)]
    async fn scan_endpoint_takes_at_least_two_seconds() {
        let app = create_router(AppState::new());
        let start = tokio::time::Instant::now();

        let response = send(app, post_request("/api/scan", Body::empty())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn scan_endpoint_rejects_get() {
        let response = send(create_router(instant_state()), get_request("/api/scan")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = send(create_router(instant_state()), get_request("/api/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cross_origin_request_is_allowed() {
        let request = Request::builder()
            .uri("/api/test")
            .header(header::ORIGIN, "http://frontend.example:8000")
            .body(Body::empty())
            .unwrap();

        let response = send(create_router(instant_state()), request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn preflight_for_scan_is_allowed() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/scan")
            .header(header::ORIGIN, "http://192.168.1.20:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = send(create_router(instant_state()), request).await;

        assert!(response.status().is_success());
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let response = send(create_router(instant_state()), get_request("/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn ready_endpoint_returns_503_when_not_ready() {
        let response = send(create_router(instant_state()), get_request("/ready")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ready_endpoint_returns_200_when_ready() {
        let state = instant_state();
        state.set_ready(true);

        let response = send(create_router(state), get_request("/ready")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn status_counts_served_scans() {
        let state = instant_state();
        state.set_ready(true);
        let app = create_router(state.clone());

        for _ in 0..2 {
            let response = send(app.clone(), post_request("/api/scan", Body::empty())).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let json = body_json(send(app, get_request("/api/v1/status")).await).await;
        assert_eq!(json["status"], "running");
        assert_eq!(json["scansServed"], 2);
        assert_eq!(state.scan_count(), 2);
    }

    #[tokio::test]
    async fn metrics_endpoint_is_404_without_recorder() {
        let response = send(create_router(instant_state()), get_request("/metrics")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_with_recorder() {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let state = instant_state().with_metrics(handle);

        let response = send(create_router(state), get_request("/metrics")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
