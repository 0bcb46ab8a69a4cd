use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use metagrab::{app_state::AppState, config::Config, routes};

pub fn test_app() -> Router {
    let state = AppState::from_config(&Config::default()).expect("Failed to build app state");
    routes::app(state)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).expect("response body is JSON");
    (status, headers, json)
}

/// Percent-encodes `url` for use as the `url` query parameter.
pub fn meta_uri(url: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("url", url)
        .finish();
    format!("/api?{}", query)
}
