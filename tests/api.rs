use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use codesync_relay::{create_app, session::SessionStore, AppState, Config};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app_with_state() -> (Router, AppState) {
    let state = AppState::new(Arc::new(SessionStore::new()));
    (create_app(state.clone(), &Config::default()), state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_and_ready() {
    let (app, _) = app_with_state();
    let (status, body) = get_json(app.clone(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = get_json(app, "/api/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Service is ready");
}

#[tokio::test]
async fn session_lookup_never_creates() {
    let (app, state) = app_with_state();
    let (status, body) = get_json(app, "/api/v1/sessions/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert_eq!(state.store().session_count(), 0);
}

#[tokio::test]
async fn session_lookup_returns_current_state() {
    let (app, state) = app_with_state();
    state.store().get_or_create("s1");
    state.store().set_document("s1", "print(1)");
    state.store().set_language("s1", "python");

    let (status, body) = get_json(app.clone(), "/api/v1/sessions/s1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "s1");
    assert_eq!(body["code"], "print(1)");
    assert_eq!(body["language"], "python");
    assert_eq!(body["members"], 0);

    let (_, list) = get_json(app, "/api/v1/sessions").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], "s1");
}

#[tokio::test]
async fn diagnostics_counts_sessions() {
    let (app, state) = app_with_state();
    state.store().get_or_create("a");
    state.store().get_or_create("b");

    let (status, body) = get_json(app, "/api/v1/diagnostics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["n_sessions"], 2);
    assert_eq!(body["n_conn"], 0);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = app_with_state();
    let (status, body) = get_json(app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/sessions/{session_id}"].is_object());
}

#[tokio::test]
async fn unknown_paths_fall_back_to_the_client_bundle() {
    let dir = std::env::temp_dir().join(format!("codesync-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html>editor</html>").unwrap();
    std::fs::write(dir.join("app.js"), "console.log('app')").unwrap();

    let config = Config { static_dir: Some(dir.clone()), ..Config::default() };
    let app = create_app(AppState::new(Arc::new(SessionStore::new())), &config);

    let (status, body) = get(app.clone(), "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('app')");

    let (status, body) = get(app.clone(), "/session/abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<html>editor</html>");

    let (status, _) = get_json(app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn without_static_dir_unknown_paths_are_404() {
    let (app, _) = app_with_state();
    let (status, _) = get(app, "/session/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_misses_are_404_even_with_a_client_bundle() {
    let dir = std::env::temp_dir().join(format!("codesync-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html>editor</html>").unwrap();

    let config = Config { static_dir: Some(dir.clone()), ..Config::default() };
    let app = create_app(AppState::new(Arc::new(SessionStore::new())), &config);

    for uri in ["/api/v1/nope", "/api/v1/sessions/"] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["code"], 404);
        assert_eq!(body["error"], format!("No route for {uri}"));
    }

    let (status, body) = get(app, "/ws/extra").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_ne!(body, b"<html>editor</html>");

    std::fs::remove_dir_all(dir).ok();
}
