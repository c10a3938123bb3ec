mod db_tests;
mod review_api_tests;

pub(crate) use axum::body::Body;
pub(crate) use axum::http::{header, Request, StatusCode};
pub(crate) use http_body_util::BodyExt;
pub(crate) use tower::ServiceExt;

use sqlx::sqlite::SqlitePoolOptions;

use crate::config::{AppConfig, AuthConfig, DatabaseConfig, MediaConfig, ServerConfig};
use crate::state::AppState;

/// Builds a router over an in-memory database and a temporary media dir.
/// The TempDir must stay alive for the duration of the test.
pub(crate) async fn setup_test_app() -> (axum::Router, AppState, tempfile::TempDir) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::db::init_db(&pool).await.unwrap();

    let media_dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 8000 },
        database: DatabaseConfig { url: "sqlite::memory:".to_string() },
        auth: AuthConfig {
            secret_key: "unit-test-secret-key".to_string(),
            token_expire_minutes: 30,
        },
        media: MediaConfig {
            dir: media_dir.path().to_string_lossy().into_owned(),
            max_upload_bytes: 10 * 1024 * 1024,
        },
    };

    let state = AppState::new(pool, config);
    let app = crate::routes::router().with_state(state.clone());
    (app, state, media_dir)
}

pub(crate) async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub(crate) async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub(crate) async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub(crate) async fn get_authed(
    app: &axum::Router,
    uri: &str,
    token: &str,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub(crate) async fn post_authed(
    app: &axum::Router,
    uri: &str,
    token: &str,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Creates a user through the API and logs in; returns (user id, token).
pub(crate) async fn signup_and_login(app: &axum::Router, username: &str) -> (i64, String) {
    let resp = post_json(
        app,
        "/users/create",
        serde_json::json!({
            "username": username,
            "password": "correct-horse-battery",
            "age": 30,
            "gender": "male",
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_i64().unwrap();

    let form = format!("username={}&password=correct-horse-battery", username);
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let token = body_json(resp).await["access_token"].as_str().unwrap().to_string();
    (id, token)
}

/// Creates a movie through the API; returns its id.
pub(crate) async fn create_test_movie(app: &axum::Router, title: &str) -> i64 {
    let resp = post_json(
        app,
        "/movies",
        serde_json::json!({
            "title": title,
            "plot": "A test movie.",
            "playtime": 120,
            "genre": ["drama"],
            "cast": ["Nobody"],
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}

/// Builds a multipart/form-data body for the review endpoints.
pub(crate) fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((name, filename, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

pub(crate) async fn send_multipart(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> axum::response::Response {
    let boundary = "kinosaal-test-boundary";
    let body = multipart_body(boundary, fields, file);
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}
