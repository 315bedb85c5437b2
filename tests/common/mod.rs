use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

use empre::config::{AuthConfig, Config, ObservabilityConfig, ServerConfig, StorageConfig};

pub const TEST_SECRET: &str = "test-secret-long-enough-for-anyone";
pub const TEST_TTL_SECONDS: i64 = 60 * 60 * 8;

pub struct TestApp {
    pub router: Router,
    // Keeps the per-test data directory alive for the test's duration
    _data_dir: TempDir,
}

pub fn test_config(data_dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
        },
        auth: AuthConfig {
            session_secret: TEST_SECRET.to_string(),
            session_ttl_seconds: TEST_TTL_SECONDS,
            cookie_secure: false,
        },
        storage: StorageConfig {
            data_dir: data_dir.path().to_string_lossy().into_owned(),
        },
        observability: ObservabilityConfig::default(),
    }
}

/// Fresh app over an empty temp data directory; the stores bootstrap their
/// default documents on first access.
pub fn create_test_app() -> TestApp {
    let data_dir = TempDir::new().unwrap();
    let router = empre::create_app(&test_config(&data_dir));
    TestApp {
        router,
        _data_dir: data_dir,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request_with_cookie(
    method: &str,
    uri: &str,
    cookie: &str,
    body: &Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn request_with_cookie(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// `name=value` pair from the response's Set-Cookie header, ready to be sent
/// back in a Cookie header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in with the bootstrapped administrator and return the session cookie.
pub async fn login_as_admin(router: &Router) -> String {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &serde_json::json!({ "username": "admin", "password": "admin123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}
