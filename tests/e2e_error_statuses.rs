use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header::AUTHORIZATION};
use tower::util::ServiceExt as _;

mod support;

use support::{ADMIN_TOKEN, EXPIRED_TOKEN, VISITOR_TOKEN};

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Unknown slug on a public route is a 404.
#[tokio::test]
async fn e2e_get_news_by_unknown_slug_returns_404() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/api/v1/news/nonexistent", None, None))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

/// Admin routes only know the configured modules.
#[tokio::test]
async fn e2e_unknown_module_returns_404() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/api/v1/admin/pages", Some(ADMIN_TOKEN), None))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn e2e_unknown_user_returns_404() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/api/v1/users/999", Some(ADMIN_TOKEN), None))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

/// Missing capability on an admin operation is a 403.
#[tokio::test]
async fn e2e_visitor_on_admin_list_returns_403() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/api/v1/admin/news", Some(VISITOR_TOKEN), None))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn e2e_visitor_creating_content_returns_403() {
    let app = support::make_test_router().await;

    let body = serde_json::json!({ "translations": [{ "lang": "en", "title": "t", "slug": "t" }] });
    let resp = app
        .oneshot(request(Method::POST, "/api/v1/admin/galleries", Some(VISITOR_TOKEN), Some(body)))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn e2e_missing_token_returns_401() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/api/v1/admin/news", None, None))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn e2e_expired_token_returns_401() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/api/v1/auth/me", Some(EXPIRED_TOKEN), None))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

/// Registering an existing login is a conflict.
#[tokio::test]
async fn e2e_register_existing_email_returns_409() {
    let app = support::make_test_router().await;

    let body = serde_json::json!({
        "email": "admin@example.com",
        "password": "some-password",
        "first_name": "Dup",
        "last_name": "Licate"
    });
    let resp = app
        .oneshot(request(Method::POST, "/api/v1/auth/register", None, Some(body)))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

/// Validation failures are a 400.
#[tokio::test]
async fn e2e_duplicate_translation_locale_returns_400() {
    let app = support::make_test_router().await;

    let body = serde_json::json!({ "translations": [
        { "lang": "en", "title": "One", "slug": "one" },
        { "lang": "en", "title": "Two", "slug": "two" }
    ] });
    let resp = app
        .oneshot(request(Method::POST, "/api/v1/admin/news", Some(ADMIN_TOKEN), Some(body)))
        .await
        .unwrap();
    support::assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn e2e_health_is_public() {
    let app = support::make_test_router().await;

    let resp = app
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
