// tests/support/helpers.rs
use super::mocks::{
    DummyClock, DummyTokenManager, InMemoryAuthProvider, InMemoryContentRepo, RecordingMailer,
};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use folio_cms::application::{
    commands::users::RegistrationSettings,
    locale::LocaleSettings,
    services::{ApplicationServices, ServiceSettings},
};
use folio_cms::domain::{content::Locale, user::GroupId};
use folio_cms::infrastructure::{
    security::session_store::InMemorySessionRevocationStore, util::DefaultSlugGenerator,
};
use folio_cms::presentation::http::{routes::build_router_with_rate_limiter, state::HttpState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;

/// Router plus handles on the in-memory collaborators behind it.
pub struct TestApp {
    pub router: axum::Router,
    pub services: Arc<ApplicationServices>,
    pub auth: Arc<InMemoryAuthProvider>,
    pub content: Arc<InMemoryContentRepo>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        locales: LocaleSettings::new(
            Locale::new("en").unwrap(),
            vec![Locale::new("en").unwrap(), Locale::new("fr").unwrap()],
        ),
        items_per_page: 10,
        slug_max_attempts: 100,
        registration: RegistrationSettings {
            default_group: GroupId::new(1).unwrap(),
            requires_confirmation: true,
            site_name: "Folio".into(),
        },
    }
}

pub fn build_test_app_with(settings: ServiceSettings) -> TestApp {
    let auth = Arc::new(InMemoryAuthProvider::default());
    let content = Arc::new(InMemoryContentRepo::default());
    let mailer = Arc::new(RecordingMailer::default());

    let services = Arc::new(ApplicationServices::new(
        content.clone(),
        content.clone(),
        auth.clone(),
        Arc::new(DummyTokenManager::default()),
        Arc::new(InMemorySessionRevocationStore::new()),
        mailer.clone(),
        Arc::new(DummyClock),
        Arc::new(DefaultSlugGenerator),
        settings,
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let router = build_router_with_rate_limiter(state, &[], false);

    TestApp {
        router,
        services,
        auth,
        content,
        mailer,
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(test_settings())
}

pub async fn make_test_router() -> axum::Router {
    build_test_app().router
}

/// Sends a request, with an optional bearer token and JSON body, and returns
/// the status with the decoded body (`Null` when empty).
pub async fn send_json(
    router: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        ct.starts_with("application/json"),
        "unexpected content-type: {ct}"
    );
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(
        !msg_field.is_empty(),
        "expected non-empty message field in ErrorResponse"
    );
}
