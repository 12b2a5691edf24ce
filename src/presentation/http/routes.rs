use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{auth, content, users},
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    build_router_with_rate_limiter(state, allowed_origins, true)
}

/// Builds the full API. `rate_limit` guards the credential endpoints with a
/// per-IP governor; those routes then need the peer address from
/// `into_make_service_with_connect_info`.
pub fn build_router_with_rate_limiter(
    state: HttpState,
    allowed_origins: &[String],
    rate_limit: bool,
) -> Router {
    let mut credentials = Router::new()
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/activate", post(auth::activate))
        .route("/api/v1/auth/password/forgot", post(auth::forgot_password))
        .route("/api/v1/auth/password/check", post(auth::check_reset_code))
        .route("/api/v1/auth/password/reset", post(auth::reset_password));

    if rate_limit {
        match rate_limit_layer() {
            Some(layer) => credentials = credentials.layer(layer),
            None => tracing::warn!("rate limiter rejected its quota; auth routes are unthrottled"),
        }
    }

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/galleries", get(content::list_galleries))
        .route("/api/v1/galleries/{slug}", get(content::show_gallery))
        .route("/api/v1/news", get(content::list_news))
        .route("/api/v1/news/{slug}", get(content::show_news))
        .route(
            "/api/v1/admin/{kind}",
            get(content::admin_list).post(content::admin_create),
        )
        .route(
            "/api/v1/admin/{kind}/{id}",
            get(content::admin_show)
                .put(content::admin_update)
                .delete(content::admin_delete),
        )
        .merge(credentials)
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route("/api/v1/users/lookup", get(users::find_by_login))
        .route(
            "/api/v1/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/api/v1/groups", get(users::list_groups))
        .route("/api/v1/groups/selection", get(users::group_selection))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

/// An empty list or `*` allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System",
    security(())
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
