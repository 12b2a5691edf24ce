use crate::application::dto::{
    AuthTokenDto, CapabilityView, ContentDto, GroupDto, GroupSelectionDto, Page, TranslationDto,
    UserDto, UserProfileDto,
};
use crate::domain::{content::ContentKind, user::UserStatus};
use crate::presentation::http::controllers::{auth, content, users};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        content::list_galleries,
        content::show_gallery,
        content::list_news,
        content::show_news,
        content::admin_list,
        content::admin_create,
        content::admin_show,
        content::admin_update,
        content::admin_delete,
        auth::login,
        auth::logout,
        auth::profile,
        auth::register,
        auth::activate,
        auth::forgot_password,
        auth::check_reset_code,
        auth::reset_password,
        users::list_users,
        users::create_user,
        users::find_by_login,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::list_groups,
        users::group_selection,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            content::TranslationRequest,
            content::ContentRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::RegisterResponse,
            auth::ActivateRequest,
            auth::ForgotPasswordRequest,
            auth::CheckResetCodeRequest,
            auth::CheckResetCodeResponse,
            auth::ResetPasswordRequest,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            ContentKind,
            ContentDto,
            TranslationDto,
            Page<ContentDto>,
            UserStatus,
            UserDto,
            UserProfileDto,
            AuthTokenDto,
            CapabilityView,
            GroupDto,
            GroupSelectionDto
        )
    ),
    tags(
        (name = "Galleries", description = "Published galleries"),
        (name = "News", description = "Published news"),
        (name = "Admin", description = "Content management for every module"),
        (name = "Auth", description = "Login, registration, activation and password reset"),
        (name = "Users", description = "User and group management"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Folio CMS API",
        description = "Multilingual galleries and news with user management",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:8080") {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the document to `OPENAPI_SNAPSHOT_PATH` (default `spec/openapi.json`).
pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let document = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}
