use crate::application::{
    commands::content::{
        CreateContentCommand, DeleteContentCommand, TranslationInput, UpdateContentCommand,
    },
    dto::{ContentDto, Page},
    error::ApplicationError,
    queries::content::{GetContentByIdQuery, GetContentBySlugQuery, ListContentQuery},
};
use crate::domain::content::ContentKind;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PublicListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Locale to list; the default locale when omitted.
    pub lang: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LangParams {
    pub lang: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AdminListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslationRequest {
    pub lang: Option<String>,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContentRequest {
    pub translations: Vec<TranslationRequest>,
}

impl From<TranslationRequest> for TranslationInput {
    fn from(value: TranslationRequest) -> Self {
        Self {
            lang: value.lang,
            title: value.title,
            slug: value.slug,
            summary: value.summary,
            body: value.body,
            published: value.published,
        }
    }
}

fn parse_kind(raw: &str) -> HttpResult<ContentKind> {
    raw.parse().map_err(|_| {
        HttpError::from_error(ApplicationError::not_found(format!(
            "unknown module '{raw}'"
        )))
    })
}

async fn published_page(
    state: &HttpState,
    kind: ContentKind,
    params: PublicListParams,
) -> HttpResult<Json<Page<ContentDto>>> {
    state
        .services
        .content_queries
        .list_published(
            kind,
            ListContentQuery {
                page: params.page,
                per_page: params.per_page,
                lang: params.lang,
            },
        )
        .await
        .into_http()
        .map(Json)
}

async fn published_item(
    state: &HttpState,
    kind: ContentKind,
    slug: String,
    params: LangParams,
) -> HttpResult<Json<ContentDto>> {
    state
        .services
        .content_queries
        .get_by_slug(GetContentBySlugQuery {
            kind,
            slug,
            lang: params.lang,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/galleries",
    params(PublicListParams),
    responses(
        (status = 200, description = "Published galleries in the requested locale.", body = Page<ContentDto>),
        (status = 400, description = "Unsupported locale.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Galleries",
    security(())
)]
pub async fn list_galleries(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PublicListParams>,
) -> HttpResult<Json<Page<ContentDto>>> {
    published_page(&state, ContentKind::Galleries, params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/galleries/{slug}",
    params(("slug" = String, Path, description = "Gallery slug"), LangParams),
    responses(
        (status = 200, description = "Gallery with its published translation.", body = ContentDto),
        (status = 404, description = "No published gallery has this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Galleries",
    security(())
)]
pub async fn show_gallery(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<LangParams>,
) -> HttpResult<Json<ContentDto>> {
    published_item(&state, ContentKind::Galleries, slug, params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/news",
    params(PublicListParams),
    responses(
        (status = 200, description = "Published news in the requested locale.", body = Page<ContentDto>),
        (status = 400, description = "Unsupported locale.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "News",
    security(())
)]
pub async fn list_news(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PublicListParams>,
) -> HttpResult<Json<Page<ContentDto>>> {
    published_page(&state, ContentKind::News, params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/news/{slug}",
    params(("slug" = String, Path, description = "News slug"), LangParams),
    responses(
        (status = 200, description = "News item with its published translation.", body = ContentDto),
        (status = 404, description = "No published news item has this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "News",
    security(())
)]
pub async fn show_news(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<LangParams>,
) -> HttpResult<Json<ContentDto>> {
    published_item(&state, ContentKind::News, slug, params).await
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/{kind}",
    params(("kind" = String, Path, description = "`galleries` or `news`"), AdminListParams),
    responses(
        (status = 200, description = "Every item of the module with all translations.", body = Page<ContentDto>),
        (status = 403, description = "Missing read capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn admin_list(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(kind): Path<String>,
    Query(params): Query<AdminListParams>,
) -> HttpResult<Json<Page<ContentDto>>> {
    let kind = parse_kind(&kind)?;
    state
        .services
        .content_queries
        .list_all(
            &user,
            kind,
            ListContentQuery {
                page: params.page,
                per_page: params.per_page,
                lang: None,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/{kind}",
    params(("kind" = String, Path, description = "`galleries` or `news`")),
    request_body = ContentRequest,
    responses(
        (status = 201, description = "Item created; slugs are assigned per locale.", body = ContentDto),
        (status = 400, description = "Invalid translations.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing create capability.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn admin_create(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(kind): Path<String>,
    Json(payload): Json<ContentRequest>,
) -> HttpResult<(StatusCode, Json<ContentDto>)> {
    let kind = parse_kind(&kind)?;
    let command = CreateContentCommand {
        kind,
        translations: payload.translations.into_iter().map(Into::into).collect(),
    };

    let created = state
        .services
        .content_commands
        .create_content(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`galleries` or `news`"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item with all translations.", body = ContentDto),
        (status = 404, description = "Item not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn admin_show(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((kind, id)): Path<(String, i64)>,
) -> HttpResult<Json<ContentDto>> {
    let kind = parse_kind(&kind)?;
    state
        .services
        .content_queries
        .get_by_id(&user, GetContentByIdQuery { kind, id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`galleries` or `news`"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = ContentRequest,
    responses(
        (status = 200, description = "Item updated.", body = ContentDto),
        (status = 404, description = "Item not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "No free slug could be assigned.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn admin_update(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((kind, id)): Path<(String, i64)>,
    Json(payload): Json<ContentRequest>,
) -> HttpResult<Json<ContentDto>> {
    let kind = parse_kind(&kind)?;
    let command = UpdateContentCommand {
        id,
        kind,
        translations: payload.translations.into_iter().map(Into::into).collect(),
    };

    state
        .services
        .content_commands
        .update_content(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`galleries` or `news`"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item deleted with its translations."),
        (status = 404, description = "Item not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn admin_delete(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((kind, id)): Path<(String, i64)>,
) -> HttpResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    state
        .services
        .content_commands
        .delete_content(&user, DeleteContentCommand { id, kind })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
