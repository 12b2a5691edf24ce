use crate::application::{
    commands::users::{CreateUserCommand, UpdateUserCommand},
    dto::{GroupDto, GroupSelectionDto, UserDto},
    error::ApplicationError,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub password_confirmation: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub activated: bool,
    /// Group id to membership flag.
    #[serde(default)]
    pub groups: BTreeMap<i64, bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    /// Leave blank to keep the current password.
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub activated: Option<bool>,
    #[serde(default)]
    pub groups: BTreeMap<i64, bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LookupParams {
    pub login: String,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct GroupSelectionParams {
    /// Mark the groups this user belongs to.
    pub user_id: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Every user with a computed status.", body = Vec<UserDto>),
        (status = 403, description = "Missing users:read.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn list_users(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_users(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created.", body = UserDto),
        (status = 400, description = "Invalid user form.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "A listed group does not exist.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Login already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateUserRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = CreateUserCommand {
        email: payload.email,
        password: payload.password,
        password_confirmation: payload.password_confirmation,
        first_name: payload.first_name,
        last_name: payload.last_name,
        activated: payload.activated,
        groups: payload.groups,
    };

    let created = state
        .services
        .user_commands
        .create_user(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/lookup",
    params(LookupParams),
    responses(
        (status = 200, description = "User with this login.", body = UserDto),
        (status = 404, description = "Unknown login.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn find_by_login(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<LookupParams>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .find_by_login(&user, &params.login)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User with a computed status.", body = UserDto),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .get_user(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated.", body = UserDto),
        (status = 404, description = "Unknown user or group.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Login already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateUserCommand {
        user_id: id,
        email: payload.email,
        password: payload.password,
        password_confirmation: payload.password_confirmation,
        first_name: payload.first_name,
        last_name: payload.last_name,
        activated: payload.activated,
        groups: payload.groups,
    };

    state
        .services
        .user_commands
        .update_user(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted."),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    let deleted = state
        .services
        .user_commands
        .destroy_user(&user, id)
        .await
        .into_http()?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HttpError::from_error(ApplicationError::not_found(format!(
            "user {id} not found"
        ))))
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/groups",
    responses(
        (status = 200, description = "Every group with its permissions.", body = Vec<GroupDto>)
    ),
    tag = "Users"
)]
pub async fn list_groups(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<GroupDto>>> {
    state
        .services
        .user_queries
        .list_groups(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/groups/selection",
    params(GroupSelectionParams),
    responses(
        (status = 200, description = "Groups as offered on a user form.", body = Vec<GroupSelectionDto>),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn group_selection(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<GroupSelectionParams>,
) -> HttpResult<Json<Vec<GroupSelectionDto>>> {
    state
        .services
        .user_queries
        .group_selection(&user, params.user_id)
        .await
        .into_http()
        .map(Json)
}
