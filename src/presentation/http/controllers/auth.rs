use crate::application::{
    commands::users::{
        ActivateUserCommand, CheckResetCodeCommand, LoginUserCommand, RegisterUserCommand,
        RequestPasswordResetCommand, ResetPasswordCommand,
    },
    dto::{AuthTokenDto, UserDto, UserProfileDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// The account email.
    #[serde(alias = "email")]
    pub login: String,
    pub password: String,
    /// Issue a long-lived token.
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub password_confirmation: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserDto,
    pub activation_required: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivateRequest {
    pub user_id: i64,
    pub code: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    #[serde(alias = "email")]
    pub login: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckResetCodeRequest {
    pub user_id: i64,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckResetCodeResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub user_id: i64,
    pub code: String,
    pub password: String,
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted.", body = LoginResponse),
        (status = 400, description = "Login or password missing.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Wrong password.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Account not activated, suspended or banned.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown login.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResponse>> {
    let command = LoginUserCommand {
        login: payload.login,
        password: payload.password,
        remember: payload.remember,
    };

    let result = state
        .services
        .user_commands
        .login(command)
        .await
        .into_http()?;

    Ok(Json(LoginResponse {
        token: result.token,
        user: result.user,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session revoked."),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn logout(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<StatusCode> {
    state
        .services
        .user_commands
        .logout(&user)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "The caller's profile and capabilities.", body = UserProfileDto),
        (status = 401, description = "Missing or invalid token.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created.", body = RegisterResponse),
        (status = 400, description = "Invalid registration form.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Login already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<(StatusCode, Json<RegisterResponse>)> {
    let command = RegisterUserCommand {
        email: payload.email,
        password: payload.password,
        password_confirmation: payload.password_confirmation,
        first_name: payload.first_name,
        last_name: payload.last_name,
    };

    let result = state
        .services
        .user_commands
        .register(command)
        .await
        .into_http()?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: result.user,
            activation_required: result.activation_required,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/activate",
    request_body = ActivateRequest,
    responses(
        (status = 200, description = "Account activated.", body = UserDto),
        (status = 400, description = "Wrong activation code.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Account already active.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn activate(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<ActivateRequest>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .activate(ActivateUserCommand {
            user_id: payload.user_id,
            code: payload.code,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password/forgot",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 202, description = "Reset code mailed.", body = StatusResponse),
        (status = 404, description = "Unknown login.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn forgot_password(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> HttpResult<(StatusCode, Json<StatusResponse>)> {
    state
        .services
        .user_commands
        .request_password_reset(RequestPasswordResetCommand {
            login: payload.login,
        })
        .await
        .into_http()?;

    Ok((
        StatusCode::ACCEPTED,
        Json(StatusResponse {
            status: "sent".into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password/check",
    request_body = CheckResetCodeRequest,
    responses(
        (status = 200, description = "Whether the reset code is valid.", body = CheckResetCodeResponse),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn check_reset_code(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CheckResetCodeRequest>,
) -> HttpResult<Json<CheckResetCodeResponse>> {
    let valid = state
        .services
        .user_commands
        .check_reset_code(CheckResetCodeCommand {
            user_id: payload.user_id,
            code: payload.code,
        })
        .await
        .into_http()?;
    Ok(Json(CheckResetCodeResponse { valid }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password/reset",
    request_body = ResetPasswordRequest,
    responses(
        (status = 204, description = "Password replaced."),
        (status = 400, description = "Invalid code or password.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth",
    security(())
)]
pub async fn reset_password(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> HttpResult<StatusCode> {
    state
        .services
        .user_commands
        .reset_password(ResetPasswordCommand {
            user_id: payload.user_id,
            code: payload.code,
            password: payload.password,
            password_confirmation: payload.password_confirmation,
        })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
