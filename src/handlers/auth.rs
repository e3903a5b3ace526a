// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        account::Account,
        auth::{LoginPayload, RefreshPayload, Role, SignupPayload, TokenResponse},
    },
};

async fn login_as(
    app_state: &AppState,
    role: Role,
    payload: &LoginPayload,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;
    let tokens = app_state
        .auth_service
        .login(role, &payload.email, &payload.password)
        .await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/auth/client/signup",
    tag = "Auth",
    request_body = SignupPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Account),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já utilizado")
    )
)]
pub async fn client_signup(
    State(app_state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let account = app_state.auth_service.signup_client(&payload).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    post,
    path = "/auth/client/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Tokens emitidos", body = TokenResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn client_login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    login_as(&app_state, Role::Client, &payload).await
}

#[utoipa::path(
    post,
    path = "/auth/owner/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Tokens emitidos", body = TokenResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn owner_login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    login_as(&app_state, Role::Owner, &payload).await
}

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Tokens emitidos", body = TokenResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn admin_login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    login_as(&app_state, Role::Admin, &payload).await
}

#[utoipa::path(
    post,
    path = "/auth/token/refresh",
    tag = "Auth",
    request_body = RefreshPayload,
    responses(
        (status = 200, description = "Novo par de tokens", body = TokenResponse),
        (status = 401, description = "Refresh token inválido ou expirado")
    )
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;
    let tokens = app_state.auth_service.refresh(&payload.refresh_token).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    get,
    path = "/auth/client/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Cliente autenticado", body = Account),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn client_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Account>, AppError> {
    let account = app_state.auth_service.account(Role::Client, user.id).await?;
    Ok(Json(account))
}
