// src/handlers/client.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        account::{Account, ProfileUpdatePayload},
        auth::{PasswordChangePayload, Role},
    },
};

#[utoipa::path(
    get,
    path = "/client/profile",
    tag = "Client",
    responses(
        (status = 200, description = "Perfil do cliente", body = Account)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Account>, AppError> {
    let account = app_state.auth_service.account(Role::Client, user.id).await?;
    Ok(Json(account))
}

#[utoipa::path(
    put,
    path = "/client/profile",
    tag = "Client",
    request_body = ProfileUpdatePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Account),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail ou telefone já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ProfileUpdatePayload>,
) -> Result<Json<Account>, AppError> {
    payload.validate()?;
    let account = app_state
        .auth_service
        .update_profile(Role::Client, user.id, &payload)
        .await?;
    Ok(Json(account))
}

#[utoipa::path(
    put,
    path = "/client/password",
    tag = "Client",
    request_body = PasswordChangePayload,
    responses(
        (status = 204, description = "Senha alterada"),
        (status = 400, description = "Senha atual incorreta ou nova senha inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_password(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<PasswordChangePayload>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;
    app_state
        .auth_service
        .change_password(
            Role::Client,
            user.id,
            &payload.current_password,
            &payload.new_password,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
