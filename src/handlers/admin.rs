// src/handlers/admin.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        account::{Account, CreateOwnerPayload},
        complex::ComplexResponse,
        dashboard::AdminStats,
    },
};

// O formulário "ajouter un complexe" cria o proprietário e o complexo de uma vez
#[utoipa::path(
    post,
    path = "/admin/addComplexe",
    tag = "Admin",
    request_body = CreateOwnerPayload,
    responses(
        (status = 201, description = "Proprietário e complexo criados", body = Account),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail, telefone ou nome de complexo já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_complexe(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOwnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let owner = app_state.owner_service.create_owner(&payload).await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

#[utoipa::path(
    get,
    path = "/admin/seeAllComplexe",
    tag = "Admin",
    responses(
        (status = 200, description = "Todos os complexos", body = Vec<ComplexResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn see_all_complexes(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ComplexResponse>>, AppError> {
    Ok(Json(app_state.complex_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Indicadores do painel do admin", body = AdminStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn stats(State(app_state): State<AppState>) -> Result<Json<AdminStats>, AppError> {
    Ok(Json(app_state.dashboard_service.admin_stats().await?))
}
