// src/handlers/complexes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        complex::{ComplexPayload, ComplexResponse},
        terrain::Terrain,
    },
};

#[utoipa::path(
    get,
    path = "/api/complexes",
    tag = "Complexes",
    responses(
        (status = 200, description = "Todos os complexos com proprietário e terrenos", body = Vec<ComplexResponse>)
    )
)]
pub async fn list_complexes(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ComplexResponse>>, AppError> {
    Ok(Json(app_state.complex_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/complexes/{id}",
    tag = "Complexes",
    params(("id" = i64, Path, description = "ID do complexo")),
    responses(
        (status = 200, description = "Complexo", body = ComplexResponse),
        (status = 404, description = "Complexo não encontrado")
    )
)]
pub async fn get_complex(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ComplexResponse>, AppError> {
    Ok(Json(app_state.complex_service.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/complexes/{id}/terrains",
    tag = "Complexes",
    params(("id" = i64, Path, description = "ID do complexo")),
    responses(
        (status = 200, description = "Terrenos do complexo", body = Vec<Terrain>),
        (status = 404, description = "Complexo não encontrado")
    )
)]
pub async fn list_complex_terrains(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Terrain>>, AppError> {
    Ok(Json(app_state.complex_service.terrains(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/complexes/{id}",
    tag = "Complexes",
    params(("id" = i64, Path, description = "ID do complexo")),
    request_body = ComplexPayload,
    responses(
        (status = 200, description = "Complexo atualizado", body = ComplexResponse),
        (status = 404, description = "Complexo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_complex(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComplexPayload>,
) -> Result<Json<ComplexResponse>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.complex_service.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/complexes/{id}",
    tag = "Complexes",
    params(("id" = i64, Path, description = "ID do complexo")),
    responses(
        (status = 204, description = "Complexo removido"),
        (status = 404, description = "Complexo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_complex(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.complex_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
