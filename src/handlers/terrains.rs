// src/handlers/terrains.rs

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        dashboard::CountResponse,
        reservation::{AvailabilityQuery, DayQuery, Reservation, TerrainAvailability},
    },
};

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[utoipa::path(
    get,
    path = "/api/terrains/active/count",
    tag = "Terrains",
    responses(
        (status = 200, description = "Número de terrenos abertos", body = CountResponse)
    )
)]
pub async fn count_active(State(app_state): State<AppState>) -> Result<Json<CountResponse>, AppError> {
    let count = app_state.terrain_service.count_active().await?;
    Ok(Json(CountResponse { count }))
}

// Mesmo valor de /active/count; o painel do admin usa esta rota
#[utoipa::path(
    get,
    path = "/api/terrains/active/total-count",
    tag = "Terrains",
    responses(
        (status = 200, description = "Número de terrenos abertos", body = i64)
    )
)]
pub async fn total_active_count(State(app_state): State<AppState>) -> Result<Json<i64>, AppError> {
    Ok(Json(app_state.terrain_service.count_active().await?))
}

#[utoipa::path(
    get,
    path = "/api/terrains/{id}/reservations",
    tag = "Terrains",
    params(("id" = i64, Path, description = "ID do terreno"), DayQuery),
    responses(
        (status = 200, description = "Reservas não anuladas do dia", body = Vec<Reservation>),
        (status = 404, description = "Terreno não encontrado")
    )
)]
pub async fn terrain_reservations(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let date = query.date.unwrap_or_else(today);
    Ok(Json(app_state.terrain_service.reservations_for_day(id, date).await?))
}

#[utoipa::path(
    get,
    path = "/api/terrains/{id}/availability",
    tag = "Terrains",
    params(("id" = i64, Path, description = "ID do terreno"), AvailabilityQuery),
    responses(
        (status = 200, description = "Horas de início e de fim livres", body = TerrainAvailability),
        (status = 404, description = "Terreno não encontrado")
    )
)]
pub async fn terrain_availability(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<TerrainAvailability>, AppError> {
    let date = query.date.unwrap_or_else(today);
    Ok(Json(
        app_state
            .terrain_service
            .availability(id, date, query.start)
            .await?,
    ))
}
