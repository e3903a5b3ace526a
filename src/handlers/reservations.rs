// src/handlers/reservations.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        dashboard::CountResponse,
        reservation::{
            DateRangeQuery, Reservation, ReservationFilter, ReservationPayload,
            ReservationUpdatePayload, ReservationView,
        },
    },
    services::cancellation::CancellationWindow,
};

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted: u64,
}

// --- Cliente ---

#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservations",
    request_body = ReservationPayload,
    responses(
        (status = 201, description = "Reserva confirmada", body = Reservation),
        (status = 400, description = "Horário inválido, terreno fechado ou inexistente"),
        (status = 409, description = "Horário já reservado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_reservation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ReservationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let reservation = app_state
        .reservation_service
        .create(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

#[utoipa::path(
    get,
    path = "/api/my-reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "Reservas do cliente autenticado", body = Vec<ReservationView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_reservations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ReservationView>>, AppError> {
    Ok(Json(app_state.reservation_service.for_client(user.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/reservations/cancellation/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Se a reserva ainda pode ser anulada", body = CancellationWindow),
        (status = 403, description = "A reserva é de outro cliente"),
        (status = 404, description = "Reserva não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancellation_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<CancellationWindow>, AppError> {
    Ok(Json(
        app_state
            .reservation_service
            .cancellation(user.id, id, now())
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = i64, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva anulada", body = Reservation),
        (status = 403, description = "A reserva é de outro cliente"),
        (status = 409, description = "Reserva já anulada"),
        (status = 422, description = "Menos de 3h antes do início")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_reservation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Reservation>, AppError> {
    Ok(Json(
        app_state
            .reservation_service
            .cancel_by_client(user.id, id, now())
            .await?,
    ))
}

// --- Admin ---

#[utoipa::path(
    get,
    path = "/api/reservations/week",
    tag = "Reservations",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Reservas no intervalo", body = Vec<ReservationView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn reservations_between(
    State(app_state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<ReservationView>>, AppError> {
    Ok(Json(
        app_state
            .reservation_service
            .between(range.from, range.to)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/reservations/count",
    tag = "Reservations",
    responses(
        (status = 200, description = "Total de reservas", body = CountResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn count_reservations(
    State(app_state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = app_state.reservation_service.count().await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/reservations/week/count",
    tag = "Reservations",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Reservas no intervalo", body = CountResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn count_reservations_between(
    State(app_state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<CountResponse>, AppError> {
    let count = app_state
        .reservation_service
        .count_between(range.from, range.to)
        .await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/reservations/filter",
    tag = "Reservations",
    params(ReservationFilter),
    responses(
        (status = 200, description = "Reservas que satisfazem os filtros", body = Vec<ReservationView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn filter_reservations(
    State(app_state): State<AppState>,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<Vec<ReservationView>>, AppError> {
    Ok(Json(app_state.reservation_service.filter(&filter).await?))
}

#[utoipa::path(
    put,
    path = "/api/reservations/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "ID da reserva")),
    request_body = ReservationUpdatePayload,
    responses(
        (status = 200, description = "Reserva atualizada", body = Reservation),
        (status = 404, description = "Reserva não encontrada"),
        (status = 409, description = "Horário já reservado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdatePayload>,
) -> Result<Json<Reservation>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.reservation_service.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/reservations/{id}",
    tag = "Reservations",
    params(("id" = i64, Path, description = "ID da reserva")),
    responses(
        (status = 204, description = "Reserva removida"),
        (status = 404, description = "Reserva não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_reservation(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.reservation_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/reservations",
    tag = "Reservations",
    request_body = Vec<i64>,
    responses(
        (status = 200, description = "Reservas removidas", body = DeletedResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_reservations(
    State(app_state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = app_state.reservation_service.delete_many(&ids).await?;
    Ok(Json(DeletedResponse { deleted }))
}
