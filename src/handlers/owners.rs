// src/handlers/owners.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        account::{Account, CreateOwnerPayload, OwnerProfile, ProfileUpdatePayload},
        complex::{Complex, ComplexPayload, ComplexResponse},
        dashboard::OwnerDashboardStats,
        reservation::{Reservation, ReservationStatus, ReservationView},
        terrain::{Terrain, TerrainPayload, TerrainUpdatePayload},
    },
};

// --- Admin ---

#[utoipa::path(
    post,
    path = "/api/owners/create",
    tag = "Owners",
    request_body = CreateOwnerPayload,
    responses(
        (status = 201, description = "Proprietário criado (e o complexo, se indicado)", body = Account),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail, telefone ou nome de complexo já utilizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_owner(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOwnerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let owner = app_state.owner_service.create_owner(&payload).await?;
    Ok((StatusCode::CREATED, Json(owner)))
}

#[utoipa::path(
    get,
    path = "/api/owners",
    tag = "Owners",
    responses(
        (status = 200, description = "Todos os proprietários", body = Vec<Account>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_owners(State(app_state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(app_state.owner_service.list_owners().await?))
}

// --- Proprietário ---

#[utoipa::path(
    get,
    path = "/api/owners/profile",
    tag = "Owners",
    responses(
        (status = 200, description = "Perfil do proprietário", body = OwnerProfile)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<OwnerProfile>, AppError> {
    Ok(Json(app_state.owner_service.profile(user.id).await?))
}

#[utoipa::path(
    put,
    path = "/api/owners/profile",
    tag = "Owners",
    request_body = ProfileUpdatePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = OwnerProfile),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ProfileUpdatePayload>,
) -> Result<Json<OwnerProfile>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .owner_service
            .update_profile(user.id, &payload)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/owners/complexes",
    tag = "Owners",
    responses(
        (status = 200, description = "Complexos do proprietário", body = Vec<ComplexResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_complexes(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ComplexResponse>>, AppError> {
    Ok(Json(app_state.owner_service.complexes(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/owners/complexes",
    tag = "Owners",
    request_body = ComplexPayload,
    responses(
        (status = 201, description = "Complexo criado", body = Complex),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_complex(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ComplexPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let complex = app_state.owner_service.add_complex(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(complex)))
}

#[utoipa::path(
    delete,
    path = "/api/owners/complexes/{id}",
    tag = "Owners",
    params(("id" = i64, Path, description = "ID do complexo")),
    responses(
        (status = 204, description = "Complexo removido"),
        (status = 403, description = "O complexo é de outro proprietário"),
        (status = 404, description = "Complexo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_complex(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.owner_service.delete_complex(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/owners/complexes/{id}/terrains",
    tag = "Owners",
    params(("id" = i64, Path, description = "ID do complexo")),
    responses(
        (status = 200, description = "Terrenos do complexo", body = Vec<Terrain>),
        (status = 403, description = "O complexo é de outro proprietário")
    ),
    security(("api_jwt" = []))
)]
pub async fn complex_terrains(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Terrain>>, AppError> {
    Ok(Json(app_state.owner_service.complex_terrains(user.id, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/owners/complexes/{id}/terrains",
    tag = "Owners",
    params(("id" = i64, Path, description = "ID do complexo")),
    request_body = TerrainPayload,
    responses(
        (status = 201, description = "Terreno criado", body = Terrain),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "O complexo é de outro proprietário")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_complex_terrain(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<TerrainPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let terrain = app_state
        .owner_service
        .add_terrain_to_complex(user.id, id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(terrain)))
}

#[utoipa::path(
    get,
    path = "/api/owners/terrains",
    tag = "Owners",
    responses(
        (status = 200, description = "Terrenos do primeiro complexo", body = Vec<Terrain>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_terrains(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Terrain>>, AppError> {
    Ok(Json(app_state.owner_service.terrains(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/owners/terrains",
    tag = "Owners",
    request_body = TerrainPayload,
    responses(
        (status = 201, description = "Terreno criado no primeiro complexo", body = Terrain),
        (status = 404, description = "O proprietário não tem complexo")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_terrain(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<TerrainPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let terrain = app_state.owner_service.add_terrain(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(terrain)))
}

#[utoipa::path(
    put,
    path = "/api/owners/terrains/{id}",
    tag = "Owners",
    params(("id" = i64, Path, description = "ID do terreno")),
    request_body = TerrainUpdatePayload,
    responses(
        (status = 200, description = "Terreno atualizado", body = Terrain),
        (status = 403, description = "O terreno é de outro proprietário"),
        (status = 404, description = "Terreno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_terrain(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<TerrainUpdatePayload>,
) -> Result<Json<Terrain>, AppError> {
    payload.validate()?;
    Ok(Json(
        app_state
            .owner_service
            .update_terrain(user.id, id, &payload)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/owners/reservations",
    tag = "Owners",
    responses(
        (status = 200, description = "Reservas nos terrenos do proprietário", body = Vec<ReservationView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn my_reservations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<ReservationView>>, AppError> {
    Ok(Json(app_state.owner_service.reservations(user.id).await?))
}

#[utoipa::path(
    put,
    path = "/api/owners/reservations/{id}/validate",
    tag = "Owners",
    params(("id" = i64, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva validada", body = Reservation),
        (status = 403, description = "A reserva não é de um terreno do proprietário")
    ),
    security(("api_jwt" = []))
)]
pub async fn validate_reservation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Reservation>, AppError> {
    Ok(Json(
        app_state
            .owner_service
            .set_reservation_status(user.id, id, ReservationStatus::Validee)
            .await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/owners/reservations/{id}/cancel",
    tag = "Owners",
    params(("id" = i64, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva anulada", body = Reservation),
        (status = 403, description = "A reserva não é de um terreno do proprietário")
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
            .owner_service
            .set_reservation_status(user.id, id, ReservationStatus::Annulee)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/owners/dashboard-stats",
    tag = "Owners",
    responses(
        (status = 200, description = "Indicadores do painel do proprietário", body = OwnerDashboardStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn dashboard_stats(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<OwnerDashboardStats>, AppError> {
    Ok(Json(app_state
        .dashboard_service
        .owner_stats(user.id, chrono::Local::now().date_naive())
        .await?))
}
