// src/handlers/annonces.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::annonce::{Annonce, AnnoncePayload, AnnonceQuery},
};

#[utoipa::path(
    post,
    path = "/annonces",
    tag = "Annonces",
    request_body = AnnoncePayload,
    responses(
        (status = 201, description = "Anúncio publicado", body = Annonce),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Terreno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn publish(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AnnoncePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let annonce = app_state.annonce_service.publish(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(annonce)))
}

#[utoipa::path(
    get,
    path = "/annonces",
    tag = "Annonces",
    params(AnnonceQuery),
    responses(
        (status = 200, description = "Anúncios filtrados por cidade e/ou terreno", body = Vec<Annonce>)
    )
)]
pub async fn search(
    State(app_state): State<AppState>,
    Query(query): Query<AnnonceQuery>,
) -> Result<Json<Vec<Annonce>>, AppError> {
    Ok(Json(app_state.annonce_service.search(&query).await?))
}
