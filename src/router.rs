// src/router.rs

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Settings},
    docs::ApiDoc,
    handlers,
    middleware::auth::{admin_guard, client_guard, owner_guard},
};

pub fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Origem CORS ignorada '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// Cada grupo de rotas recebe o guard do seu papel e todos são fundidos com caminhos
// completos. Um mesmo caminho pode ter métodos em grupos diferentes
// (ex.: GET público e PUT admin em /api/complexes/{id}).
pub fn build_router(app_state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/auth/client/signup", post(handlers::auth::client_signup))
        .route("/auth/client/login", post(handlers::auth::client_login))
        .route("/auth/owner/login", post(handlers::auth::owner_login))
        .route("/admin/login", post(handlers::auth::admin_login))
        .route("/auth/token/refresh", post(handlers::auth::refresh_token))
        .route("/api/complexes", get(handlers::complexes::list_complexes))
        .route("/api/complexes/{id}", get(handlers::complexes::get_complex))
        .route(
            "/api/complexes/{id}/terrains",
            get(handlers::complexes::list_complex_terrains),
        )
        .route("/api/terrains/active/count", get(handlers::terrains::count_active))
        .route(
            "/api/terrains/active/total-count",
            get(handlers::terrains::total_active_count),
        )
        .route(
            "/api/terrains/{id}/reservations",
            get(handlers::terrains::terrain_reservations),
        )
        .route(
            "/api/terrains/{id}/availability",
            get(handlers::terrains::terrain_availability),
        )
        .route("/annonces", get(handlers::annonces::search));

    let client_routes = Router::new()
        .route("/auth/client/me", get(handlers::auth::client_me))
        .route(
            "/client/profile",
            get(handlers::client::get_profile).put(handlers::client::update_profile),
        )
        .route("/client/password", put(handlers::client::change_password))
        .route("/api/reservations", post(handlers::reservations::create_reservation))
        .route("/api/my-reservations", get(handlers::reservations::my_reservations))
        .route(
            "/api/reservations/{id}/cancel",
            post(handlers::reservations::cancel_reservation),
        )
        .route(
            "/api/reservations/cancellation/{id}",
            get(handlers::reservations::cancellation_status),
        )
        .route("/annonces", post(handlers::annonces::publish))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            client_guard,
        ));

    let owner_routes = Router::new()
        .route(
            "/api/owners/profile",
            get(handlers::owners::get_profile).put(handlers::owners::update_profile),
        )
        .route(
            "/api/owners/complexes",
            get(handlers::owners::my_complexes).post(handlers::owners::add_complex),
        )
        .route("/api/owners/complexes/{id}", delete(handlers::owners::delete_complex))
        .route(
            "/api/owners/complexes/{id}/terrains",
            get(handlers::owners::complex_terrains).post(handlers::owners::add_complex_terrain),
        )
        .route(
            "/api/owners/terrains",
            get(handlers::owners::my_terrains).post(handlers::owners::add_terrain),
        )
        .route("/api/owners/terrains/{id}", put(handlers::owners::update_terrain))
        .route("/api/owners/reservations", get(handlers::owners::my_reservations))
        .route(
            "/api/owners/reservations/{id}/validate",
            put(handlers::owners::validate_reservation),
        )
        .route(
            "/api/owners/reservations/{id}/cancel",
            put(handlers::owners::cancel_reservation),
        )
        .route("/api/owners/dashboard-stats", get(handlers::owners::dashboard_stats))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            owner_guard,
        ));

    let admin_routes = Router::new()
        .route("/admin/addComplexe", post(handlers::admin::add_complexe))
        .route("/admin/seeAllComplexe", get(handlers::admin::see_all_complexes))
        .route("/admin/stats", get(handlers::admin::stats))
        .route("/api/owners", get(handlers::owners::list_owners))
        .route("/api/owners/create", post(handlers::owners::create_owner))
        .route(
            "/api/complexes/{id}",
            put(handlers::complexes::update_complex).delete(handlers::complexes::delete_complex),
        )
        .route(
            "/api/reservations",
            delete(handlers::reservations::delete_reservations),
        )
        .route(
            "/api/reservations/{id}",
            put(handlers::reservations::update_reservation)
                .delete(handlers::reservations::delete_reservation),
        )
        .route("/api/reservations/week", get(handlers::reservations::reservations_between))
        .route("/api/reservations/count", get(handlers::reservations::count_reservations))
        .route(
            "/api/reservations/week/count",
            get(handlers::reservations::count_reservations_between),
        )
        .route("/api/reservations/filter", get(handlers::reservations::filter_reservations))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    let cors = build_cors_layer(&app_state.settings);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(client_routes)
        .merge(owner_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
