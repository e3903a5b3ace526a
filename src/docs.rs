// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::client_signup,
        handlers::auth::client_login,
        handlers::auth::owner_login,
        handlers::auth::admin_login,
        handlers::auth::refresh_token,
        handlers::auth::client_me,

        // --- Client ---
        handlers::client::get_profile,
        handlers::client::update_profile,
        handlers::client::change_password,

        // --- Complexes ---
        handlers::complexes::list_complexes,
        handlers::complexes::get_complex,
        handlers::complexes::list_complex_terrains,
        handlers::complexes::update_complex,
        handlers::complexes::delete_complex,

        // --- Terrains ---
        handlers::terrains::count_active,
        handlers::terrains::total_active_count,
        handlers::terrains::terrain_reservations,
        handlers::terrains::terrain_availability,

        // --- Reservations ---
        handlers::reservations::create_reservation,
        handlers::reservations::my_reservations,
        handlers::reservations::cancellation_status,
        handlers::reservations::cancel_reservation,
        handlers::reservations::reservations_between,
        handlers::reservations::count_reservations,
        handlers::reservations::count_reservations_between,
        handlers::reservations::filter_reservations,
        handlers::reservations::update_reservation,
        handlers::reservations::delete_reservation,
        handlers::reservations::delete_reservations,

        // --- Owners ---
        handlers::owners::create_owner,
        handlers::owners::list_owners,
        handlers::owners::get_profile,
        handlers::owners::update_profile,
        handlers::owners::my_complexes,
        handlers::owners::add_complex,
        handlers::owners::delete_complex,
        handlers::owners::complex_terrains,
        handlers::owners::add_complex_terrain,
        handlers::owners::my_terrains,
        handlers::owners::add_terrain,
        handlers::owners::update_terrain,
        handlers::owners::my_reservations,
        handlers::owners::validate_reservation,
        handlers::owners::cancel_reservation,
        handlers::owners::dashboard_stats,

        // --- Admin ---
        handlers::admin::add_complexe,
        handlers::admin::see_all_complexes,
        handlers::admin::stats,

        // --- Annonces ---
        handlers::annonces::publish,
        handlers::annonces::search,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::TokenResponse,
            models::auth::LoginPayload,
            models::auth::SignupPayload,
            models::auth::RefreshPayload,
            models::auth::PasswordChangePayload,

            // --- Contas ---
            models::account::Account,
            models::account::ProfileUpdatePayload,
            models::account::CreateOwnerPayload,
            models::account::OwnerProfile,

            // --- Complexes / Terrains ---
            models::complex::Complex,
            models::complex::OwnerSummary,
            models::complex::ComplexResponse,
            models::complex::ComplexPayload,
            models::terrain::TerrainStatus,
            models::terrain::Terrain,
            models::terrain::TerrainPayload,
            models::terrain::TerrainUpdatePayload,

            // --- Reservations ---
            models::reservation::ReservationStatus,
            models::reservation::Reservation,
            models::reservation::ReservationView,
            models::reservation::ReservationPayload,
            models::reservation::ReservationUpdatePayload,
            models::reservation::TerrainAvailability,
            services::cancellation::CancellationWindow,
            handlers::reservations::DeletedResponse,

            // --- Dashboard ---
            models::dashboard::OwnerCounters,
            models::dashboard::OwnerDashboardStats,
            models::dashboard::AdminStats,
            models::dashboard::CountResponse,

            // --- Annonces ---
            models::annonce::Annonce,
            models::annonce::AnnoncePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login dos três papéis, registo de clientes e refresh"),
        (name = "Client", description = "Perfil e senha do cliente"),
        (name = "Complexes", description = "Complexos desportivos"),
        (name = "Terrains", description = "Terrenos e disponibilidade"),
        (name = "Reservations", description = "Reservas de clientes e gestão pelo admin"),
        (name = "Owners", description = "Área do proprietário e gestão de proprietários"),
        (name = "Admin", description = "Painel do administrador"),
        (name = "Annonces", description = "Anúncios à procura de jogadores")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
