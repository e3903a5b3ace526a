// src/client/api.rs

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use super::{
    error::ClientError,
    session::{access_token, clear_session, refresh_token, store_tokens, TokenStore},
};
use crate::{
    models::{
        account::Account,
        annonce::{Annonce, AnnoncePayload},
        auth::{LoginPayload, RefreshPayload, Role, SignupPayload, TokenResponse},
        complex::ComplexResponse,
        dashboard::{AdminStats, OwnerDashboardStats},
        reservation::{Reservation, ReservationPayload, ReservationView},
        terrain::Terrain,
    },
    services::availability::{booked_slots, slot_choices, SlotChoices},
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Junta o token do papel. Sem token, a sessão é limpa e nada é enviado.
    fn authorized(&self, role: Role, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        match access_token(self.store.as_ref(), role) {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Err(ClientError::Unauthorized {
                login_route: clear_session(self.store.as_ref(), role),
            }),
        }
    }

    // 401 é o único código com tratamento especial: apaga a sessão do papel.
    async fn check_status(&self, role: Option<Role>, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            if let Some(role) = role {
                let login_route = clear_session(self.store.as_ref(), role);
                tracing::warn!("Sessão {} expirada, redirecionar para {}", role.as_str(), login_route);
                return Err(ClientError::Unauthorized { login_route });
            }
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Erreur").to_string());
        Err(ClientError::Api { status, message })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        role: Option<Role>,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let builder = match role {
            Some(role) => self.authorized(role, builder)?,
            None => builder,
        };
        let response = builder.send().await?;
        let response = self.check_status(role, response).await?;
        Ok(response.json::<T>().await?)
    }

    // --- Autenticação ---

    /// Valida localmente antes de qualquer chamada de rede.
    pub async fn signup(&self, payload: &SignupPayload) -> Result<Account, ClientError> {
        payload.validate()?;
        self.send(None, self.http.post(self.url("/auth/client/signup")).json(payload))
            .await
    }

    pub async fn login(&self, role: Role, email: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let payload = LoginPayload {
            email: email.to_string(),
            password: password.to_string(),
        };
        payload.validate()?;

        let tokens: TokenResponse = self
            .send(None, self.http.post(self.url(role.login_endpoint())).json(&payload))
            .await?;
        store_tokens(self.store.as_ref(), role, &tokens);
        Ok(tokens)
    }

    pub async fn refresh(&self, role: Role) -> Result<TokenResponse, ClientError> {
        let refresh = refresh_token(self.store.as_ref(), role).ok_or_else(|| ClientError::Unauthorized {
            login_route: clear_session(self.store.as_ref(), role),
        })?;

        let payload = RefreshPayload { refresh_token: refresh };
        let tokens: TokenResponse = self
            .send(None, self.http.post(self.url("/auth/token/refresh")).json(&payload))
            .await
            .map_err(|e| match e {
                ClientError::Api { status, .. } if status == StatusCode::UNAUTHORIZED => {
                    ClientError::Unauthorized {
                        login_route: clear_session(self.store.as_ref(), role),
                    }
                }
                other => other,
            })?;
        store_tokens(self.store.as_ref(), role, &tokens);
        Ok(tokens)
    }

    pub fn logout(&self, role: Role) -> &'static str {
        clear_session(self.store.as_ref(), role)
    }

    // --- Público ---

    pub async fn complexes(&self) -> Result<Vec<ComplexResponse>, ClientError> {
        self.send(None, self.http.get(self.url("/api/complexes"))).await
    }

    pub async fn complex_terrains(&self, complex_id: i64) -> Result<Vec<Terrain>, ClientError> {
        self.send(
            None,
            self.http.get(self.url(&format!("/api/complexes/{}/terrains", complex_id))),
        )
        .await
    }

    pub async fn terrain_reservations(
        &self,
        terrain_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, ClientError> {
        self.send(
            None,
            self.http
                .get(self.url(&format!("/api/terrains/{}/reservations", terrain_id)))
                .query(&[("date", date.to_string())]),
        )
        .await
    }

    /// Horários livres calculados a partir das reservas do dia. Se a lista de
    /// reservas não puder ser obtida, o erro é devolvido: nunca se assume o dia livre.
    /// Terreno fechado ou em manutenção não tem horários.
    pub async fn terrain_availability(
        &self,
        terrain: &Terrain,
        date: NaiveDate,
        start: Option<u32>,
    ) -> Result<SlotChoices, ClientError> {
        if !terrain.is_bookable() {
            return Ok(SlotChoices::default());
        }
        let reservations = self.terrain_reservations(terrain.id, date).await?;
        let booked = booked_slots(&reservations);
        Ok(slot_choices(terrain.opening_hours(), &booked, start))
    }

    pub async fn annonces(&self, city: Option<&str>) -> Result<Vec<Annonce>, ClientError> {
        let mut request = self.http.get(self.url("/annonces"));
        if let Some(city) = city {
            request = request.query(&[("city", city)]);
        }
        self.send(None, request).await
    }

    // --- Cliente ---

    pub async fn create_reservation(&self, payload: &ReservationPayload) -> Result<Reservation, ClientError> {
        payload.validate()?;
        self.send(
            Some(Role::Client),
            self.http.post(self.url("/api/reservations")).json(payload),
        )
        .await
    }

    pub async fn my_reservations(&self) -> Result<Vec<ReservationView>, ClientError> {
        self.send(Some(Role::Client), self.http.get(self.url("/api/my-reservations")))
            .await
    }

    pub async fn cancel_reservation(&self, reservation_id: i64) -> Result<Reservation, ClientError> {
        self.send(
            Some(Role::Client),
            self.http
                .post(self.url(&format!("/api/reservations/{}/cancel", reservation_id))),
        )
        .await
    }

    pub async fn publish_annonce(&self, payload: &AnnoncePayload) -> Result<Annonce, ClientError> {
        payload.validate()?;
        self.send(Some(Role::Client), self.http.post(self.url("/annonces")).json(payload))
            .await
    }

    // --- Proprietário ---

    pub async fn owner_dashboard(&self) -> Result<OwnerDashboardStats, ClientError> {
        self.send(
            Some(Role::Owner),
            self.http.get(self.url("/api/owners/dashboard-stats")),
        )
        .await
    }

    pub async fn owner_reservations(&self) -> Result<Vec<ReservationView>, ClientError> {
        self.send(
            Some(Role::Owner),
            self.http.get(self.url("/api/owners/reservations")),
        )
        .await
    }

    // --- Admin ---

    pub async fn admin_stats(&self) -> Result<AdminStats, ClientError> {
        self.send(Some(Role::Admin), self.http.get(self.url("/admin/stats")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::MemoryTokenStore;
    use axum::{
        extract::Path,
        http::StatusCode as AxumStatus,
        routing::{get, post},
        Json, Router,
    };
    use rust_decimal::Decimal;
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::models::terrain::TerrainStatus;

    async fn reservations_for(Path(id): Path<i64>) -> (AxumStatus, Json<serde_json::Value>) {
        if id == 1 {
            return (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Une erreur inattendue s'est produite" })),
            );
        }
        (
            AxumStatus::OK,
            Json(json!([{
                "id": 10, "terrainId": id, "clientId": 3, "date": "2025-06-14",
                "heureDebut": "14:00:00", "heureFin": "16:00:00", "duree": 120,
                "status": "CONFIRMEE"
            }])),
        )
    }

    async fn unauthorized() -> (AxumStatus, Json<serde_json::Value>) {
        (
            AxumStatus::UNAUTHORIZED,
            Json(json!({ "message": "Jeton d'authentification invalide ou absent." })),
        )
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/terrains/{id}/reservations", get(reservations_for))
            .route("/api/my-reservations", get(unauthorized))
            .route("/api/owners/dashboard-stats", get(unauthorized))
            .route("/auth/client/signup", post(unauthorized));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn terrain(id: i64) -> Terrain {
        Terrain {
            id,
            complexe_id: 1,
            nom: None,
            prix_terrain: Decimal::new(300, 0),
            status: TerrainStatus::Ouvert,
            heure_ouverture: 9,
            heure_fermeture: 23,
            duree_creneau: 60,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_response_clears_only_that_role() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set("kc_access_token", "expired".into());
        store.set("kc_refresh_token", "expired-refresh".into());
        store.set("admin_access_token", "admin".into());

        let client = ApiClient::new(spawn_server().await, store.clone());
        let err = client.my_reservations().await.unwrap_err();

        assert_eq!(err.login_route(), Some("/login"));
        assert_eq!(store.get("kc_access_token"), None);
        assert_eq!(store.get("kc_refresh_token"), None);
        assert_eq!(store.get("admin_access_token").as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn owner_unauthorized_points_to_owner_login() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set("owner_token", "expired".into());
        store.set("ownerToken", "legacy".into());

        let client = ApiClient::new(spawn_server().await, store.clone());
        let err = client.owner_dashboard().await.unwrap_err();

        assert_eq!(err.login_route(), Some("/owner/login"));
        assert_eq!(store.get("owner_token"), None);
        assert_eq!(store.get("ownerToken"), None);
    }

    #[test]
    fn logout_returns_the_role_login_page() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set("admin_access_token", "admin".into());
        store.set("kc_access_token", "client".into());

        let client = ApiClient::new("http://127.0.0.1:9", store.clone());
        assert_eq!(client.logout(Role::Admin), "/admin/login");
        assert_eq!(store.get("admin_access_token"), None);
        assert_eq!(store.get("kc_access_token").as_deref(), Some("client"));
    }

    #[tokio::test]
    async fn missing_token_fails_without_request() {
        // Porta sem servidor: se houvesse pedido, o erro seria de transporte
        let client = ApiClient::new("http://127.0.0.1:9", Arc::new(MemoryTokenStore::new()));
        let err = client.admin_stats().await.unwrap_err();
        assert_eq!(err.login_route(), Some("/admin/login"));
    }

    #[tokio::test]
    async fn short_password_signup_is_rejected_before_network() {
        let client = ApiClient::new("http://127.0.0.1:9", Arc::new(MemoryTokenStore::new()));
        let payload = SignupPayload {
            email: "ana@example.com".into(),
            password: "12345".into(),
            nom: "Ana".into(),
            prenom: None,
            num_tele: None,
        };
        let err = client.signup(&payload).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn availability_uses_fetched_reservations() {
        let client = ApiClient::new(spawn_server().await, Arc::new(MemoryTokenStore::new()));
        let choices = client
            .terrain_availability(&terrain(2), date(), Some(12))
            .await
            .unwrap();
        assert!(!choices.start_hours.contains(&14));
        assert!(!choices.start_hours.contains(&15));
        assert_eq!(choices.end_hours, vec![13, 14]);
    }

    #[tokio::test]
    async fn terrain_under_maintenance_offers_no_slots() {
        // Porta sem servidor: as reservas nem chegam a ser pedidas
        let client = ApiClient::new("http://127.0.0.1:9", Arc::new(MemoryTokenStore::new()));
        let mut closed = terrain(2);
        closed.status = TerrainStatus::Maintenance;

        let choices = client
            .terrain_availability(&closed, date(), Some(12))
            .await
            .unwrap();
        assert_eq!(choices, SlotChoices::default());
    }

    #[tokio::test]
    async fn failed_reservation_fetch_is_an_error() {
        let client = ApiClient::new(spawn_server().await, Arc::new(MemoryTokenStore::new()));
        let err = client
            .terrain_availability(&terrain(1), date(), None)
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "Une erreur inattendue s'est produite");
            }
            other => panic!("erro inesperado: {:?}", other),
        }
    }
}
