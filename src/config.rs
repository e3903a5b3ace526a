// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{
        AccountRepository, AnnonceRepository, ComplexRepository, DashboardRepository,
        ReservationRepository, TerrainRepository,
    },
    services::{
        annonce_service::AnnonceService,
        auth::{AuthService, TokenIssuer},
        complex_service::ComplexService,
        dashboard_service::DashboardService,
        owner_service::OwnerService,
        reservation_service::ReservationService,
        terrain_service::TerrainService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";
const DEFAULT_ACCESS_TTL_MINUTES: i64 = 300;
const DEFAULT_REFRESH_TTL_MINUTES: i64 = 1800;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
    pub db_max_connections: u32,
    /// Conta de administrador criada no arranque, se ainda não existir.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET não pode ser vazio");
        }

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            cors_origins,
            access_ttl_minutes: parse_var("JWT_ACCESS_TTL_MINUTES", DEFAULT_ACCESS_TTL_MINUTES)?,
            refresh_ttl_minutes: parse_var("JWT_REFRESH_TTL_MINUTES", DEFAULT_REFRESH_TTL_MINUTES)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} tem um valor inválido: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Arc<Settings>,
    pub tokens: TokenIssuer,
    pub auth_service: AuthService,
    pub complex_service: ComplexService,
    pub terrain_service: TerrainService,
    pub reservation_service: ReservationService,
    pub owner_service: OwnerService,
    pub annonce_service: AnnonceService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Settings::from_env()?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(db_pool: PgPool, settings: Settings) -> Self {
        let account_repo = AccountRepository::new(db_pool.clone());
        let complex_repo = ComplexRepository::new(db_pool.clone());
        let terrain_repo = TerrainRepository::new(db_pool.clone());
        let reservation_repo = ReservationRepository::new(db_pool.clone());
        let annonce_repo = AnnonceRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let tokens = TokenIssuer::new(
            settings.jwt_secret.clone(),
            settings.access_ttl_minutes,
            settings.refresh_ttl_minutes,
        );

        let auth_service = AuthService::new(account_repo.clone(), tokens.clone());
        let complex_service = ComplexService::new(
            complex_repo.clone(),
            terrain_repo.clone(),
            account_repo.clone(),
        );
        let terrain_service = TerrainService::new(
            terrain_repo.clone(),
            complex_repo.clone(),
            reservation_repo.clone(),
        );
        let reservation_service = ReservationService::new(
            db_pool.clone(),
            reservation_repo.clone(),
            terrain_repo.clone(),
            account_repo.clone(),
        );
        let owner_service = OwnerService::new(
            db_pool.clone(),
            account_repo.clone(),
            complex_repo,
            reservation_repo.clone(),
            complex_service.clone(),
            terrain_service.clone(),
            reservation_service.clone(),
        );
        let annonce_service = AnnonceService::new(annonce_repo, terrain_repo, account_repo);
        let dashboard_service = DashboardService::new(dashboard_repo, reservation_repo);

        Self {
            db_pool,
            settings: Arc::new(settings),
            tokens,
            auth_service,
            complex_service,
            terrain_service,
            reservation_service,
            owner_service,
            annonce_service,
            dashboard_service,
        }
    }
}
