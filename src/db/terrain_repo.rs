// src/db/terrain_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::terrain::{Terrain, TerrainStatus, TerrainUpdatePayload},
};

const TERRAIN_COLUMNS: &str =
    "id, complexe_id, nom, prix_terrain, status, heure_ouverture, heure_fermeture, duree_creneau";

#[derive(Clone)]
pub struct TerrainRepository {
    pool: PgPool,
}

/// Dados já validados para inserir um terreno.
#[derive(Debug, Clone)]
pub struct NewTerrain<'a> {
    pub complexe_id: i64,
    pub nom: Option<&'a str>,
    pub prix_terrain: Decimal,
    pub status: TerrainStatus,
    pub heure_ouverture: i32,
    pub heure_fermeture: i32,
    pub duree_creneau: i32,
}

impl TerrainRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Terrain>, AppError> {
        let sql = format!("SELECT {} FROM terrains WHERE id = $1", TERRAIN_COLUMNS);
        let terrain = sqlx::query_as::<_, Terrain>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(terrain)
    }

    /// Bloqueia a linha do terreno até ao fim da transação. Reservas concorrentes
    /// no mesmo terreno ficam em fila aqui.
    pub async fn lock_for_booking<'e, E>(&self, executor: E, id: i64) -> Result<Option<Terrain>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {} FROM terrains WHERE id = $1 FOR UPDATE", TERRAIN_COLUMNS);
        let terrain = sqlx::query_as::<_, Terrain>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(terrain)
    }

    pub async fn list_by_complex(&self, complexe_id: i64) -> Result<Vec<Terrain>, AppError> {
        let sql = format!(
            "SELECT {} FROM terrains WHERE complexe_id = $1 ORDER BY id",
            TERRAIN_COLUMNS
        );
        let terrains = sqlx::query_as::<_, Terrain>(&sql)
            .bind(complexe_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(terrains)
    }

    // Uma só consulta para a listagem de complexos
    pub async fn list_by_complexes(&self, complexe_ids: &[i64]) -> Result<Vec<Terrain>, AppError> {
        let sql = format!(
            "SELECT {} FROM terrains WHERE complexe_id = ANY($1) ORDER BY id",
            TERRAIN_COLUMNS
        );
        let terrains = sqlx::query_as::<_, Terrain>(&sql)
            .bind(complexe_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(terrains)
    }

    pub async fn create(&self, new: &NewTerrain<'_>) -> Result<Terrain, AppError> {
        let sql = format!(
            "INSERT INTO terrains
                (complexe_id, nom, prix_terrain, status, heure_ouverture, heure_fermeture, duree_creneau)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            TERRAIN_COLUMNS
        );
        let terrain = sqlx::query_as::<_, Terrain>(&sql)
            .bind(new.complexe_id)
            .bind(new.nom)
            .bind(new.prix_terrain)
            .bind(new.status)
            .bind(new.heure_ouverture)
            .bind(new.heure_fermeture)
            .bind(new.duree_creneau)
            .fetch_one(&self.pool)
            .await?;
        Ok(terrain)
    }

    pub async fn update(&self, id: i64, changes: &TerrainUpdatePayload) -> Result<Option<Terrain>, AppError> {
        let sql = format!(
            "UPDATE terrains SET
                nom = COALESCE($2, nom),
                prix_terrain = COALESCE($3, prix_terrain),
                status = COALESCE($4, status),
                heure_ouverture = COALESCE($5, heure_ouverture),
                heure_fermeture = COALESCE($6, heure_fermeture),
                duree_creneau = COALESCE($7, duree_creneau)
             WHERE id = $1
             RETURNING {}",
            TERRAIN_COLUMNS
        );
        let terrain = sqlx::query_as::<_, Terrain>(&sql)
            .bind(id)
            .bind(changes.nom.as_deref())
            .bind(changes.prix_terrain)
            .bind(changes.status)
            .bind(changes.heure_ouverture)
            .bind(changes.heure_fermeture)
            .bind(changes.duree_creneau)
            .fetch_optional(&self.pool)
            .await?;
        Ok(terrain)
    }

    pub async fn count_with_status(&self, status: TerrainStatus) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM terrains WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
