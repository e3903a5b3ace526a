// src/db/annonce_repo.rs

use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::annonce::{Annonce, AnnonceQuery},
};

const ANNONCE_SELECT: &str = r#"
    SELECT
        a.id, a.date, a.nbr_joueur,
        a.client_id, cl.nom AS client_name, cl.num_tele AS client_phone,
        a.terrain_id, t.nom AS terrain_name,
        c.nom AS complexe_name, c.ville
    FROM annonces a
    JOIN clients cl ON cl.id = a.client_id
    JOIN terrains t ON t.id = a.terrain_id
    JOIN complexes c ON c.id = t.complexe_id
"#;

#[derive(Clone)]
pub struct AnnonceRepository {
    pool: PgPool,
}

impl AnnonceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        client_id: i64,
        terrain_id: i64,
        date: NaiveDateTime,
        nbr_joueur: i32,
    ) -> Result<Annonce, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO annonces (date, client_id, terrain_id, nbr_joueur)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(date)
        .bind(client_id)
        .bind(terrain_id)
        .bind(nbr_joueur)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!("{} WHERE a.id = $1", ANNONCE_SELECT);
        let annonce = sqlx::query_as::<_, Annonce>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(annonce)
    }

    // Cidade sem diferenciar maiúsculas
    pub async fn search(&self, query: &AnnonceQuery) -> Result<Vec<Annonce>, AppError> {
        let sql = format!(
            "{} WHERE ($1::text IS NULL OR lower(c.ville) = lower($1))
                AND ($2::bigint IS NULL OR a.terrain_id = $2)
             ORDER BY a.date",
            ANNONCE_SELECT
        );
        let annonces = sqlx::query_as::<_, Annonce>(&sql)
            .bind(query.city.as_deref().map(str::trim).filter(|c| !c.is_empty()))
            .bind(query.terrain_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(annonces)
    }
}
