// src/db/complex_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::complex::Complex};

#[derive(Clone)]
pub struct ComplexRepository {
    pool: PgPool,
}

impl ComplexRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Complex>, AppError> {
        let complexes = sqlx::query_as::<_, Complex>(
            r#"
            SELECT id, owner_id, nom, ville, adress
            FROM complexes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(complexes)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Complex>, AppError> {
        let complex = sqlx::query_as::<_, Complex>(
            "SELECT id, owner_id, nom, ville, adress FROM complexes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(complex)
    }

    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Complex>, AppError> {
        let complexes = sqlx::query_as::<_, Complex>(
            r#"
            SELECT id, owner_id, nom, ville, adress
            FROM complexes
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(complexes)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_id: i64,
        nom: &str,
        ville: &str,
        adress: &str,
    ) -> Result<Complex, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let complex = sqlx::query_as::<_, Complex>(
            r#"
            INSERT INTO complexes (owner_id, nom, ville, adress)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, nom, ville, adress
            "#,
        )
        .bind(owner_id)
        .bind(nom)
        .bind(ville)
        .bind(adress)
        .fetch_one(executor)
        .await?;
        Ok(complex)
    }

    pub async fn update(
        &self,
        id: i64,
        nom: &str,
        ville: &str,
        adress: &str,
    ) -> Result<Option<Complex>, AppError> {
        let complex = sqlx::query_as::<_, Complex>(
            r#"
            UPDATE complexes SET nom = $2, ville = $3, adress = $4
            WHERE id = $1
            RETURNING id, owner_id, nom, ville, adress
            "#,
        )
        .bind(id)
        .bind(nom)
        .bind(ville)
        .bind(adress)
        .fetch_optional(&self.pool)
        .await?;
        Ok(complex)
    }

    // Terrenos e reservas caem em cascata (ON DELETE CASCADE)
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM complexes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
