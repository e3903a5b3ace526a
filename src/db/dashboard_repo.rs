// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{AdminStats, OwnerCounters},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Receita = soma do preço do terreno das reservas validadas.
    // `today` vem do relógio da aplicação, não do fuso da sessão do banco.
    pub async fn owner_counters(&self, owner_id: i64, today: NaiveDate) -> Result<OwnerCounters, AppError> {
        let counters = sqlx::query_as::<_, OwnerCounters>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM complexes WHERE owner_id = $1) AS total_complexes,
                (SELECT COUNT(*) FROM terrains t
                    JOIN complexes c ON c.id = t.complexe_id
                    WHERE c.owner_id = $1) AS total_terrains,
                (SELECT COUNT(*) FROM terrains t
                    JOIN complexes c ON c.id = t.complexe_id
                    WHERE c.owner_id = $1 AND t.status = 'OUVERT') AS active_terrains,
                COUNT(r.id) AS total_reservations,
                COUNT(r.id) FILTER (WHERE r.status = 'EN_ATTENTE') AS pending_reservations,
                COUNT(r.id) FILTER (WHERE r.date = $2) AS reservations_aujourdhui,
                COALESCE(SUM(t.prix_terrain) FILTER (WHERE r.status = 'VALIDEE'), 0) AS total_revenue
            FROM reservations r
            JOIN terrains t ON t.id = r.terrain_id
            JOIN complexes c ON c.id = t.complexe_id
            WHERE c.owner_id = $1
            "#,
        )
        .bind(owner_id)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(counters)
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, AppError> {
        let stats = sqlx::query_as::<_, AdminStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM complexes) AS total_complexes,
                (SELECT COUNT(*) FROM owners) AS total_owners,
                (SELECT COUNT(*) FROM clients) AS total_clients,
                (SELECT COUNT(*) FROM terrains WHERE status = 'OUVERT') AS active_terrains,
                (SELECT COUNT(*) FROM reservations) AS total_reservations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}
