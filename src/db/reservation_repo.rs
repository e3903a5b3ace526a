// src/db/reservation_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::reservation::{Reservation, ReservationFilter, ReservationStatus, ReservationView},
};

const RESERVATION_COLUMNS: &str =
    "id, terrain_id, client_id, date, heure_debut, heure_fin, duree, status";

// Reserva + terreno + complexo + cliente
const VIEW_SELECT: &str = r#"
    SELECT
        r.id, r.status, r.date, r.heure_debut, r.heure_fin, r.duree,
        r.terrain_id, t.nom AS terrain_nom,
        c.id AS complex_id, c.nom AS complex_nom,
        t.prix_terrain AS price,
        r.client_id, cl.nom AS client_nom, cl.email AS client_email, cl.num_tele AS client_num_tele
    FROM reservations r
    JOIN terrains t ON t.id = r.terrain_id
    JOIN complexes c ON c.id = t.complexe_id
    JOIN clients cl ON cl.id = r.client_id
"#;

/// Campos de uma reserva a gravar, já validados.
#[derive(Debug, Clone, Copy)]
pub struct ReservationSlot {
    pub terrain_id: i64,
    pub date: NaiveDate,
    pub heure_debut: NaiveTime,
    pub heure_fin: NaiveTime,
    pub duree: i32,
}

#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let sql = format!("SELECT {} FROM reservations WHERE id = $1", RESERVATION_COLUMNS);
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(reservation)
    }

    /// Reservas não anuladas de um terreno num dia, por hora de início.
    pub async fn list_active_for_day(
        &self,
        terrain_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        let sql = format!(
            "SELECT {} FROM reservations
             WHERE terrain_id = $1 AND date = $2 AND status <> 'ANNULEE'
             ORDER BY heure_debut",
            RESERVATION_COLUMNS
        );
        let reservations = sqlx::query_as::<_, Reservation>(&sql)
            .bind(terrain_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(reservations)
    }

    /// `existing.start < new.end AND existing.end > new.start`, ignorando anuladas.
    pub async fn has_overlap<'e, E>(
        &self,
        executor: E,
        slot: &ReservationSlot,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let overlap = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE terrain_id = $1
                  AND date = $2
                  AND status <> 'ANNULEE'
                  AND heure_debut < $4
                  AND heure_fin > $3
                  AND ($5::bigint IS NULL OR id <> $5)
            )
            "#,
        )
        .bind(slot.terrain_id)
        .bind(slot.date)
        .bind(slot.heure_debut)
        .bind(slot.heure_fin)
        .bind(exclude_id)
        .fetch_one(executor)
        .await?;
        Ok(overlap)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        client_id: i64,
        slot: &ReservationSlot,
        status: ReservationStatus,
    ) -> Result<Reservation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO reservations (terrain_id, client_id, date, heure_debut, heure_fin, duree, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            RESERVATION_COLUMNS
        );
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(slot.terrain_id)
            .bind(client_id)
            .bind(slot.date)
            .bind(slot.heure_debut)
            .bind(slot.heure_fin)
            .bind(slot.duree)
            .bind(status)
            .fetch_one(executor)
            .await?;
        Ok(reservation)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        slot: &ReservationSlot,
        status: Option<ReservationStatus>,
    ) -> Result<Option<Reservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE reservations SET
                terrain_id = $2, date = $3, heure_debut = $4, heure_fin = $5, duree = $6,
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {}",
            RESERVATION_COLUMNS
        );
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .bind(slot.terrain_id)
            .bind(slot.date)
            .bind(slot.heure_debut)
            .bind(slot.heure_fin)
            .bind(slot.duree)
            .bind(status)
            .fetch_optional(executor)
            .await?;
        Ok(reservation)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Option<Reservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE reservations SET status = $2 WHERE id = $1 RETURNING {}",
            RESERVATION_COLUMNS
        );
        let reservation = sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(executor)
            .await?;
        Ok(reservation)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_many(&self, ids: &[i64]) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_for_client(&self, client_id: i64) -> Result<Vec<ReservationView>, AppError> {
        let sql = format!(
            "{} WHERE r.client_id = $1 ORDER BY r.date DESC, r.heure_debut DESC",
            VIEW_SELECT
        );
        let views = sqlx::query_as::<_, ReservationView>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(views)
    }

    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<ReservationView>, AppError> {
        let sql = format!(
            "{} WHERE c.owner_id = $1 ORDER BY r.date DESC, r.heure_debut DESC",
            VIEW_SELECT
        );
        let views = sqlx::query_as::<_, ReservationView>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(views)
    }

    pub async fn recent_for_owner(
        &self,
        owner_id: i64,
        limit: i64,
    ) -> Result<Vec<ReservationView>, AppError> {
        let sql = format!(
            "{} WHERE c.owner_id = $1 ORDER BY r.date DESC, r.heure_debut DESC LIMIT $2",
            VIEW_SELECT
        );
        let views = sqlx::query_as::<_, ReservationView>(&sql)
            .bind(owner_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(views)
    }

    /// Dono do complexo ao qual a reserva pertence.
    pub async fn owner_of(&self, reservation_id: i64) -> Result<Option<i64>, AppError> {
        let owner_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT c.owner_id
            FROM reservations r
            JOIN terrains t ON t.id = r.terrain_id
            JOIN complexes c ON c.id = t.complexe_id
            WHERE r.id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner_id)
    }

    pub async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ReservationView>, AppError> {
        let sql = format!(
            "{} WHERE r.date BETWEEN $1 AND $2 ORDER BY r.date, r.heure_debut",
            VIEW_SELECT
        );
        let views = sqlx::query_as::<_, ReservationView>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        Ok(views)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reservations WHERE date BETWEEN $1 AND $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // Filtros opcionais: um parâmetro NULL desativa a condição correspondente
    pub async fn filter(&self, filter: &ReservationFilter) -> Result<Vec<ReservationView>, AppError> {
        let sql = format!(
            "{} WHERE ($1::bigint IS NULL OR c.id = $1)
                AND ($2::bigint IS NULL OR r.client_id = $2)
                AND ($3::date IS NULL OR r.date >= $3)
                AND ($4::date IS NULL OR r.date <= $4)
                AND ($5::reservation_status IS NULL OR r.status = $5)
                AND ($6::int IS NULL OR r.duree >= $6)
                AND ($7::int IS NULL OR r.duree <= $7)
             ORDER BY r.date DESC, r.heure_debut DESC",
            VIEW_SELECT
        );
        let views = sqlx::query_as::<_, ReservationView>(&sql)
            .bind(filter.complex_id)
            .bind(filter.client_id)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(filter.status)
            .bind(filter.min_duration)
            .bind(filter.max_duration)
            .fetch_all(&self.pool)
            .await?;
        Ok(views)
    }
}
