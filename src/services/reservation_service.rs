// src/services/reservation_service.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{
        reservation_repo::ReservationSlot, AccountRepository, ReservationRepository,
        TerrainRepository,
    },
    models::{
        auth::Role,
        reservation::{
            Reservation, ReservationFilter, ReservationPayload, ReservationStatus,
            ReservationUpdatePayload, ReservationView,
        },
        terrain::Terrain,
    },
    services::cancellation::{cancellation_window, reservation_start, CancellationWindow},
};

fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) / 60
}

/// Duração em minutos entre o início e o fim.
pub fn duration_minutes(heure_debut: NaiveTime, heure_fin: NaiveTime) -> i32 {
    (heure_fin - heure_debut).num_minutes() as i32
}

/// Regras que dependem só do terreno: estado e horário de funcionamento.
pub fn check_slot_bounds(
    terrain: &Terrain,
    heure_debut: NaiveTime,
    heure_fin: NaiveTime,
) -> Result<(), AppError> {
    if heure_debut >= heure_fin {
        return Err(AppError::BadRequest(
            "L'heure de début doit être avant l'heure de fin".to_string(),
        ));
    }
    if !terrain.is_bookable() {
        return Err(AppError::BadRequest(format!(
            "{} n'est pas ouvert à la réservation",
            terrain.display_name()
        )));
    }

    let open = i64::from(terrain.heure_ouverture) * 60;
    let close = i64::from(terrain.heure_fermeture) * 60;
    if minutes_of_day(heure_debut) < open || minutes_of_day(heure_fin) > close {
        return Err(AppError::BadRequest(format!(
            "Le créneau doit être entre {}h et {}h",
            terrain.heure_ouverture, terrain.heure_fermeture
        )));
    }
    Ok(())
}

/// Uma reserva anulada que volta a um estado ativo.
pub fn reactivates(current: ReservationStatus, next: ReservationStatus) -> bool {
    current == ReservationStatus::Annulee && next != ReservationStatus::Annulee
}

#[derive(Clone)]
pub struct ReservationService {
    pool: PgPool,
    reservation_repo: ReservationRepository,
    terrain_repo: TerrainRepository,
    account_repo: AccountRepository,
}

impl ReservationService {
    pub fn new(
        pool: PgPool,
        reservation_repo: ReservationRepository,
        terrain_repo: TerrainRepository,
        account_repo: AccountRepository,
    ) -> Self {
        Self {
            pool,
            reservation_repo,
            terrain_repo,
            account_repo,
        }
    }

    async fn find(&self, id: i64) -> Result<Reservation, AppError> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Réservation {} introuvable", id)))
    }

    // Linha do terreno bloqueada durante toda a transação: duas reservas simultâneas
    // no mesmo terreno são verificadas uma depois da outra.
    pub async fn create(&self, client_id: i64, payload: &ReservationPayload) -> Result<Reservation, AppError> {
        if !self.account_repo.exists(Role::Client, client_id).await? {
            return Err(AppError::BadRequest("Client introuvable".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        let terrain = self
            .terrain_repo
            .lock_for_booking(&mut *tx, payload.terrain_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Terrain introuvable".to_string()))?;

        check_slot_bounds(&terrain, payload.heure_debut, payload.heure_fin)?;

        let slot = ReservationSlot {
            terrain_id: terrain.id,
            date: payload.date,
            heure_debut: payload.heure_debut,
            heure_fin: payload.heure_fin,
            duree: duration_minutes(payload.heure_debut, payload.heure_fin),
        };

        if self.reservation_repo.has_overlap(&mut *tx, &slot, None).await? {
            return Err(AppError::Conflict(
                "Ce créneau est déjà réservé pour ce terrain.".to_string(),
            ));
        }

        let reservation = self
            .reservation_repo
            .create(&mut *tx, client_id, &slot, ReservationStatus::Confirmee)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Reserva {} criada: terreno {} em {} {}-{}",
            reservation.id,
            terrain.id,
            slot.date,
            slot.heure_debut,
            slot.heure_fin
        );
        Ok(reservation)
    }

    pub async fn update(&self, id: i64, payload: &ReservationUpdatePayload) -> Result<Reservation, AppError> {
        self.find(id).await?;

        let mut tx = self.pool.begin().await?;

        let terrain = self
            .terrain_repo
            .lock_for_booking(&mut *tx, payload.terrain_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Terrain introuvable".to_string()))?;

        check_slot_bounds(&terrain, payload.heure_debut, payload.heure_fin)?;

        let slot = ReservationSlot {
            terrain_id: terrain.id,
            date: payload.date,
            heure_debut: payload.heure_debut,
            heure_fin: payload.heure_fin,
            duree: duration_minutes(payload.heure_debut, payload.heure_fin),
        };

        if self.reservation_repo.has_overlap(&mut *tx, &slot, Some(id)).await? {
            return Err(AppError::Conflict(
                "Ce créneau est déjà réservé pour ce terrain.".to_string(),
            ));
        }

        let reservation = self
            .reservation_repo
            .update(&mut *tx, id, &slot, payload.status)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Réservation {} introuvable", id)))?;

        tx.commit().await?;
        Ok(reservation)
    }

    pub async fn for_client(&self, client_id: i64) -> Result<Vec<ReservationView>, AppError> {
        self.reservation_repo.list_for_client(client_id).await
    }

    async fn find_owned_by(&self, client_id: i64, id: i64) -> Result<Reservation, AppError> {
        let reservation = self.find(id).await?;
        if reservation.client_id != client_id {
            return Err(AppError::Forbidden(
                "Cette réservation ne vous appartient pas.".to_string(),
            ));
        }
        Ok(reservation)
    }

    pub async fn cancellation(
        &self,
        client_id: i64,
        id: i64,
        now: NaiveDateTime,
    ) -> Result<CancellationWindow, AppError> {
        let reservation = self.find_owned_by(client_id, id).await?;
        if reservation.status == ReservationStatus::Annulee {
            return Ok(CancellationWindow {
                can_cancel: false,
                time_left: None,
            });
        }
        Ok(cancellation_window(
            reservation_start(reservation.date, reservation.heure_debut),
            now,
        ))
    }

    /// Anulação pelo próprio cliente, até 3h antes do início.
    pub async fn cancel_by_client(
        &self,
        client_id: i64,
        id: i64,
        now: NaiveDateTime,
    ) -> Result<Reservation, AppError> {
        let reservation = self.find_owned_by(client_id, id).await?;
        if reservation.status == ReservationStatus::Annulee {
            return Err(AppError::Conflict("Réservation déjà annulée.".to_string()));
        }

        let window = cancellation_window(
            reservation_start(reservation.date, reservation.heure_debut),
            now,
        );
        if !window.can_cancel {
            return Err(AppError::CancellationClosed);
        }

        self.reservation_repo
            .set_status(&self.pool, id, ReservationStatus::Annulee)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Réservation {} introuvable", id)))
    }

    /// Mudança de estado feita pelo proprietário. Tirar uma reserva de ANNULEE volta a ocupar
    /// o horário, então passa pelo mesmo bloqueio e teste de sobreposição da criação.
    pub async fn change_status(&self, id: i64, status: ReservationStatus) -> Result<Reservation, AppError> {
        let current = self.find(id).await?;

        let mut tx = self.pool.begin().await?;

        if reactivates(current.status, status) {
            self.terrain_repo
                .lock_for_booking(&mut *tx, current.terrain_id)
                .await?
                .ok_or_else(|| AppError::BadRequest("Terrain introuvable".to_string()))?;

            let slot = ReservationSlot {
                terrain_id: current.terrain_id,
                date: current.date,
                heure_debut: current.heure_debut,
                heure_fin: current.heure_fin,
                duree: current.duree,
            };
            if self.reservation_repo.has_overlap(&mut *tx, &slot, Some(id)).await? {
                return Err(AppError::Conflict(
                    "Ce créneau a été réservé depuis l'annulation.".to_string(),
                ));
            }
        }

        let reservation = self
            .reservation_repo
            .set_status(&mut *tx, id, status)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Réservation {} introuvable", id)))?;

        tx.commit().await?;
        Ok(reservation)
    }

    pub async fn between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ReservationView>, AppError> {
        check_range(from, to)?;
        self.reservation_repo.list_between(from, to).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.reservation_repo.count().await
    }

    pub async fn count_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, AppError> {
        check_range(from, to)?;
        self.reservation_repo.count_between(from, to).await
    }

    pub async fn filter(&self, filter: &ReservationFilter) -> Result<Vec<ReservationView>, AppError> {
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            check_range(from, to)?;
        }
        self.reservation_repo.filter(filter).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.reservation_repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Réservation {} introuvable", id)));
        }
        Ok(())
    }

    pub async fn delete_many(&self, ids: &[i64]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let deleted = self.reservation_repo.delete_many(ids).await?;
        tracing::info!("{} reservas removidas", deleted);
        Ok(deleted)
    }
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), AppError> {
    if from > to {
        return Err(AppError::BadRequest(
            "La date de début doit précéder la date de fin".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::terrain::TerrainStatus;
    use rust_decimal::Decimal;

    fn terrain(status: TerrainStatus) -> Terrain {
        Terrain {
            id: 1,
            complexe_id: 1,
            nom: Some("Terrain A".into()),
            prix_terrain: Decimal::new(300, 0),
            status,
            heure_ouverture: 9,
            heure_fermeture: 23,
            duree_creneau: 60,
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn only_leaving_annulee_reoccupies_the_slot() {
        use ReservationStatus::*;
        assert!(reactivates(Annulee, Validee));
        assert!(reactivates(Annulee, Confirmee));
        assert!(!reactivates(Annulee, Annulee));
        assert!(!reactivates(Confirmee, Validee));
        assert!(!reactivates(Validee, Annulee));
    }

    #[test]
    fn slot_inside_opening_hours_is_accepted() {
        assert!(check_slot_bounds(&terrain(TerrainStatus::Ouvert), t(9, 0), t(23, 0)).is_ok());
        assert!(check_slot_bounds(&terrain(TerrainStatus::Ouvert), t(14, 0), t(16, 0)).is_ok());
    }

    #[test]
    fn slot_outside_opening_hours_is_rejected() {
        let open = terrain(TerrainStatus::Ouvert);
        assert!(matches!(
            check_slot_bounds(&open, t(8, 0), t(10, 0)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            check_slot_bounds(&open, t(22, 0), t(23, 30)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn inverted_slot_is_rejected() {
        assert!(check_slot_bounds(&terrain(TerrainStatus::Ouvert), t(16, 0), t(14, 0)).is_err());
    }

    #[test]
    fn closed_terrain_cannot_be_booked() {
        for status in [TerrainStatus::Ferme, TerrainStatus::Maintenance] {
            assert!(matches!(
                check_slot_bounds(&terrain(status), t(14, 0), t(16, 0)),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn duration_is_in_minutes() {
        assert_eq!(duration_minutes(t(14, 0), t(16, 0)), 120);
        assert_eq!(duration_minutes(t(10, 0), t(11, 30)), 90);
    }

    #[test]
    fn reversed_date_range_is_rejected() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert!(check_range(from, to).is_err());
        assert!(check_range(to, from).is_ok());
    }
}
