// src/services/terrain_service.rs

use chrono::NaiveDate;
use validator::ValidationErrors;

use crate::{
    common::error::AppError,
    db::{terrain_repo::NewTerrain, ComplexRepository, ReservationRepository, TerrainRepository},
    models::{
        reservation::{Reservation, TerrainAvailability},
        terrain::{Terrain, TerrainPayload, TerrainStatus, TerrainUpdatePayload},
    },
    services::availability::{booked_slots, slot_choices},
};

const DEFAULT_SLOT_MINUTES: i32 = 60;

#[derive(Clone)]
pub struct TerrainService {
    terrain_repo: TerrainRepository,
    complex_repo: ComplexRepository,
    reservation_repo: ReservationRepository,
}

impl TerrainService {
    pub fn new(
        terrain_repo: TerrainRepository,
        complex_repo: ComplexRepository,
        reservation_repo: ReservationRepository,
    ) -> Self {
        Self {
            terrain_repo,
            complex_repo,
            reservation_repo,
        }
    }

    pub async fn find(&self, id: i64) -> Result<Terrain, AppError> {
        self.terrain_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Terrain {} introuvable", id)))
    }

    pub async fn list_by_complex(&self, complexe_id: i64) -> Result<Vec<Terrain>, AppError> {
        self.terrain_repo.list_by_complex(complexe_id).await
    }

    pub async fn count_active(&self) -> Result<i64, AppError> {
        self.terrain_repo.count_with_status(TerrainStatus::Ouvert).await
    }

    pub async fn create(&self, complexe_id: i64, payload: &TerrainPayload) -> Result<Terrain, AppError> {
        if self.complex_repo.find_by_id(complexe_id).await?.is_none() {
            return Err(AppError::ResourceNotFound(format!(
                "Complexe {} introuvable",
                complexe_id
            )));
        }

        let nom = payload.nom.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let terrain = self
            .terrain_repo
            .create(&NewTerrain {
                complexe_id,
                nom,
                prix_terrain: payload.prix_terrain,
                status: payload.status.unwrap_or(TerrainStatus::Ouvert),
                heure_ouverture: payload.heure_ouverture,
                heure_fermeture: payload.heure_fermeture,
                duree_creneau: payload.duree_creneau.unwrap_or(DEFAULT_SLOT_MINUTES),
            })
            .await?;

        tracing::info!("Terreno {} criado no complexo {}", terrain.id, complexe_id);
        Ok(terrain)
    }

    pub async fn update(&self, id: i64, changes: &TerrainUpdatePayload) -> Result<Terrain, AppError> {
        let current = self.find(id).await?;
        changes.check_against(&current).map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("heureOuverture", e);
            AppError::ValidationError(errors)
        })?;

        self.terrain_repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Terrain {} introuvable", id)))
    }

    pub async fn reservations_for_day(&self, id: i64, date: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        self.find(id).await?;
        self.reservation_repo.list_active_for_day(id, date).await
    }

    pub async fn availability(
        &self,
        id: i64,
        date: NaiveDate,
        start: Option<u32>,
    ) -> Result<TerrainAvailability, AppError> {
        let terrain = self.find(id).await?;
        let reservations = self.reservation_repo.list_active_for_day(id, date).await?;
        let booked = booked_slots(&reservations);

        let choices = if terrain.is_bookable() {
            slot_choices(terrain.opening_hours(), &booked, start)
        } else {
            Default::default()
        };

        Ok(TerrainAvailability {
            terrain_id: terrain.id,
            date,
            heure_ouverture: terrain.heure_ouverture,
            heure_fermeture: terrain.heure_fermeture,
            start_hours: choices.start_hours,
            end_hours: choices.end_hours,
        })
    }
}
