// src/services/owner_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{AccountRepository, ComplexRepository, ReservationRepository},
    models::{
        account::{Account, CreateOwnerPayload, NewAccount, OwnerProfile, ProfileUpdatePayload},
        auth::Role,
        complex::{Complex, ComplexPayload, ComplexResponse},
        reservation::{Reservation, ReservationStatus, ReservationView},
        terrain::{Terrain, TerrainPayload, TerrainUpdatePayload},
    },
    services::{
        auth::hash_password, complex_service::ComplexService,
        reservation_service::ReservationService, terrain_service::TerrainService,
    },
};

const NO_COMPLEX_LABEL: &str = "Aucun complexe associé";

#[derive(Clone)]
pub struct OwnerService {
    pool: PgPool,
    account_repo: AccountRepository,
    complex_repo: ComplexRepository,
    reservation_repo: ReservationRepository,
    complex_service: ComplexService,
    terrain_service: TerrainService,
    reservation_service: ReservationService,
}

impl OwnerService {
    pub fn new(
        pool: PgPool,
        account_repo: AccountRepository,
        complex_repo: ComplexRepository,
        reservation_repo: ReservationRepository,
        complex_service: ComplexService,
        terrain_service: TerrainService,
        reservation_service: ReservationService,
    ) -> Self {
        Self {
            pool,
            account_repo,
            complex_repo,
            reservation_repo,
            complex_service,
            terrain_service,
            reservation_service,
        }
    }

    /// Cria o proprietário e, se os dados vierem completos, o complexo dele,
    /// na mesma transação.
    pub async fn create_owner(&self, payload: &CreateOwnerPayload) -> Result<Account, AppError> {
        let password_hash = hash_password(&payload.password).await?;
        let complex_fields = payload.complex_fields();

        let mut tx = self.pool.begin().await?;

        let owner = self
            .account_repo
            .create(
                &mut *tx,
                Role::Owner,
                &NewAccount {
                    email: payload.email.trim(),
                    nom: payload.nom.trim(),
                    prenom: payload.prenom.as_deref(),
                    num_tele: payload.num_tele.as_deref(),
                    nom_complexe: complex_fields.map(|(nom, _, _)| nom),
                    password_hash: &password_hash,
                },
            )
            .await?;

        if let Some((nom, ville, adress)) = complex_fields {
            self.complex_repo
                .create(&mut *tx, owner.id, nom, ville, adress)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Proprietário {} criado", owner.id);
        Ok(owner)
    }

    pub async fn list_owners(&self) -> Result<Vec<Account>, AppError> {
        self.account_repo.list(Role::Owner).await
    }

    async fn owner(&self, owner_id: i64) -> Result<Account, AppError> {
        self.account_repo
            .find_by_id(Role::Owner, owner_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Propriétaire introuvable".to_string()))
    }

    async fn first_complex(&self, owner_id: i64) -> Result<Option<Complex>, AppError> {
        Ok(self.complex_repo.list_by_owner(owner_id).await?.into_iter().next())
    }

    async fn owned_complex(&self, owner_id: i64, complex_id: i64) -> Result<Complex, AppError> {
        let complex = self.complex_service.find(complex_id).await?;
        if complex.owner_id != owner_id {
            return Err(AppError::Forbidden(
                "Ce complexe ne vous appartient pas.".to_string(),
            ));
        }
        Ok(complex)
    }

    async fn ensure_reservation_owned(&self, owner_id: i64, reservation_id: i64) -> Result<(), AppError> {
        match self.reservation_repo.owner_of(reservation_id).await? {
            None => Err(AppError::ResourceNotFound(format!(
                "Réservation {} introuvable",
                reservation_id
            ))),
            Some(id) if id != owner_id => Err(AppError::Forbidden(
                "Cette réservation ne concerne pas vos terrains.".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }

    pub async fn profile(&self, owner_id: i64) -> Result<OwnerProfile, AppError> {
        let owner = self.owner(owner_id).await?;
        let complex = self.first_complex(owner_id).await?;

        Ok(OwnerProfile {
            nom: owner.nom,
            prenom: owner.prenom,
            email: owner.email,
            num_tele: owner.num_tele,
            nom_complexe: complex
                .as_ref()
                .map(|c| c.nom.clone())
                .unwrap_or_else(|| NO_COMPLEX_LABEL.to_string()),
            ville: complex.as_ref().map(|c| c.ville.clone()).unwrap_or_default(),
            adresse: complex.map(|c| c.adress).unwrap_or_default(),
        })
    }

    pub async fn update_profile(
        &self,
        owner_id: i64,
        changes: &ProfileUpdatePayload,
    ) -> Result<OwnerProfile, AppError> {
        self.account_repo
            .update_profile(Role::Owner, owner_id, changes)
            .await?;
        self.profile(owner_id).await
    }

    pub async fn complexes(&self, owner_id: i64) -> Result<Vec<ComplexResponse>, AppError> {
        let complexes = self.complex_repo.list_by_owner(owner_id).await?;
        self.complex_service.with_details(complexes).await
    }

    pub async fn add_complex(&self, owner_id: i64, payload: &ComplexPayload) -> Result<Complex, AppError> {
        self.owner(owner_id).await?;
        self.complex_repo
            .create(
                &self.pool,
                owner_id,
                payload.nom.trim(),
                payload.ville.trim(),
                payload.adress.trim(),
            )
            .await
    }

    pub async fn delete_complex(&self, owner_id: i64, complex_id: i64) -> Result<(), AppError> {
        self.owned_complex(owner_id, complex_id).await?;
        self.complex_service.delete(complex_id).await
    }

    pub async fn complex_terrains(&self, owner_id: i64, complex_id: i64) -> Result<Vec<Terrain>, AppError> {
        self.owned_complex(owner_id, complex_id).await?;
        self.terrain_service.list_by_complex(complex_id).await
    }

    pub async fn add_terrain_to_complex(
        &self,
        owner_id: i64,
        complex_id: i64,
        payload: &TerrainPayload,
    ) -> Result<Terrain, AppError> {
        self.owned_complex(owner_id, complex_id).await?;
        self.terrain_service.create(complex_id, payload).await
    }

    /// Terrenos do primeiro complexo do proprietário.
    pub async fn terrains(&self, owner_id: i64) -> Result<Vec<Terrain>, AppError> {
        match self.first_complex(owner_id).await? {
            Some(complex) => self.terrain_service.list_by_complex(complex.id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn add_terrain(&self, owner_id: i64, payload: &TerrainPayload) -> Result<Terrain, AppError> {
        let complex = self
            .first_complex(owner_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(NO_COMPLEX_LABEL.to_string()))?;
        self.terrain_service.create(complex.id, payload).await
    }

    pub async fn update_terrain(
        &self,
        owner_id: i64,
        terrain_id: i64,
        changes: &TerrainUpdatePayload,
    ) -> Result<Terrain, AppError> {
        let terrain = self.terrain_service.find(terrain_id).await?;
        self.owned_complex(owner_id, terrain.complexe_id).await?;
        self.terrain_service.update(terrain_id, changes).await
    }

    pub async fn reservations(&self, owner_id: i64) -> Result<Vec<ReservationView>, AppError> {
        self.reservation_repo.list_for_owner(owner_id).await
    }

    pub async fn set_reservation_status(
        &self,
        owner_id: i64,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        self.ensure_reservation_owned(owner_id, reservation_id).await?;
        let reservation = self
            .reservation_service
            .change_status(reservation_id, status)
            .await?;
        tracing::info!(
            "Reserva {} passou a {:?} pelo proprietário {}",
            reservation_id,
            status,
            owner_id
        );
        Ok(reservation)
    }
}
