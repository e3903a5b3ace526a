// src/services/annonce_service.rs

use crate::{
    common::error::AppError,
    db::{AccountRepository, AnnonceRepository, TerrainRepository},
    models::{
        annonce::{Annonce, AnnoncePayload, AnnonceQuery},
        auth::Role,
    },
};

#[derive(Clone)]
pub struct AnnonceService {
    annonce_repo: AnnonceRepository,
    terrain_repo: TerrainRepository,
    account_repo: AccountRepository,
}

impl AnnonceService {
    pub fn new(
        annonce_repo: AnnonceRepository,
        terrain_repo: TerrainRepository,
        account_repo: AccountRepository,
    ) -> Self {
        Self {
            annonce_repo,
            terrain_repo,
            account_repo,
        }
    }

    pub async fn publish(&self, client_id: i64, payload: &AnnoncePayload) -> Result<Annonce, AppError> {
        if !self.account_repo.exists(Role::Client, client_id).await? {
            return Err(AppError::ResourceNotFound("Client introuvable".to_string()));
        }
        if self.terrain_repo.find_by_id(payload.terrain_id).await?.is_none() {
            return Err(AppError::ResourceNotFound(format!(
                "Terrain {} introuvable",
                payload.terrain_id
            )));
        }

        self.annonce_repo
            .create(client_id, payload.terrain_id, payload.date, payload.nbr_joueur)
            .await
    }

    pub async fn search(&self, query: &AnnonceQuery) -> Result<Vec<Annonce>, AppError> {
        self.annonce_repo.search(query).await
    }
}
