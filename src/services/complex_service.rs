// src/services/complex_service.rs

use std::collections::HashMap;

use crate::{
    common::error::AppError,
    db::{AccountRepository, ComplexRepository, TerrainRepository},
    models::{
        auth::Role,
        complex::{Complex, ComplexPayload, ComplexResponse},
        terrain::Terrain,
    },
};

#[derive(Clone)]
pub struct ComplexService {
    complex_repo: ComplexRepository,
    terrain_repo: TerrainRepository,
    account_repo: AccountRepository,
}

impl ComplexService {
    pub fn new(
        complex_repo: ComplexRepository,
        terrain_repo: TerrainRepository,
        account_repo: AccountRepository,
    ) -> Self {
        Self {
            complex_repo,
            terrain_repo,
            account_repo,
        }
    }

    pub async fn find(&self, id: i64) -> Result<Complex, AppError> {
        self.complex_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Complexe {} introuvable", id)))
    }

    /// Junta proprietário e terrenos a uma lista de complexos (uma consulta por tabela).
    pub async fn with_details(&self, complexes: Vec<Complex>) -> Result<Vec<ComplexResponse>, AppError> {
        if complexes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = complexes.iter().map(|c| c.id).collect();
        let mut terrains_by_complex: HashMap<i64, Vec<Terrain>> = HashMap::new();
        for terrain in self.terrain_repo.list_by_complexes(&ids).await? {
            terrains_by_complex
                .entry(terrain.complexe_id)
                .or_default()
                .push(terrain);
        }

        let owners: HashMap<i64, _> = self
            .account_repo
            .list(Role::Owner)
            .await?
            .into_iter()
            .map(|owner| (owner.id, owner))
            .collect();

        Ok(complexes
            .into_iter()
            .map(|complex| {
                let terrains = terrains_by_complex.remove(&complex.id).unwrap_or_default();
                let owner = owners.get(&complex.owner_id);
                ComplexResponse::new(complex, owner, terrains)
            })
            .collect())
    }

    pub async fn list(&self) -> Result<Vec<ComplexResponse>, AppError> {
        let complexes = self.complex_repo.list().await?;
        self.with_details(complexes).await
    }

    pub async fn get(&self, id: i64) -> Result<ComplexResponse, AppError> {
        let complex = self.find(id).await?;
        let mut details = self.with_details(vec![complex]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::ResourceNotFound(format!("Complexe {} introuvable", id)))
    }

    pub async fn terrains(&self, id: i64) -> Result<Vec<Terrain>, AppError> {
        self.find(id).await?;
        self.terrain_repo.list_by_complex(id).await
    }

    pub async fn update(&self, id: i64, payload: &ComplexPayload) -> Result<ComplexResponse, AppError> {
        self.complex_repo
            .update(id, payload.nom.trim(), payload.ville.trim(), payload.adress.trim())
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Complexe {} introuvable", id)))?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.complex_repo.delete(id).await? {
            return Err(AppError::ResourceNotFound(format!("Complexe {} introuvable", id)));
        }
        tracing::info!("Complexo {} removido", id);
        Ok(())
    }
}
