// src/models/complex.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{account::Account, terrain::Terrain};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complex {
    pub id: i64,
    pub owner_id: i64,
    #[schema(example = "Arena Five")]
    pub nom: String,
    #[schema(example = "Rabat")]
    pub ville: String,
    pub adress: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: i64,
    pub nom: String,
    pub prenom: Option<String>,
    pub email: String,
    pub num_tele: Option<String>,
}

impl From<&Account> for OwnerSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            nom: account.nom.clone(),
            prenom: account.prenom.clone(),
            email: account.email.clone(),
            num_tele: account.num_tele.clone(),
        }
    }
}

/// Complexo com o proprietário e os terrenos, como a listagem pública mostra.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplexResponse {
    pub id: i64,
    pub nom: String,
    pub ville: String,
    pub adress: String,
    pub owner: Option<OwnerSummary>,
    pub terrains: Vec<Terrain>,
}

impl ComplexResponse {
    pub fn new(complex: Complex, owner: Option<&Account>, terrains: Vec<Terrain>) -> Self {
        Self {
            id: complex.id,
            nom: complex.nom,
            ville: complex.ville,
            adress: complex.adress,
            owner: owner.map(OwnerSummary::from),
            terrains,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPayload {
    #[validate(length(min = 1, message = "Le nom du complexe est obligatoire."))]
    pub nom: String,
    #[validate(length(min = 1, message = "La ville est obligatoire."))]
    pub ville: String,
    #[validate(length(min = 1, message = "L'adresse est obligatoire."))]
    pub adress: String,
}
