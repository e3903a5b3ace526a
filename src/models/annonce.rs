// src/models/annonce.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// Anúncio "procura-se jogadores" com os dados do cliente e do terreno
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Annonce {
    pub id: i64,
    pub date: NaiveDateTime,
    pub nbr_joueur: i32,
    pub client_id: i64,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub terrain_id: i64,
    pub terrain_name: Option<String>,
    pub complexe_name: String,
    pub ville: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnoncePayload {
    pub terrain_id: i64,
    #[schema(value_type = String, example = "2025-06-14T18:00:00")]
    pub date: NaiveDateTime,
    #[validate(range(min = 1, message = "Il faut au moins un joueur."))]
    pub nbr_joueur: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AnnonceQuery {
    pub city: Option<String>,
    pub terrain_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_players_is_rejected() {
        let payload: AnnoncePayload = serde_json::from_str(
            r#"{"terrainId":1,"date":"2025-06-14T18:00:00","nbrJoueur":0}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
