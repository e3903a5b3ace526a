// src/models/terrain.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::services::availability::OpeningHours;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "terrain_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainStatus {
    // Algumas telas mandam "DISPONIBLE"
    #[serde(alias = "DISPONIBLE")]
    Ouvert,
    Ferme,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Terrain {
    pub id: i64,
    pub complexe_id: i64,
    #[schema(example = "Terrain A")]
    pub nom: Option<String>,
    #[schema(example = "300.00")]
    pub prix_terrain: Decimal,
    pub status: TerrainStatus,
    #[schema(example = 9)]
    pub heure_ouverture: i32,
    #[schema(example = 23)]
    pub heure_fermeture: i32,
    #[schema(example = 60)]
    pub duree_creneau: i32,
}

impl Terrain {
    pub fn opening_hours(&self) -> OpeningHours {
        OpeningHours::new(self.heure_ouverture, self.heure_fermeture)
    }

    pub fn is_bookable(&self) -> bool {
        self.status == TerrainStatus::Ouvert
    }

    pub fn display_name(&self) -> String {
        self.nom.clone().unwrap_or_else(|| format!("Terrain {}", self.id))
    }
}

/// Horas inteiras de 0 a 23: o fim de uma reserva é um `NaiveTime`, que não representa 24:00.
pub const LAST_HOUR: i32 = 23;

fn validate_hour(hour: i32) -> Result<(), ValidationError> {
    if !(0..=LAST_HOUR).contains(&hour) {
        let mut err = ValidationError::new("range");
        err.message = Some("L'heure doit être comprise entre 0 et 23.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Le prix ne peut pas être négatif.".into());
        return Err(err);
    }
    Ok(())
}

fn opening_before_closing(open: i32, close: i32) -> Result<(), ValidationError> {
    if open >= close {
        let mut err = ValidationError::new("opening_hours");
        err.message = Some("L'heure d'ouverture doit précéder l'heure de fermeture.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_terrain_payload", skip_on_field_errors = true))]
pub struct TerrainPayload {
    pub nom: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(example = "300")]
    pub prix_terrain: Decimal,
    pub status: Option<TerrainStatus>,
    #[validate(custom(function = "validate_hour"))]
    pub heure_ouverture: i32,
    #[validate(custom(function = "validate_hour"))]
    pub heure_fermeture: i32,
    #[validate(range(min = 15, max = 240, message = "La durée d'un créneau doit être entre 15 et 240 minutes."))]
    pub duree_creneau: Option<i32>,
}

fn validate_terrain_payload(payload: &TerrainPayload) -> Result<(), ValidationError> {
    opening_before_closing(payload.heure_ouverture, payload.heure_fermeture)
}

/// Atualização parcial: só os campos presentes são alterados.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TerrainUpdatePayload {
    pub nom: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub prix_terrain: Option<Decimal>,
    pub status: Option<TerrainStatus>,
    #[validate(custom(function = "validate_hour"))]
    pub heure_ouverture: Option<i32>,
    #[validate(custom(function = "validate_hour"))]
    pub heure_fermeture: Option<i32>,
    #[validate(range(min = 15, max = 240, message = "La durée d'un créneau doit être entre 15 et 240 minutes."))]
    pub duree_creneau: Option<i32>,
}

impl TerrainUpdatePayload {
    /// Valida o horário resultante depois de aplicar a atualização ao terreno atual.
    pub fn check_against(&self, current: &Terrain) -> Result<(), ValidationError> {
        opening_before_closing(
            self.heure_ouverture.unwrap_or(current.heure_ouverture),
            self.heure_fermeture.unwrap_or(current.heure_fermeture),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain() -> Terrain {
        Terrain {
            id: 7,
            complexe_id: 1,
            nom: None,
            prix_terrain: Decimal::new(300, 0),
            status: TerrainStatus::Ouvert,
            heure_ouverture: 9,
            heure_fermeture: 23,
            duree_creneau: 60,
        }
    }

    #[test]
    fn disponible_is_accepted_as_ouvert() {
        let status: TerrainStatus = serde_json::from_str("\"DISPONIBLE\"").unwrap();
        assert_eq!(status, TerrainStatus::Ouvert);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"OUVERT\"");
    }

    #[test]
    fn payload_accepts_price_as_string() {
        let payload: TerrainPayload = serde_json::from_str(
            r#"{"nom":"A","prixTerrain":"300","heureOuverture":9,"heureFermeture":23}"#,
        )
        .unwrap();
        assert_eq!(payload.prix_terrain, Decimal::new(300, 0));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_rejects_inverted_hours() {
        let payload = TerrainPayload {
            nom: None,
            prix_terrain: Decimal::new(100, 0),
            status: None,
            heure_ouverture: 22,
            heure_fermeture: 8,
            duree_creneau: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_is_checked_against_current_hours() {
        let update = TerrainUpdatePayload {
            heure_ouverture: Some(23),
            ..Default::default()
        };
        assert!(update.check_against(&terrain()).is_err());

        let update = TerrainUpdatePayload {
            heure_fermeture: Some(20),
            ..Default::default()
        };
        assert!(update.check_against(&terrain()).is_ok());
    }

    #[test]
    fn closing_at_midnight_is_rejected() {
        let payload = TerrainPayload {
            nom: None,
            prix_terrain: Decimal::new(100, 0),
            status: None,
            heure_ouverture: 18,
            heure_fermeture: 24,
            duree_creneau: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("heure_fermeture"));

        let update = TerrainUpdatePayload {
            heure_fermeture: Some(24),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(terrain().display_name(), "Terrain 7");
    }
}
