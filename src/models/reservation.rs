// src/models/reservation.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

// As telas usavam nomes diferentes para o mesmo estado ("PENDING" vs "EN_ATTENTE").
// Aqui existe um só conjunto; os nomes antigos são aceitos na entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "reservation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Confirmee,
    #[serde(alias = "PENDING")]
    EnAttente,
    Validee,
    Annulee,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub terrain_id: i64,
    pub client_id: i64,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:00:00")]
    pub heure_debut: NaiveTime,
    #[schema(value_type = String, example = "16:00:00")]
    pub heure_fin: NaiveTime,
    /// Duração em minutos.
    pub duree: i32,
    pub status: ReservationStatus,
}

// Reserva com os dados do terreno, complexo e cliente (o que as telas mostram)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: i64,
    pub status: ReservationStatus,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:00:00")]
    pub heure_debut: NaiveTime,
    #[schema(value_type = String, example = "16:00:00")]
    pub heure_fin: NaiveTime,
    pub duree: i32,
    pub terrain_id: i64,
    pub terrain_nom: Option<String>,
    pub complex_id: i64,
    pub complex_nom: String,
    pub price: Decimal,
    pub client_id: i64,
    pub client_nom: String,
    pub client_email: String,
    pub client_num_tele: Option<String>,
}

fn start_before_end(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if start >= end {
        let mut err = ValidationError::new("time_range");
        err.message = Some("L'heure de début doit être avant l'heure de fin".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reservation_payload"))]
pub struct ReservationPayload {
    pub terrain_id: i64,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:00:00")]
    pub heure_debut: NaiveTime,
    #[schema(value_type = String, example = "16:00:00")]
    pub heure_fin: NaiveTime,
}

fn validate_reservation_payload(p: &ReservationPayload) -> Result<(), ValidationError> {
    start_before_end(p.heure_debut, p.heure_fin)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reservation_update"))]
pub struct ReservationUpdatePayload {
    pub terrain_id: i64,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "14:00:00")]
    pub heure_debut: NaiveTime,
    #[schema(value_type = String, example = "16:00:00")]
    pub heure_fin: NaiveTime,
    pub status: Option<ReservationStatus>,
}

fn validate_reservation_update(p: &ReservationUpdatePayload) -> Result<(), ValidationError> {
    start_before_end(p.heure_debut, p.heure_fin)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ReservationFilter {
    pub complex_id: Option<i64>,
    pub client_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[param(value_type = Option<String>, example = "CONFIRMEE")]
    pub status: Option<ReservationStatus>,
    /// Em minutos.
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    /// Padrão: hoje.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Padrão: hoje.
    pub date: Option<NaiveDate>,
    /// Hora de início escolhida; quando presente, `endHours` é calculado.
    pub start: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TerrainAvailability {
    pub terrain_id: i64,
    pub date: NaiveDate,
    pub heure_ouverture: i32,
    pub heure_fermeture: i32,
    pub start_hours: Vec<u32>,
    pub end_hours: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_alias_maps_to_en_attente() {
        let status: ReservationStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, ReservationStatus::EnAttente);
        assert_eq!(
            serde_json::to_string(&ReservationStatus::EnAttente).unwrap(),
            "\"EN_ATTENTE\""
        );
    }

    #[test]
    fn payload_parses_frontend_shape() {
        let payload: ReservationPayload = serde_json::from_str(
            r#"{"terrainId":3,"date":"2025-06-14","heureDebut":"14:00:00","heureFin":"16:00:00"}"#,
        )
        .unwrap();
        assert_eq!(payload.terrain_id, 3);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payload_rejects_end_before_start() {
        let payload: ReservationPayload = serde_json::from_str(
            r#"{"terrainId":3,"date":"2025-06-14","heureDebut":"16:00:00","heureFin":"16:00:00"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
