// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Linha de `clients`, `owners` ou `admins`. As três tabelas têm o mesmo formato;
// só `owners` tem `nom_complexe`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub nom: String,
    pub prenom: Option<String>,
    pub num_tele: Option<String>,

    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nom_complexe: Option<String>,

    #[serde(skip_serializing, default)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// Dados para inserir uma nova conta (a senha já vem com hash).
#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub email: &'a str,
    pub nom: &'a str,
    pub prenom: Option<&'a str>,
    pub num_tele: Option<&'a str>,
    pub nom_complexe: Option<&'a str>,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdatePayload {
    #[validate(length(min = 1, message = "Le nom ne peut pas être vide."))]
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub num_tele: Option<String>,
    #[validate(email(message = "L'email fourni est invalide."))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOwnerPayload {
    #[validate(email(message = "L'email fourni est invalide."))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    pub prenom: Option<String>,
    pub num_tele: Option<String>,
    pub nom_complexe: Option<String>,
    pub ville: Option<String>,
    pub adress: Option<String>,
}

impl CreateOwnerPayload {
    /// O complexo só é criado junto com o proprietário quando os três campos vêm preenchidos.
    pub fn complex_fields(&self) -> Option<(&str, &str, &str)> {
        fn filled(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        Some((
            filled(&self.nom_complexe)?,
            filled(&self.ville)?,
            filled(&self.adress)?,
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub nom: String,
    pub prenom: Option<String>,
    pub email: String,
    pub num_tele: Option<String>,
    pub nom_complexe: String,
    pub ville: String,
    pub adresse: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateOwnerPayload {
        CreateOwnerPayload {
            email: "owner@example.com".into(),
            password: "secret1".into(),
            nom: "Alaoui".into(),
            prenom: Some("Karim".into()),
            num_tele: None,
            nom_complexe: Some("Arena Five".into()),
            ville: Some("Rabat".into()),
            adress: Some("12 rue des Orangers".into()),
        }
    }

    #[test]
    fn complex_fields_require_all_three_values() {
        assert_eq!(
            payload().complex_fields(),
            Some(("Arena Five", "Rabat", "12 rue des Orangers"))
        );

        let mut missing_city = payload();
        missing_city.ville = Some("   ".into());
        assert_eq!(missing_city.complex_fields(), None);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let account = Account {
            id: 1,
            email: "a@b.c".into(),
            nom: "A".into(),
            prenom: None,
            num_tele: None,
            nom_complexe: None,
            password_hash: "$2b$12$hash".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("nomComplexe").is_none());
        assert_eq!(json["email"], "a@b.c");
    }
}
