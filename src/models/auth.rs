// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Os três namespaces de autenticação. Cada papel tem a sua tabela,
/// as suas chaves de sessão no navegador e a sua página de login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
        }
    }

    pub(crate) fn table(&self) -> &'static str {
        match self {
            Role::Client => "clients",
            Role::Owner => "owners",
            Role::Admin => "admins",
        }
    }

    pub fn login_route(&self) -> &'static str {
        match self {
            Role::Client => "/login",
            Role::Owner => "/owner/login",
            Role::Admin => "/admin/login",
        }
    }

    /// Endpoint de login do backend para este papel.
    pub fn login_endpoint(&self) -> &'static str {
        match self {
            Role::Client => "/auth/client/login",
            Role::Owner => "/auth/owner/login",
            Role::Admin => "/admin/login",
        }
    }

    pub fn access_token_key(&self) -> &'static str {
        match self {
            Role::Client => "kc_access_token",
            Role::Owner => "owner_token",
            Role::Admin => "admin_access_token",
        }
    }

    pub fn refresh_token_key(&self) -> &'static str {
        match self {
            Role::Client => "kc_refresh_token",
            Role::Owner => "owner_refresh_token",
            Role::Admin => "admin_refresh_token",
        }
    }

    /// Todas as chaves que pertencem à sessão deste papel, incluindo nomes antigos.
    pub fn session_keys(&self) -> &'static [&'static str] {
        match self {
            Role::Client => &["kc_access_token", "kc_refresh_token"],
            Role::Owner => &["owner_token", "owner_refresh_token", "ownerToken"],
            Role::Admin => &["admin_access_token", "admin_refresh_token"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub email: String,
    pub typ: TokenKind,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Mesmo formato da resposta do endpoint de token OpenID Connect.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "L'email fourni est invalide."))]
    #[schema(example = "client@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Le mot de passe est obligatoire."))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    #[validate(email(message = "L'email fourni est invalide."))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
    #[validate(length(min = 1, message = "Le nom est obligatoire."))]
    pub nom: String,
    pub prenom: Option<String>,
    pub num_tele: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshPayload {
    #[validate(length(min = 1, message = "Le refresh_token est obligatoire."))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangePayload {
    #[validate(length(min = 1, message = "Le mot de passe actuel est obligatoire."))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keys_cover_access_and_refresh_keys() {
        for role in [Role::Client, Role::Owner, Role::Admin] {
            let keys = role.session_keys();
            assert!(keys.contains(&role.access_token_key()));
            assert!(keys.contains(&role.refresh_token_key()));
        }
    }

    #[test]
    fn signup_rejects_short_password() {
        let payload = SignupPayload {
            email: "ana@example.com".into(),
            password: "12345".into(),
            nom: "Ana".into(),
            prenom: None,
            num_tele: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn role_serializes_in_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
