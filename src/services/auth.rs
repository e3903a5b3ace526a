// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AccountRepository,
    models::{
        account::{Account, NewAccount, ProfileUpdatePayload},
        auth::{Claims, Role, SignupPayload, TokenKind, TokenResponse},
    },
};

/// Emite e valida os JWT (HS256) dos três papéis.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    access_ttl_minutes: i64,
    refresh_ttl_minutes: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, access_ttl_minutes: i64, refresh_ttl_minutes: i64) -> Self {
        Self {
            secret,
            access_ttl_minutes,
            refresh_ttl_minutes,
        }
    }

    fn sign(&self, account: &Account, role: Role, kind: TokenKind, ttl_minutes: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.id,
            role,
            email: account.email.clone(),
            typ: kind,
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    pub fn issue(&self, account: &Account, role: Role) -> Result<TokenResponse, AppError> {
        Ok(TokenResponse {
            access_token: self.sign(account, role, TokenKind::Access, self.access_ttl_minutes)?,
            refresh_token: self.sign(account, role, TokenKind::Refresh, self.refresh_ttl_minutes)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl_minutes * 60,
            refresh_expires_in: self.refresh_ttl_minutes * 60,
        })
    }

    /// Qualquer falha (assinatura, expiração, tipo errado) vira `InvalidToken`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        if token_data.claims.typ != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(token_data.claims)
    }
}

/// Hash bcrypt fora do runtime assíncrono.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password_clone = password.to_owned();
    let password_hash_clone = password_hash.to_owned();
    let is_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(is_valid)
}

#[derive(Clone)]
pub struct AuthService {
    account_repo: AccountRepository,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(account_repo: AccountRepository, tokens: TokenIssuer) -> Self {
        Self {
            account_repo,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub async fn signup_client(&self, payload: &SignupPayload) -> Result<Account, AppError> {
        let password_hash = hash_password(&payload.password).await?;

        let account = self
            .account_repo
            .create(
                self.account_repo.pool(),
                Role::Client,
                &NewAccount {
                    email: payload.email.trim(),
                    nom: payload.nom.trim(),
                    prenom: payload.prenom.as_deref(),
                    num_tele: payload.num_tele.as_deref(),
                    nom_complexe: None,
                    password_hash: &password_hash,
                },
            )
            .await?;

        tracing::info!("Novo cliente registado: {}", account.id);
        Ok(account)
    }

    pub async fn login(&self, role: Role, email: &str, password: &str) -> Result<TokenResponse, AppError> {
        let account = self
            .account_repo
            .find_by_email(role, email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        self.tokens.issue(&account, role)
    }

    /// Troca um refresh token válido por um novo par, no mesmo papel.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;
        let account = self
            .account_repo
            .find_by_id(claims.role, claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;
        self.tokens.issue(&account, claims.role)
    }

    pub async fn account(&self, role: Role, id: i64) -> Result<Account, AppError> {
        self.account_repo
            .find_by_id(role, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Compte introuvable".to_string()))
    }

    pub async fn update_profile(
        &self,
        role: Role,
        id: i64,
        changes: &ProfileUpdatePayload,
    ) -> Result<Account, AppError> {
        self.account_repo.update_profile(role, id, changes).await
    }

    pub async fn change_password(
        &self,
        role: Role,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let account = self.account(role, id).await?;

        if !verify_password(current_password, &account.password_hash).await? {
            return Err(AppError::BadRequest(
                "Le mot de passe actuel est incorrect.".to_string(),
            ));
        }

        let password_hash = hash_password(new_password).await?;
        self.account_repo.update_password(role, id, &password_hash).await
    }

    /// Cria o administrador inicial se ainda não existir. Devolve `true` se criou.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.account_repo.find_by_email(Role::Admin, email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password).await?;
        self.account_repo
            .create(
                self.account_repo.pool(),
                Role::Admin,
                &NewAccount {
                    email,
                    nom: "Admin",
                    prenom: None,
                    num_tele: None,
                    nom_complexe: None,
                    password_hash: &password_hash,
                },
            )
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-that-is-long-enough-for-hmac".to_string(), 15, 60)
    }

    fn account() -> Account {
        Account {
            id: 42,
            email: "owner@example.com".into(),
            nom: "Alaoui".into(),
            prenom: None,
            num_tele: None,
            nom_complexe: Some("Arena".into()),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_access_token_carries_role_and_subject() {
        let issuer = issuer();
        let tokens = issuer.issue(&account(), Role::Owner).unwrap();
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 15 * 60);
        assert_eq!(tokens.refresh_expires_in, 60 * 60);

        let claims = issuer.verify(&tokens.access_token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Owner);
        assert_eq!(claims.email, "owner@example.com");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn refresh_token_is_not_accepted_as_access_token() {
        let issuer = issuer();
        let tokens = issuer.issue(&account(), Role::Client).unwrap();
        assert!(matches!(
            issuer.verify(&tokens.refresh_token, TokenKind::Access),
            Err(AppError::InvalidToken)
        ));
        assert!(issuer.verify(&tokens.refresh_token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenIssuer::new("another-secret-entirely-different".to_string(), 15, 60);
        let tokens = other.issue(&account(), Role::Admin).unwrap();
        assert!(issuer().verify(&tokens.access_token, TokenKind::Access).is_err());
    }

    #[test]
    fn expired_token_fails() {
        // Margem bem acima dos 60s de tolerância padrão
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: Role::Client,
            email: "a@b.c".into(),
            typ: TokenKind::Access,
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-that-is-long-enough-for-hmac".as_bytes()),
        )
        .unwrap();
        assert!(issuer().verify(&token, TokenKind::Access).is_err());
    }

    #[tokio::test]
    async fn password_hash_round_trip() {
        let hashed = hash_password("secret1").await.unwrap();
        assert!(verify_password("secret1", &hashed).await.unwrap());
        assert!(!verify_password("wrong", &hashed).await.unwrap());
    }
}
