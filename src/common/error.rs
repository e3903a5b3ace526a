use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Conflito: {0}")]
    Conflict(String),

    // Menos de 3h antes do início da reserva
    #[error("Prazo de cancelamento expirado")]
    CancellationClosed,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) | AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                StatusCode::NOT_FOUND
            }
            AppError::EmailAlreadyExists
            | AppError::UniqueConstraintViolation(_)
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::CancellationClosed => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte erros de chave única do Postgres em algo mais amigável.
    pub fn from_unique_violation(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return match db_err.constraint() {
                    Some(c) if c.ends_with("_email_key") => AppError::EmailAlreadyExists,
                    Some(c) => AppError::UniqueConstraintViolation(c.to_string()),
                    None => AppError::UniqueConstraintViolation("unknown".to_string()),
                };
            }
        }
        e.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "Un ou plusieurs champs sont invalides.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::EmailAlreadyExists => "Email déjà utilisé".to_string(),
            AppError::UniqueConstraintViolation(constraint) => {
                format!("Valeur déjà utilisée ({})", constraint)
            }
            AppError::InvalidCredentials => "Email ou mot de passe invalide.".to_string(),
            AppError::InvalidToken => "Jeton d'authentification invalide ou absent.".to_string(),
            AppError::Forbidden(msg)
            | AppError::ResourceNotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => msg,
            AppError::CancellationClosed => {
                "Annulation impossible moins de 3h avant le début de la réservation.".to_string()
            }
            AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                "Ressource introuvable.".to_string()
            }

            // Todos os outros erros viram 500. O `tracing` loga a mensagem detalhada.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                "Une erreur inattendue s'est produite".to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
