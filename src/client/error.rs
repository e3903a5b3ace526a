// src/client/error.rs

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    // Nenhuma chamada de rede foi feita
    #[error("Erro de validação")]
    Validation(#[from] validator::ValidationErrors),

    /// Sessão inexistente ou expirada. Os tokens do papel já foram apagados.
    #[error("Sessão expirada, redirecionar para {login_route}")]
    Unauthorized { login_route: &'static str },

    #[error("Erro da API ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Erro de transporte: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn login_route(&self) -> Option<&'static str> {
        match self {
            ClientError::Unauthorized { login_route } => Some(*login_route),
            _ => None,
        }
    }
}
