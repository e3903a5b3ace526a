// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Role, TokenKind},
};

// Cabeçalho ausente ou mal formado ("Basic …", "Bearer" sem token) chega como Err: 401.
type BearerHeader = Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>;

/// Utilizador autenticado, inserido nos "extensions" da requisição pelos guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub role: Role,
    pub email: String,
}

// Valida o token e o papel. Sem token ou token inválido: 401; papel errado: 403.
// Não toca no banco: tudo o que é preciso está nas claims.
fn authorize(
    state: &AppState,
    bearer: BearerHeader,
    role: Role,
) -> Result<AuthenticatedUser, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|_| AppError::InvalidToken)?;
    let claims = state.tokens.verify(bearer.token(), TokenKind::Access)?;

    if claims.role != role {
        return Err(AppError::Forbidden(format!(
            "Accès réservé au rôle {}",
            role.as_str()
        )));
    }

    Ok(AuthenticatedUser {
        id: claims.sub,
        role: claims.role,
        email: claims.email,
    })
}

async fn guard(
    state: AppState,
    bearer: BearerHeader,
    role: Role,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authorize(&state, bearer, role)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn client_guard(
    State(state): State<AppState>,
    bearer: BearerHeader,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(state, bearer, Role::Client, request, next).await
}

pub async fn owner_guard(
    State(state): State<AppState>,
    bearer: BearerHeader,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(state, bearer, Role::Owner, request, next).await
}

pub async fn admin_guard(
    State(state): State<AppState>,
    bearer: BearerHeader,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    guard(state, bearer, Role::Admin, request, next).await
}

// Extrator para obter o utilizador autenticado diretamente nos handlers
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}
