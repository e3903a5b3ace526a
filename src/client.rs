//! Cliente HTTP tipado para a API de reservas, com a mesma lógica que o frontend
//! aplica antes e depois de cada chamada: sessão por papel, validação do registo,
//! cálculo dos horários livres e prazo de cancelamento.

pub mod api;
pub mod error;
pub mod session;

pub use api::ApiClient;
pub use error::ClientError;
pub use session::{MemoryTokenStore, TokenStore};
