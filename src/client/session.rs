// src/client/session.rs

use std::{collections::HashMap, sync::RwLock};

use crate::models::auth::{Role, TokenResponse};

/// Armazenamento chave/valor das sessões (no navegador, o `localStorage`).
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

pub fn store_tokens(store: &dyn TokenStore, role: Role, tokens: &TokenResponse) {
    store.set(role.access_token_key(), tokens.access_token.clone());
    store.set(role.refresh_token_key(), tokens.refresh_token.clone());
}

/// Token de acesso do papel. O proprietário também pode ter a chave antiga `ownerToken`.
pub fn access_token(store: &dyn TokenStore, role: Role) -> Option<String> {
    role.session_keys()
        .iter()
        .filter(|key| **key != role.refresh_token_key())
        .find_map(|key| store.get(key))
}

pub fn refresh_token(store: &dyn TokenStore, role: Role) -> Option<String> {
    store.get(role.refresh_token_key())
}

/// Remove todas as chaves da sessão do papel e devolve a página de login dele.
/// As sessões dos outros papéis ficam intactas.
pub fn clear_session(store: &dyn TokenStore, role: Role) -> &'static str {
    for key in role.session_keys() {
        store.remove(key);
    }
    role.login_route()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> TokenResponse {
        TokenResponse {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            token_type: "Bearer".into(),
            expires_in: 300,
            refresh_expires_in: 1800,
        }
    }

    #[test]
    fn clearing_one_role_keeps_the_others() {
        let store = MemoryTokenStore::new();
        store_tokens(&store, Role::Client, &tokens());
        store_tokens(&store, Role::Admin, &tokens());

        assert_eq!(clear_session(&store, Role::Client), "/login");
        assert_eq!(access_token(&store, Role::Client), None);
        assert_eq!(refresh_token(&store, Role::Client), None);
        assert_eq!(access_token(&store, Role::Admin).as_deref(), Some("access"));
    }

    #[test]
    fn owner_legacy_key_is_read_and_cleared() {
        let store = MemoryTokenStore::new();
        store.set("ownerToken", "legacy".into());
        assert_eq!(access_token(&store, Role::Owner).as_deref(), Some("legacy"));

        assert_eq!(clear_session(&store, Role::Owner), "/owner/login");
        assert_eq!(store.get("ownerToken"), None);
    }

    #[test]
    fn tokens_are_stored_under_role_keys() {
        let store = MemoryTokenStore::new();
        store_tokens(&store, Role::Client, &tokens());
        assert_eq!(store.get("kc_access_token").as_deref(), Some("access"));
        assert_eq!(store.get("kc_refresh_token").as_deref(), Some("refresh"));
    }
}
