use admin_dashboard_client::TokenStore;
use gloo::storage::{LocalStorage, Storage};
use log::warn;

const TOKEN_KEY: &str = "admin_dashboard_token";

/// Session token persisted in the browser's local storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn get_token(&self) -> Option<String> {
        LocalStorage::get::<String>(TOKEN_KEY)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }

    fn set_token(&self, token: &str) {
        if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
            warn!("Failed to persist session token: {}", e);
        }
    }

    fn clear_token(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_round_trip_through_local_storage() {
        let store = LocalTokenStore;
        store.clear_token();
        assert!(!store.has_session());

        store.set_token("abc123");
        assert_eq!(store.get_token().as_deref(), Some("abc123"));

        store.clear_token();
        assert_eq!(store.get_token(), None);
    }
}
