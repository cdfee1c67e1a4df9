use common::api::TokenProvider;

/// `localStorage` key the login page stores the session token under.
pub const TOKEN_KEY: &str = "token";

/// Reads the bearer token from `localStorage` on every request, so a login or
/// logout in another tab is picked up without reloading.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageToken;

impl TokenProvider for LocalStorageToken {
    fn bearer_token(&self) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(TOKEN_KEY).ok().flatten()
    }
}
