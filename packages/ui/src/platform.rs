//! Platform selection for session storage and the API base URL.
//!
//! - **Web** (WASM + `web` feature): browser `localStorage` via
//!   [`store::WebStorage`]; the API lives at the page origin under `/api`
//!   (the dev server proxies that path to the backend host).
//! - **Native** (tests, desktop shells): [`store::MemoryStorage`] and the
//!   `VACINACAO_API_URL` environment override.

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::WebStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

/// Create the platform-appropriate session storage.
pub fn make_storage() -> PlatformStorage {
    PlatformStorage::new()
}

/// Resolve the API root the [`api::HttpApi`] client talks to.
pub fn api_base_url() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(origin) = window.location().origin() {
                return format!("{origin}/api");
            }
        }
        "/api".to_string()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::env::var("VACINACAO_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string())
    }
}
