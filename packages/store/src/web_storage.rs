//! # `localStorage`-backed session storage — browser persistence
//!
//! [`WebStorage`] is the [`SessionStorage`] implementation used on the web
//! platform. The session token and serialized user survive reloads until
//! logout or expiry.
//!
//! All methods silently swallow errors (returning `None` for reads, doing
//! nothing for writes). An unavailable or blocked `localStorage` degrades to
//! an anonymous session rather than crashing the app; the session of record
//! always lives server-side.

use crate::storage::SessionStorage;

/// Zero-size handle; the browser storage object is looked up per call.
#[derive(Clone, Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }

    fn local() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStorage for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::local()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::local() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local() {
            let _ = storage.remove_item(key);
        }
    }
}
