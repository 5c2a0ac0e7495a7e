//! `localStorage` adapter for the session store.
use crate::dom;
use gacha_core::SessionStorage;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("localStorage: {0}")]
pub struct StorageError(String);

/// The browser profile's `localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorage;

impl SessionStorage for LocalStorage {
    type Error = StorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = dom::local_storage().map_err(|e| StorageError(dom::js_error_message(&e)))?;
        storage
            .get_item(key)
            .map_err(|e| StorageError(dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage().map_err(|e| StorageError(dom::js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError(dom::js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage().map_err(|e| StorageError(dom::js_error_message(&e)))?;
        storage
            .remove_item(key)
            .map_err(|e| StorageError(dom::js_error_message(&e)))
    }
}

/// Storage used by the running app. Native builds (server-side render
/// tests) have no `localStorage` and keep the session in memory.
#[cfg(target_arch = "wasm32")]
pub type AppStorage = LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type AppStorage = gacha_core::MemoryStorage;
