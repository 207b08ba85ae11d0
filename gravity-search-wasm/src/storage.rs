//! `localStorage` as a key-value store

use crate::dom::js_err;
use gravity_search_core::{Error, KeyValueStore, MemoryStore, Result};
use web_sys::{Storage, Window};

/// Web Storage API wrapper
pub struct LocalStore {
    local: Storage,
}

impl LocalStore {
    pub fn new(window: &Window) -> Result<Self> {
        let local = window
            .local_storage()
            .map_err(js_err)?
            .ok_or_else(|| Error::Storage("localStorage is not available".to_string()))?;
        Ok(Self { local })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.local.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.local.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.local.remove_item(key).map_err(js_err)
    }
}

/// `localStorage` when the browser allows it, otherwise a session-only store
pub fn open_store(window: &Window) -> Box<dyn KeyValueStore> {
    match LocalStore::new(window) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Search history will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}
