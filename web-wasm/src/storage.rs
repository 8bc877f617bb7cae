//! localStorageによるキー・バリューストア

use florascan_common::{Error, KeyValueStore, Result};
use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

/// ブラウザのlocalStorage（オリジン単位）
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw().set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        LocalStorage::raw().remove_item(key).map_err(storage_error)
    }
}

fn storage_error(e: JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}
