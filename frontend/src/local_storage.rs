use gloo_utils::window;
use wasm_bindgen::JsValue;
use web_sys::Storage;
use workout_tracker_lib::{
    error::{StoreError, StoreResult},
    store::KeyValueStore,
};

/// `window.localStorage`
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> StoreResult<Storage> {
        window()
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Backend("local storage is not available".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::Backend(format!("{err:?}"))
}
