use pexeso_core::{KeyValueStore, StoreError};

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    gloo::utils::window()
        .local_storage()
        .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))?
        .ok_or_else(|| StoreError::Unavailable("local storage disabled".to_string()))
}

/// The browser's local storage, read and written as plain text.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalStorageBackend;

impl KeyValueStore for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))
    }
}
