use std::{cell::RefCell, collections::HashMap, rc::Rc};

use thiserror::Error;
use web_sys::{Storage, Window};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No window object")]
    NoWindow,
    #[error("No localStorage")]
    Unavailable,
    #[error("Failed to read {0}")]
    Read(String),
    #[error("Failed to store {0}")]
    Write(String),
    #[error("Failed to remove {0}")]
    Remove(String),
}

/// Durable key/value storage backing the session mirror.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub fn window() -> Result<Window, StorageError> {
    web_sys::window().ok_or(StorageError::NoWindow)
}

pub fn local_storage() -> Result<Storage, StorageError> {
    window()?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            storage: local_storage()?,
        })
    }
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|_| StorageError::Remove(key.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `localStorage` in the browser; falls back to memory when it is missing
/// (private mode, host builds).
pub fn default_storage() -> Rc<dyn SessionStorage> {
    #[cfg(target_arch = "wasm32")]
    {
        match BrowserStorage::new() {
            Ok(storage) => return Rc::new(storage),
            Err(err) => log::warn!("{}; session will not survive a reload", err),
        }
    }
    Rc::new(MemoryStorage::new())
}
