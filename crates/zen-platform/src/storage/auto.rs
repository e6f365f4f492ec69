//! Pick the storage backend named in the config.
//!
//! `Auto` prefers IndexedDB and falls back to memory.

use std::rc::Rc;
use zen_core::ports::StoragePort;
use zen_types::{Result, config::StorageBackendType};
use super::{IndexedDbStorage, MemoryStorage};

/// Try to open the best available storage backend.
pub async fn auto_detect_storage() -> Result<Rc<dyn StoragePort>> {
    match IndexedDbStorage::open().await {
        Ok(idb) => {
            log::info!("Storage backend: IndexedDB");
            Ok(Rc::new(idb))
        }
        Err(e) => {
            log::warn!("IndexedDB unavailable ({}), falling back to memory", e);
            Ok(Rc::new(MemoryStorage::new()))
        }
    }
}

/// Open the backend the user selected.
pub async fn open_storage(backend: &StorageBackendType) -> Result<Rc<dyn StoragePort>> {
    match backend {
        StorageBackendType::Auto => auto_detect_storage().await,
        StorageBackendType::IndexedDb => {
            let idb = IndexedDbStorage::open().await?;
            log::info!("Storage backend: IndexedDB");
            Ok(Rc::new(idb))
        }
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Ok(Rc::new(MemoryStorage::new()))
        }
    }
}
