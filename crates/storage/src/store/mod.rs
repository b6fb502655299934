#![forbid(unsafe_code)]

mod bom;
mod components;
mod error;
mod products;
mod requests;
mod support;

pub use error::{EntityKind, StoreError};
pub use requests::*;

use crate::backend::{KvBackend, MemoryBackend, SqliteBackend};
use crate::config::{BackendKind, DEFAULT_NAMESPACE, StoreConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub const COMPONENTS_COLLECTION: &str = "components";
pub const PRODUCTS_COLLECTION: &str = "products";

/// The catalog cache: product and component repositories over one key/value
/// medium. Every mutating call writes through before returning.
#[derive(Debug)]
pub struct CatalogStore<B = SqliteBackend> {
    backend: B,
    namespace: String,
}

impl CatalogStore<SqliteBackend> {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let backend = SqliteBackend::open(storage_dir)?;
        Ok(Self::with_backend(backend, DEFAULT_NAMESPACE))
    }
}

impl CatalogStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new(), DEFAULT_NAMESPACE)
    }
}

impl CatalogStore<Box<dyn KvBackend>> {
    pub fn open_with_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let backend: Box<dyn KvBackend> = match config.backend {
            BackendKind::Sqlite => Box::new(
                SqliteBackend::open(&config.storage_dir)?.with_quota(config.quota_bytes),
            ),
            BackendKind::Memory => Box::new(MemoryBackend::new().with_quota(config.quota_bytes)),
        };
        log::info!(
            "catalog store ready (backend={}, namespace={})",
            config.backend.as_str(),
            config.namespace
        );
        Ok(Self::with_backend(backend, config.namespace.clone()))
    }
}

impl<B: KvBackend> CatalogStore<B> {
    pub fn with_backend(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Storage key of a collection or counter under this store's namespace.
    pub fn key_for(&self, name: &str) -> String {
        format!("{}:{name}", self.namespace)
    }

    /// Never fails: a missing, unreadable or corrupt collection reads as empty.
    fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        let key = self.key_for(name);
        let bytes = match self.backend.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("reading {key} failed, treating it as empty: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(err) => {
                log::warn!(
                    "{key} holds unreadable data ({} bytes), treating it as empty: {err}",
                    bytes.len()
                );
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(
        &mut self,
        name: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let key = self.key_for(name);
        let bytes = serde_json::to_vec(items)?;
        self.backend.put(&key, &bytes)?;
        log::debug!("wrote {key} ({} items, {} bytes)", items.len(), bytes.len());
        Ok(())
    }
}
