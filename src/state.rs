use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::{info, warn};

use crate::data::model::RecordStore;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Catalog state
// ---------------------------------------------------------------------------

/// The current store snapshot plus where it came from.
///
/// Readers take a snapshot and keep it for the whole call. A reload builds the
/// new store completely before swapping the reference, so readers only ever
/// see a whole old or a whole new store.
pub struct CatalogState {
    source: PathBuf,
    store: RwLock<Arc<RecordStore>>,
}

impl CatalogState {
    /// Load the initial store. A failure here is fatal for the caller.
    pub fn load(source: &Path) -> Result<Self, LoadError> {
        let store = RecordStore::load(source)?;
        Ok(Self::with_store(source, store))
    }

    pub fn with_store(source: &Path, store: RecordStore) -> Self {
        Self {
            source: source.to_path_buf(),
            store: RwLock::new(Arc::new(store)),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The store as of now.
    pub fn snapshot(&self) -> Arc<RecordStore> {
        let guard = self.store.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the whole store.
    pub fn swap(&self, store: RecordStore) {
        let len = store.len();
        let mut guard = self.store.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(store);
        info!("Swapped in catalog with {len} records");
    }

    /// Re-read the source file. On failure the current snapshot is kept.
    pub fn reload(&self) -> Result<(), LoadError> {
        match RecordStore::load(&self.source) {
            Ok(store) => {
                self.swap(store);
                Ok(())
            }
            Err(e) => {
                warn!("Reload of {} failed: {e}", self.source.display());
                Err(e)
            }
        }
    }
}
