// State management for VitaVoice

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::api::{ApiClient, ApiConfig};
use crate::storage::{HistoryStore, PreferencesStore, RecordingStore, StorageManager};

/// Owns the storage manager, the stores built on it, and the API
/// client. Screens receive this as an explicit handle; there is no
/// module-level global state.
pub struct AppState {
    storage: Arc<StorageManager>,
    pub recordings: RecordingStore,
    pub history: HistoryStore,
    pub preferences: PreferencesStore,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(storage: StorageManager, api_config: ApiConfig) -> Self {
        let storage = Arc::new(storage);

        Self {
            recordings: RecordingStore::new(storage.clone()),
            history: HistoryStore::new(storage.clone()),
            preferences: PreferencesStore::new(storage.clone()),
            api: ApiClient::new(api_config),
            storage,
        }
    }

    /// Open the app's default database under the platform data directory
    pub fn open_default(api_config: ApiConfig) -> Result<Self> {
        let db_path = default_data_dir().join("vitavoice.db");
        let storage = StorageManager::new(db_path)?;
        Ok(Self::new(storage, api_config))
    }

    /// Base directory for the database and recorded assets
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .db_path()
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn storage(&self) -> &Arc<StorageManager> {
        &self.storage
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitavoice")
}
