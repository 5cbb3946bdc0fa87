// Storage module for VitaVoice
// Key-value persistence for recordings, diagnosis history, and preferences

use std::fmt;

use crate::api::client::ApiError;

pub mod manager;
pub mod models;
pub mod recordings_repo;
pub mod history_repo;
pub mod preferences_repo;

pub use manager::StorageManager;
pub use models::*;
pub use recordings_repo::RecordingStore;
pub use history_repo::HistoryStore;
pub use preferences_repo::PreferencesStore;

/// Well-known storage keys. Each key is owned by exactly one store.
pub mod keys {
    pub const RECORDINGS: &str = "@recordings";
    pub const HISTORY: &str = "@history";
    pub const SELECTED_GENDER: &str = "@selected_gender";
    pub const DIAGNOSIS_SELECTION: &str = "@diagnosis_selection";
}

/// Error types for store operations
#[derive(Debug)]
pub enum StoreError {
    /// Add of a recording whose asset path already exists in the list
    DuplicateAsset(String),
    /// Server reported `success: false` for a history delete; the local
    /// entry is kept
    RemoteDeleteRejected(i64),
    /// Remote delete call failed (network/timeout); the local entry is kept
    RemoteDelete(ApiError),
    /// Underlying key-value storage failed
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateAsset(path) => {
                write!(f, "File already added: {}", path)
            }
            StoreError::RemoteDeleteRejected(id) => {
                write!(f, "Server refused to delete diagnosis {}", id)
            }
            StoreError::RemoteDelete(e) => write!(f, "Remote delete failed: {}", e),
            StoreError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<anyhow::Error> for StoreError {
    fn from(e: anyhow::Error) -> Self {
        StoreError::Storage(format!("{:#}", e))
    }
}
