// Preferences store for VitaVoice
// Gender and diagnosis-type selection, persisted between sessions

use std::sync::Arc;

use super::models::{DiagnosisType, Gender};
use super::{keys, StorageManager, StoreError};

pub struct PreferencesStore {
    storage: Arc<StorageManager>,
}

impl PreferencesStore {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self { storage }
    }

    /// Persist the selected gender
    pub async fn save_gender(&self, gender: Gender) -> Result<(), StoreError> {
        self.storage.set(keys::SELECTED_GENDER, gender.as_str())?;
        Ok(())
    }

    /// Load the previously selected gender, if any. Unknown stored
    /// values load as `None`.
    pub async fn load_gender(&self) -> Result<Option<Gender>, StoreError> {
        let value = self.storage.get(keys::SELECTED_GENDER)?;
        Ok(value.as_deref().and_then(Gender::parse))
    }

    /// Persist the selected diagnosis types
    pub async fn save_diagnosis_selection(
        &self,
        selection: &[DiagnosisType],
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(selection)
            .map_err(|e| StoreError::Storage(format!("Failed to serialize selection: {}", e)))?;
        self.storage.set(keys::DIAGNOSIS_SELECTION, &json)?;
        Ok(())
    }

    /// Load the stored diagnosis selection; absent or corrupt data
    /// yields an empty selection
    pub async fn load_diagnosis_selection(&self) -> Result<Vec<DiagnosisType>, StoreError> {
        let json = match self.storage.get(keys::DIAGNOSIS_SELECTION)? {
            Some(json) => json,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&json) {
            Ok(selection) => Ok(selection),
            Err(e) => {
                log::warn!("Corrupt @diagnosis_selection data, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Clear the stored diagnosis selection
    pub async fn clear_diagnosis_selection(&self) -> Result<(), StoreError> {
        self.storage.remove(keys::DIAGNOSIS_SELECTION)?;
        Ok(())
    }
}
