// Diagnosis history store for VitaVoice
// Maintains the list of completed diagnoses under @history, reconciled
// against the server's history list when one is available

use std::future::Future;
use std::sync::Arc;

use super::models::HistoryRecord;
use super::{keys, StorageManager, StoreError};
use crate::api::client::ApiError;
use crate::api::history::HistoryItem;

/// Store for diagnosis results, newest first.
///
/// The server is authoritative for the existence of its own entries;
/// local storage caches them for offline display and for the fields
/// the summary endpoint omits (predictions, requested diagnosis types).
pub struct HistoryStore {
    storage: Arc<StorageManager>,
    write_lock: tokio::sync::Mutex<()>,
}

impl HistoryStore {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self {
            storage,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Load all history records, de-duplicated by id (first occurrence
    /// wins). If duplicates were stored, the cleaned list is persisted.
    pub async fn list(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let list = load_list(&self.storage)?;
        let unique = dedup_by_id(&list);

        if unique.len() != list.len() {
            log::warn!(
                "Removed {} duplicate history entries",
                list.len() - unique.len()
            );
            save_list(&self.storage, &unique)?;
        }

        Ok(unique)
    }

    /// Insert a record at the front unless an entry with the same id
    /// already exists. Idempotent.
    pub async fn add_if_absent(&self, rec: HistoryRecord) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let list = load_list(&self.storage)?;
        if list.iter().any(|r| r.id == rec.id) {
            return Ok(list);
        }

        let mut updated = Vec::with_capacity(list.len() + 1);
        updated.push(rec);
        updated.extend(list);

        save_list(&self.storage, &updated)?;
        Ok(updated)
    }

    /// Rename a history entry. An empty (after trim) title keeps the old one.
    pub async fn rename(&self, id: &str, new_title: &str) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let title = new_title.trim();
        let mut list = load_list(&self.storage)?;

        if !title.is_empty() {
            for rec in list.iter_mut() {
                if rec.id == id {
                    rec.title = title.to_string();
                }
            }
        }

        save_list(&self.storage, &list)?;
        Ok(list)
    }

    /// Delete a history entry.
    ///
    /// Entries that originate from the server (carrying a diagnosis id)
    /// are deleted remotely first via `remote_delete`; a rejected or
    /// failed remote delete keeps the local entry so the list never
    /// hides a record the server still has. Purely local entries are
    /// removed unconditionally.
    pub async fn delete<F, Fut>(
        &self,
        id: &str,
        remote_delete: F,
    ) -> Result<Vec<HistoryRecord>, StoreError>
    where
        F: FnOnce(i64) -> Fut,
        Fut: Future<Output = Result<bool, ApiError>>,
    {
        let _guard = self.write_lock.lock().await;

        let list = load_list(&self.storage)?;
        let target = match list.iter().find(|r| r.id == id) {
            Some(rec) => rec,
            None => return Ok(list),
        };

        if let Some(diagnosis_id) = target.diagnosis_id {
            match remote_delete(diagnosis_id).await {
                Ok(true) => {}
                Ok(false) => return Err(StoreError::RemoteDeleteRejected(diagnosis_id)),
                Err(e) => return Err(StoreError::RemoteDelete(e)),
            }
        }

        let updated: Vec<HistoryRecord> = list.into_iter().filter(|r| r.id != id).collect();
        save_list(&self.storage, &updated)?;
        Ok(updated)
    }

    /// Replace the local view with the server's history list.
    ///
    /// Remote fields win for identity, display name, and date; the
    /// prediction and diagnosis fields are carried over from a cached
    /// entry with the same id, or default to neutral/empty. Entries the
    /// server no longer lists are dropped.
    pub async fn reconcile_with_remote(
        &self,
        remote: &[HistoryItem],
    ) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let cached = load_list(&self.storage)?;

        let mut merged: Vec<HistoryRecord> = remote
            .iter()
            .map(|item| {
                let id = item.diagnosis_id.to_string();
                let local = cached.iter().find(|r| r.id == id);

                HistoryRecord {
                    id,
                    title: item.file_name.clone(),
                    date: item.upload_time.clone(),
                    recording_name: item.file_name.clone(),
                    diagnosis_date: local
                        .map(|r| r.diagnosis_date.clone())
                        .unwrap_or_else(|| item.upload_time.clone()),
                    prediction1: local.map(|r| r.prediction1).unwrap_or(0.0),
                    prediction2: local.map(|r| r.prediction2).unwrap_or(0.0),
                    diagnosis: local.map(|r| r.diagnosis.clone()).unwrap_or_default(),
                    diagnosis_id: Some(item.diagnosis_id),
                }
            })
            .collect();

        merged.sort_by(|a, b| b.date.cmp(&a.date));

        save_list(&self.storage, &merged)?;
        Ok(merged)
    }
}

fn dedup_by_id(list: &[HistoryRecord]) -> Vec<HistoryRecord> {
    let mut unique: Vec<HistoryRecord> = Vec::with_capacity(list.len());
    for rec in list {
        if !unique.iter().any(|r| r.id == rec.id) {
            unique.push(rec.clone());
        }
    }
    unique
}

fn load_list(storage: &StorageManager) -> Result<Vec<HistoryRecord>, StoreError> {
    let json = match storage.get(keys::HISTORY)? {
        Some(json) => json,
        None => return Ok(Vec::new()),
    };

    match serde_json::from_str(&json) {
        Ok(list) => Ok(list),
        Err(e) => {
            log::warn!("Corrupt @history data, treating as empty: {}", e);
            storage.remove(keys::HISTORY)?;
            Ok(Vec::new())
        }
    }
}

fn save_list(storage: &StorageManager, list: &[HistoryRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_string(list)
        .map_err(|e| StoreError::Storage(format!("Failed to serialize history: {}", e)))?;
    storage.set(keys::HISTORY, &json)?;
    Ok(())
}
