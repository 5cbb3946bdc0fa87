// Recordings store for VitaVoice
// Maintains the authoritative list of local recordings under @recordings

use std::sync::Arc;

use super::models::Recording;
use super::{keys, StorageManager, StoreError};
use crate::assets;

/// Store for the local recordings list, newest first.
///
/// Every mutation is a single read-modify-write of the `@recordings`
/// key, serialized by `write_lock` so two concurrent adds cannot lose
/// an update.
pub struct RecordingStore {
    storage: Arc<StorageManager>,
    write_lock: tokio::sync::Mutex<()>,
}

impl RecordingStore {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self {
            storage,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Load all recordings. Absent or corrupt data yields an empty list.
    pub async fn list(&self) -> Result<Vec<Recording>, StoreError> {
        // The corrupt-key self-heal inside load_list writes, so even
        // this read path takes the guard
        let _guard = self.write_lock.lock().await;
        load_list(&self.storage)
    }

    /// Add a new recording to the front of the list.
    ///
    /// Rejects with `StoreError::DuplicateAsset` if an entry with the
    /// same asset path already exists; the stored list is unchanged.
    pub async fn add(&self, rec: Recording) -> Result<Vec<Recording>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let list = load_list(&self.storage)?;
        if list.iter().any(|r| r.path == rec.path) {
            return Err(StoreError::DuplicateAsset(rec.path));
        }

        let mut updated = Vec::with_capacity(list.len() + 1);
        updated.push(rec);
        updated.extend(list);

        save_list(&self.storage, &updated)?;
        Ok(updated)
    }

    /// Delete a recording by id: remove the asset file and the metadata.
    ///
    /// A missing asset file or a failed unlink never blocks the metadata
    /// removal. Unknown ids are a no-op.
    pub async fn delete(&self, id: &str) -> Result<Vec<Recording>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let list = load_list(&self.storage)?;
        if let Some(target) = list.iter().find(|r| r.id == id) {
            assets::remove_asset(&target.path);
        }

        let updated: Vec<Recording> = list.into_iter().filter(|r| r.id != id).collect();
        save_list(&self.storage, &updated)?;
        Ok(updated)
    }

    /// Rename a recording. An empty (after trim) title keeps the old one.
    pub async fn rename(&self, id: &str, new_title: &str) -> Result<Vec<Recording>, StoreError> {
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
}

fn load_list(storage: &StorageManager) -> Result<Vec<Recording>, StoreError> {
    let json = match storage.get(keys::RECORDINGS)? {
        Some(json) => json,
        None => return Ok(Vec::new()),
    };

    match serde_json::from_str(&json) {
        Ok(list) => Ok(list),
        Err(e) => {
            // Corrupt data degrades to an empty list; clear the key so
            // the next write starts from a clean slate
            log::warn!("Corrupt @recordings data, treating as empty: {}", e);
            storage.remove(keys::RECORDINGS)?;
            Ok(Vec::new())
        }
    }
}

fn save_list(storage: &StorageManager, list: &[Recording]) -> Result<(), StoreError> {
    let json = serde_json::to_string(list)
        .map_err(|e| StoreError::Storage(format!("Failed to serialize recordings: {}", e)))?;
    storage.set(keys::RECORDINGS, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_store(dir: &tempfile::TempDir) -> RecordingStore {
        let storage = StorageManager::new(dir.path().join("test.db")).unwrap();
        RecordingStore::new(Arc::new(storage))
    }

    fn rec(id: &str, path: &str) -> Recording {
        Recording {
            id: id.to_string(),
            title: format!("Recording {}", id),
            created_at: chrono::Utc::now().to_rfc3339(),
            duration_ms: 7200,
            path: path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_list_newest_first() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        store.add(rec("1", "/a.wav")).await.unwrap();
        let list = store.add(rec("2", "/b.wav")).await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "2");
        assert_eq!(list[1].id, "1");

        let reloaded = store.list().await.unwrap();
        assert_eq!(reloaded, list);
    }

    #[tokio::test]
    async fn test_duplicate_path_is_rejected() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        store.add(rec("1", "/a.wav")).await.unwrap();
        let err = store.add(rec("2", "/a.wav")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAsset(_)));

        let list = store.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "1");
    }

    #[tokio::test]
    async fn test_delete_removes_entry_and_asset() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        let asset = dir.path().join("take.wav");
        std::fs::write(&asset, b"RIFF").unwrap();

        store.add(rec("1", asset.to_str().unwrap())).await.unwrap();
        store.add(rec("2", "/b.wav")).await.unwrap();

        let list = store.delete("1").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "2");
        assert!(!asset.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_asset_still_removes_metadata() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        store.add(rec("1", "/nowhere/gone.wav")).await.unwrap();
        let list = store.delete("1").await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        store.add(rec("1", "/a.wav")).await.unwrap();
        let list = store.delete("missing").await.unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_rename() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        store.add(rec("1", "/a.wav")).await.unwrap();
        store.add(rec("2", "/b.wav")).await.unwrap();

        let list = store.rename("1", "New name").await.unwrap();
        let renamed = list.iter().find(|r| r.id == "1").unwrap();
        let other = list.iter().find(|r| r.id == "2").unwrap();
        assert_eq!(renamed.title, "New name");
        assert_eq!(renamed.path, "/a.wav");
        assert_eq!(other.title, "Recording 2");
    }

    #[tokio::test]
    async fn test_rename_blank_title_keeps_old() {
        let dir = tempdir().unwrap();
        let store = create_test_store(&dir);

        store.add(rec("1", "/a.wav")).await.unwrap();
        let list = store.rename("1", "   ").await.unwrap();
        assert_eq!(list[0].title, "Recording 1");
    }

    #[tokio::test]
    async fn test_list_self_heal_cannot_clobber_concurrent_add() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(StorageManager::new(dir.path().join("test.db")).unwrap());
        storage.set(keys::RECORDINGS, "not json {").unwrap();

        let store = Arc::new(RecordingStore::new(storage));
        let adder = {
            let store = store.clone();
            tokio::spawn(async move { store.add(rec("1", "/a.wav")).await })
        };
        let lister = {
            let store = store.clone();
            tokio::spawn(async move { store.list().await })
        };

        adder.await.unwrap().unwrap();
        lister.await.unwrap().unwrap();

        // The heal path holds the write guard, so the add survives it
        let list = store.list().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "1");
    }

    #[tokio::test]
    async fn test_corrupt_blob_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(StorageManager::new(dir.path().join("test.db")).unwrap());
        storage.set(keys::RECORDINGS, "not json {").unwrap();

        let store = RecordingStore::new(storage.clone());
        assert!(store.list().await.unwrap().is_empty());
        // Self-heal: the corrupt key was cleared
        assert_eq!(storage.get(keys::RECORDINGS).unwrap(), None);
    }
}
