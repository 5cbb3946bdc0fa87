// End-to-end store behavior over a real database file

use std::sync::Arc;

use tempfile::tempdir;
use vitavoice_core::storage::{keys, StorageManager};
use vitavoice_core::{
    ApiConfig, AppState, DiagnosisType, Gender, HistoryRecord, HistoryStore, Recording, StoreError,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn state_in(dir: &tempfile::TempDir) -> AppState {
    let storage = StorageManager::new(dir.path().join("vitavoice.db")).unwrap();
    AppState::new(storage, ApiConfig::default())
}

#[tokio::test]
async fn recording_lifecycle_survives_reopen() {
    init_logging();
    let dir = tempdir().unwrap();

    let asset = dir.path().join("morning.wav");
    std::fs::write(&asset, b"RIFF").unwrap();
    let path = asset.to_string_lossy().into_owned();

    {
        let state = state_in(&dir);
        let rec = Recording::new("Morning check".to_string(), path.clone(), 7200);
        let id = rec.id.clone();

        state.recordings.add(rec).await.unwrap();
        state.recordings.rename(&id, "Renamed").await.unwrap();

        // Same asset cannot be added twice
        let dup = Recording::new("Copy".to_string(), path.clone(), 7200);
        assert!(matches!(
            state.recordings.add(dup).await,
            Err(StoreError::DuplicateAsset(_))
        ));
    }

    // A fresh state over the same database sees the persisted list
    let state = state_in(&dir);
    let list = state.recordings.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Renamed");

    let after_delete = state.recordings.delete(&list[0].id).await.unwrap();
    assert!(after_delete.is_empty());
    assert!(!asset.exists());
}

#[tokio::test]
async fn history_and_preferences_share_the_database() {
    init_logging();
    let dir = tempdir().unwrap();
    let state = state_in(&dir);

    state.preferences.save_gender(Gender::Female).await.unwrap();
    state
        .preferences
        .save_diagnosis_selection(&[DiagnosisType::Parkinson, DiagnosisType::Language])
        .await
        .unwrap();

    let record = HistoryRecord::from_analysis(
        "Morning check",
        vec![DiagnosisType::Parkinson],
        "2025-05-01T10:00:00Z".to_string(),
        85.5,
        14.5,
        None,
    );
    state.history.add_if_absent(record.clone()).await.unwrap();
    state.history.add_if_absent(record).await.unwrap();

    assert_eq!(state.history.list().await.unwrap().len(), 1);
    assert_eq!(
        state.preferences.load_gender().await.unwrap(),
        Some(Gender::Female)
    );
    assert_eq!(
        state.preferences.load_diagnosis_selection().await.unwrap().len(),
        2
    );

    state.preferences.clear_diagnosis_selection().await.unwrap();
    assert!(state
        .preferences
        .load_diagnosis_selection()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn corrupt_keys_heal_independently() {
    init_logging();
    let dir = tempdir().unwrap();
    let storage = Arc::new(StorageManager::new(dir.path().join("vitavoice.db")).unwrap());

    storage.set(keys::HISTORY, "{ not json").unwrap();
    storage
        .set(
            keys::RECORDINGS,
            &serde_json::to_string(&[Recording::new(
                "Kept".to_string(),
                "/kept.wav".to_string(),
                1000,
            )])
            .unwrap(),
        )
        .unwrap();

    let history = HistoryStore::new(storage.clone());
    assert!(history.list().await.unwrap().is_empty());

    // The recordings key was untouched by the history self-heal
    let recordings: Vec<Recording> =
        serde_json::from_str(&storage.get(keys::RECORDINGS).unwrap().unwrap()).unwrap();
    assert_eq!(recordings[0].title, "Kept");
}
