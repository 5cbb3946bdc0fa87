// Diagnosis flows
// Upload-analyze-record pipeline and history synchronization, tying
// the API client and the local stores together.

use std::fmt;

use crate::api::{AnalyzeRequest, ApiClient, ApiError, UploadMetadata};
use crate::storage::models::{DiagnosisType, Gender, HistoryRecord, Recording};
use crate::storage::{HistoryStore, StoreError};

/// Error types for the diagnosis pipeline
#[derive(Debug)]
pub enum DiagnosisError {
    /// Audio asset could not be read from disk
    Asset(String),
    /// Remote call failed
    Api(ApiError),
    /// Local persistence failed
    Store(StoreError),
}

impl fmt::Display for DiagnosisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosisError::Asset(msg) => write!(f, "Failed to read audio file: {}", msg),
            DiagnosisError::Api(e) => write!(f, "{}", e),
            DiagnosisError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DiagnosisError {}

impl From<ApiError> for DiagnosisError {
    fn from(e: ApiError) -> Self {
        DiagnosisError::Api(e)
    }
}

impl From<StoreError> for DiagnosisError {
    fn from(e: StoreError) -> Self {
        DiagnosisError::Store(e)
    }
}

/// Upload a recording, run the analysis, and record the result in the
/// history store. Returns the updated history list.
pub async fn submit_recording(
    client: &ApiClient,
    history: &HistoryStore,
    recording: &Recording,
    gender: Gender,
    diagnosis: Vec<DiagnosisType>,
) -> Result<Vec<HistoryRecord>, DiagnosisError> {
    let audio = tokio::fs::read(&recording.path)
        .await
        .map_err(|e| DiagnosisError::Asset(format!("{}: {}", recording.path, e)))?;

    let file_name = std::path::Path::new(&recording.path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("record.wav");

    let metadata = UploadMetadata::new(recording.title.clone(), gender, recording.duration_ms);
    let uploaded = client.upload_diagnosis(file_name, audio, &metadata).await?;

    log::info!(
        "Uploaded {} as file {} for analysis",
        recording.title,
        uploaded.file_id
    );

    let mode = diagnosis
        .first()
        .map(|d| d.as_str())
        .unwrap_or(DiagnosisType::Parkinson.as_str());

    let result = client
        .analyze_diagnosis(&AnalyzeRequest {
            file_id: uploaded.file_id,
            gender,
            mode: mode.to_string(),
        })
        .await?;

    let prediction1 = result.probabilities.first().copied().unwrap_or(0.0);
    let prediction2 = result.probabilities.get(1).copied().unwrap_or(0.0);

    let record = HistoryRecord::from_analysis(
        &recording.title,
        diagnosis,
        result.analyzed_at,
        prediction1,
        prediction2,
        uploaded.diagnosis_id,
    );

    Ok(history.add_if_absent(record).await?)
}

/// Refresh the history store from the server.
///
/// The remote list is authoritative when it can be fetched; a failed
/// fetch logs a warning and falls back to whatever was cached locally,
/// so the history screen always has something to show.
pub async fn sync_history(
    client: &ApiClient,
    history: &HistoryStore,
) -> Result<Vec<HistoryRecord>, StoreError> {
    match client.fetch_history_list().await {
        Ok(remote) => history.reconcile_with_remote(&remote).await,
        Err(e) => {
            log::warn!("History fetch failed, showing cached list: {}", e);
            history.list().await
        }
    }
}
