//! Remote history endpoints
//!
//! The server keeps the authoritative list of past diagnoses; these
//! calls back the history screen's reconciliation and deletion.

use serde::Deserialize;

use super::client::{check_status, ApiClient, ApiError};

/// One entry of the server's history list
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub diagnosis_id: i64,
    pub file_id: String,
    pub file_name: String,
    pub upload_time: String,
}

/// Stored analysis result for a single diagnosis
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub file_id: String,
    pub prediction: f64,
    pub probabilities: Vec<f64>,
    pub analyzed_at: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[allow(dead_code)]
    code: i32,
    #[allow(dead_code)]
    message: String,
    success: bool,
}

impl ApiClient {
    /// Fetch the server's diagnosis history list
    pub async fn fetch_history_list(&self) -> Result<Vec<HistoryItem>, ApiError> {
        let response = self
            .http()
            .get(self.url("/history/list"))
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<Vec<HistoryItem>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Fetch the stored result for a single diagnosis
    pub async fn get_diagnosis_result(&self, diagnosis_id: i64) -> Result<DiagnosisResult, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/history/result/{}", diagnosis_id)))
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<DiagnosisResult>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Delete a diagnosis server-side. Returns whether the server
    /// actually removed it; callers must keep their local copy on
    /// `Ok(false)`.
    pub async fn delete_diagnosis_result(&self, diagnosis_id: i64) -> Result<bool, ApiError> {
        let response = self
            .http()
            .delete(self.url(&format!("/history/result/{}", diagnosis_id)))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: DeleteResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        Ok(body.success)
    }
}
