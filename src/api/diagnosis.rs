//! Upload and analyze endpoints
//!
//! `POST /diagnosis/upload` takes a multipart form with the wav bytes
//! and a JSON metadata part; `POST /diagnosis/analyze` runs the actual
//! diagnosis on the uploaded file.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::client::{check_status, ApiClient, ApiError};
use crate::storage::models::Gender;

/// Metadata part sent alongside the audio file.
///
/// The wire `duration` field is in seconds; local durations are integer
/// milliseconds, converted here at the boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub file_name: String,
    pub gender: Gender,
    pub duration: f64,
}

impl UploadMetadata {
    pub fn new(file_name: impl Into<String>, gender: Gender, duration_ms: u64) -> Self {
        Self {
            file_name: file_name.into(),
            gender,
            duration: duration_ms as f64 / 1000.0,
        }
    }
}

/// Server-assigned identifiers for an uploaded file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
    #[serde(default)]
    pub diagnosis_id: Option<i64>,
}

/// Analyze request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub file_id: String,
    pub gender: Gender,
    pub mode: String,
}

/// Envelope the analyze endpoint wraps its payload in
#[derive(Debug, Deserialize)]
struct AnalyzeEnvelope {
    #[allow(dead_code)]
    code: i32,
    message: String,
    success: bool,
    data: Option<AnalyzeResult>,
}

/// Analysis payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    pub prediction: f64,
    pub probabilities: Vec<f64>,
    pub label: Option<String>,
    pub analyzed_at: String,
}

impl ApiClient {
    /// Upload a recording for diagnosis. Returns the server-assigned
    /// file (and possibly diagnosis) identifiers.
    pub async fn upload_diagnosis(
        &self,
        file_name: &str,
        audio: Vec<u8>,
        metadata: &UploadMetadata,
    ) -> Result<UploadResponse, ApiError> {
        let metadata_json = serde_json::to_string(metadata)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode metadata: {}", e)))?;

        let audio_part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(ApiError::from)?;

        let form = Form::new()
            .part("audioFile", audio_part)
            .text("metadata", metadata_json);

        let response = self
            .http()
            .post(self.url("/diagnosis/upload"))
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Run the analysis for an uploaded file
    pub async fn analyze_diagnosis(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<AnalyzeResult, ApiError> {
        let response = self
            .http()
            .post(self.url("/diagnosis/analyze"))
            .json(request)
            .send()
            .await?;

        let response = check_status(response).await?;
        let envelope: AnalyzeEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        if !envelope.success {
            return Err(ApiError::Rejected {
                status: 200,
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("Analyze response missing data".to_string()))
    }
}
