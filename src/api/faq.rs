//! FAQ endpoints
//!
//! Server-managed question/answer entries shown on the help screen.

use serde::{Deserialize, Serialize};

use super::client::{check_status, ApiClient, ApiError};

/// One FAQ entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: String,
}

/// Question/answer pair sent when creating or updating an entry
#[derive(Debug, Clone, Serialize)]
pub struct FaqPayload {
    pub question: String,
    pub answer: String,
}

impl ApiClient {
    /// Fetch all FAQ entries
    pub async fn list_faqs(&self) -> Result<Vec<FaqItem>, ApiError> {
        let response = self
            .http()
            .get(self.url("/faq/list"))
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<Vec<FaqItem>>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Add a new FAQ entry. Returns the created entry with its
    /// server-assigned id.
    pub async fn add_faq(&self, payload: &FaqPayload) -> Result<FaqItem, ApiError> {
        let response = self
            .http()
            .post(self.url("/faq/add"))
            .json(payload)
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<FaqItem>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Update an existing FAQ entry
    pub async fn update_faq(&self, id: i64, payload: &FaqPayload) -> Result<FaqItem, ApiError> {
        let response = self
            .http()
            .patch(self.url(&format!("/faq/{}", id)))
            .json(payload)
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<FaqItem>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Delete an FAQ entry
    pub async fn delete_faq(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .http()
            .delete(self.url(&format!("/faq/{}", id)))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
