// Remote analysis/history service client for VitaVoice

pub mod client;
pub mod diagnosis;
pub mod faq;
pub mod history;

pub use client::{ApiClient, ApiConfig, ApiError};
pub use diagnosis::{AnalyzeRequest, AnalyzeResult, UploadMetadata, UploadResponse};
pub use faq::{FaqItem, FaqPayload};
pub use history::{DiagnosisResult, HistoryItem};
