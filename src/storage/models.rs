// Storage models - recordings, diagnosis history, preferences
use serde::{Deserialize, Serialize};
use std::fmt;

/// User gender, sent with diagnosis requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of analysis requested per recording
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisType {
    Parkinson,
    Language,
}

impl DiagnosisType {
    /// Label shown in history titles
    pub fn display_name(&self) -> &'static str {
        match self {
            DiagnosisType::Parkinson => "Parkinson",
            DiagnosisType::Language => "Language",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisType::Parkinson => "parkinson",
            DiagnosisType::Language => "language",
        }
    }
}

/// A local recording entry describing one audio asset.
///
/// `path` is the canonical asset locator: duplicate detection and file
/// deletion both key on it. Duration is integer milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub duration_ms: u64,
    pub path: String,
}

impl Recording {
    pub fn new(title: String, path: String, duration_ms: u64) -> Self {
        Self {
            id: format!("rec_{}", uuid::Uuid::new_v4()),
            title,
            created_at: chrono::Utc::now().to_rfc3339(),
            duration_ms,
            path,
        }
    }
}

/// One completed diagnosis result.
///
/// `diagnosis_id` is present only for entries the server knows about;
/// deleting such an entry requires a successful server-side delete
/// first. Locally born entries use a `title|timestamp` composite id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    pub recording_name: String,
    pub diagnosis_date: String,
    pub prediction1: f64,
    pub prediction2: f64,
    pub diagnosis: Vec<DiagnosisType>,
    #[serde(default)]
    pub diagnosis_id: Option<i64>,
}

impl HistoryRecord {
    /// Build a record from a freshly analyzed recording
    pub fn from_analysis(
        recording_name: &str,
        diagnosis: Vec<DiagnosisType>,
        diagnosis_date: String,
        prediction1: f64,
        prediction2: f64,
        diagnosis_id: Option<i64>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        let title = join_diagnosis_names(&diagnosis);
        let id = match diagnosis_id {
            Some(remote_id) => remote_id.to_string(),
            None => format!("{}|{}", title, now),
        };

        Self {
            id,
            title,
            date: now,
            recording_name: recording_name.to_string(),
            diagnosis_date,
            prediction1,
            prediction2,
            diagnosis,
            diagnosis_id,
        }
    }
}

/// Comma-joined display names, used as the history entry title
pub fn join_diagnosis_names(diagnosis: &[DiagnosisType]) -> String {
    diagnosis
        .iter()
        .map(|d| d.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}
