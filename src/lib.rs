// VitaVoice core - local persistence and remote diagnosis services
//
// The UI layer (screens, navigation, platform audio capture) lives in
// the app shell; this crate holds everything underneath it:
// - recordings / history / preferences stores over a key-value database
// - the remote diagnosis and history HTTP client
// - audio asset file management
// - playback position monitoring
// - the upload-analyze-record and history-sync flows

pub mod api;
pub mod assets;
pub mod diagnosis;
pub mod playback;
pub mod state;
pub mod storage;

pub use api::{ApiClient, ApiConfig, ApiError};
pub use diagnosis::{submit_recording, sync_history, DiagnosisError};
pub use state::AppState;
pub use storage::{
    DiagnosisType, Gender, HistoryRecord, HistoryStore, PreferencesStore, Recording,
    RecordingStore, StorageManager, StoreError,
};
