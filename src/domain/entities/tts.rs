use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TtsRequest {
    #[validate(length(min = 1, max = 5000, message = "Text must be 1-5000 characters"))]
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsJobCreated {
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsJob {
    pub job_id: String,
    pub status: TtsJobStatus,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TtsJob {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, TtsJobStatus::Completed | TtsJobStatus::Failed)
    }
}

/// State of the audio player widget after a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TtsView {
    pub loading: bool,
    pub audio_url: Option<String>,
    pub error: Option<String>,
    pub timed_out: bool,
    pub attempts: u32,
}
