use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Media extensions the backend accepts for upload.
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// One item the user submits for fact-checking.
#[derive(Debug, Clone)]
pub enum Submission {
    MediaFile { path: PathBuf },
    InstagramUrl(String),
    Text(String),
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::MediaFile { .. } => "media_file",
            Submission::InstagramUrl(_) => "instagram_url",
            Submission::Text(_) => "text",
        }
    }
}

/// Finished analysis as returned by the backend. Exactly one of
/// `fact_check_html` (with `transcription`) or `image_analysis` is present
/// for a successful run; both carry the report markup `report::extract`
/// consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub fact_check_html: Option<String>,
    #[serde(default)]
    pub image_analysis: Option<String>,
    #[serde(default)]
    pub models: Option<ModelInfo>,
    #[serde(default)]
    pub web_search_results: Vec<WebSearchResult>,
}

impl CheckResponse {
    /// The report markup, whichever analysis produced it.
    pub fn fact_check_markup(&self) -> Option<&str> {
        self.fact_check_html
            .as_deref()
            .or(self.image_analysis.as_deref())
    }
}

/// Which models the backend used for each stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub transcription: Option<ModelRef>,
    #[serde(default)]
    pub fact_check: Option<ModelRef>,
    #[serde(default)]
    pub image_analysis: Option<ModelRef>,
    #[serde(default)]
    pub web_search: Option<String>,
    #[serde(default)]
    pub web_search_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// One corroborating web search the backend ran for a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResult {
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Acknowledgement for a submission the backend processes asynchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobAck {
    pub job_id: Uuid,
}

/// What a submission call came back with: either the finished analysis or
/// a job acknowledgement to poll. Video processing answers with an ack;
/// text and images usually answer synchronously.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubmitOutcome {
    Accepted(JobAck),
    Complete(Box<CheckResponse>),
}

/// Status of an in-flight processing job.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Completed { result: Box<CheckResponse> },
    Error {
        #[serde(default)]
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_outcome_decodes_ack() {
        let raw = r#"{"job_id": "4f5c8f52-7d46-4f37-bb8c-9f5d66a90f3f", "status": "processing"}"#;
        match serde_json::from_str::<SubmitOutcome>(raw).unwrap() {
            SubmitOutcome::Accepted(ack) => {
                assert_eq!(
                    ack.job_id.to_string(),
                    "4f5c8f52-7d46-4f37-bb8c-9f5d66a90f3f"
                );
            }
            SubmitOutcome::Complete(_) => panic!("expected an ack"),
        }
    }

    #[test]
    fn test_submit_outcome_decodes_synchronous_result() {
        let raw = r#"{
            "transcription": "hello world",
            "fact_check_html": "<h2 class=\"result\">Accurate</h2>",
            "web_search_results": []
        }"#;
        match serde_json::from_str::<SubmitOutcome>(raw).unwrap() {
            SubmitOutcome::Complete(resp) => {
                assert_eq!(resp.transcription.as_deref(), Some("hello world"));
                assert!(resp.fact_check_markup().unwrap().contains("Accurate"));
            }
            SubmitOutcome::Accepted(_) => panic!("expected a finished analysis"),
        }
    }

    #[test]
    fn test_markup_falls_back_to_image_analysis() {
        let resp = CheckResponse {
            image_analysis: Some("<h2 class=\"result\">AI-Generated</h2>".to_string()),
            ..CheckResponse::default()
        };
        assert!(resp.fact_check_markup().unwrap().contains("AI-Generated"));
    }

    #[test]
    fn test_job_status_variants() {
        assert!(matches!(
            serde_json::from_str::<JobStatus>(r#"{"status": "processing"}"#).unwrap(),
            JobStatus::Processing
        ));

        let raw = r#"{"status": "completed", "result": {"fact_check_html": "<h2>Mixed</h2>"}}"#;
        assert!(matches!(
            serde_json::from_str::<JobStatus>(raw).unwrap(),
            JobStatus::Completed { .. }
        ));

        match serde_json::from_str::<JobStatus>(r#"{"status": "error", "detail": "boom"}"#).unwrap()
        {
            JobStatus::Error { detail } => assert_eq!(detail, "boom"),
            _ => panic!("expected error status"),
        }
    }
}
