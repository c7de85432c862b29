use std::path::Path;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, multipart};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::client::errors::ClientError;
use crate::client::language::detect_language;
use crate::client::types::{
    IMAGE_EXTENSIONS, JobStatus, SubmitOutcome, Submission, VIDEO_EXTENSIONS,
};
use crate::config::Config;
use crate::prefs::Preferences;

const USER_AGENT: &str = "claimlens/0.1 (+https://claimlens.example.com)";

/// HTTP client for the fact-checking backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    max_upload_bytes: u64,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        // Validate the base URL up front so later joins can't fail.
        url::Url::parse(config.api_base_url())?;

        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Unknown(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url().to_string(),
            max_upload_bytes: config.max_upload_bytes(),
        })
    }

    /// Submit an item for fact-checking. Media files and Instagram links go
    /// to `/upload`; free text goes to `/fact-check-text`. The response is
    /// either the finished analysis or an acknowledgement to poll.
    #[instrument(skip_all, fields(kind = submission.kind()))]
    pub async fn submit(
        &self,
        submission: &Submission,
        prefs: &Preferences,
    ) -> Result<SubmitOutcome, ClientError> {
        let (endpoint, form) = match submission {
            Submission::Text(text) => (
                "fact-check-text",
                multipart::Form::new().text("text", text.clone()),
            ),
            Submission::InstagramUrl(link) => (
                "upload",
                multipart::Form::new().text("url", link.clone()),
            ),
            Submission::MediaFile { path } => ("upload", self.media_part(path).await?),
        };

        let form = apply_preferences(form, submission, prefs);

        let mut request = self
            .http
            .post(format!("{}/{}", self.base_url, endpoint))
            .multipart(form);
        if let Some(key) = &prefs.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(ClientError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status,
                retriable: status.is_server_error(),
            });
        }

        info!("submission accepted (status: {})", status);
        response
            .json::<SubmitOutcome>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Fetch the status of an asynchronous processing job.
    #[instrument(skip(self))]
    pub async fn job_status(&self, job_id: Uuid) -> Result<JobStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}/status/{}", self.base_url, job_id))
            .send()
            .await
            .map_err(ClientError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status,
                retriable: status.is_server_error(),
            });
        }

        response
            .json::<JobStatus>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Build the multipart file part, rejecting unsupported or oversize
    /// media before any bytes go on the wire.
    async fn media_part(&self, path: &Path) -> Result<multipart::Form, ClientError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !VIDEO_EXTENSIONS.contains(&extension.as_str())
            && !IMAGE_EXTENSIONS.contains(&extension.as_str())
        {
            return Err(ClientError::UnsupportedMedia(path.display().to_string()));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ClientError::Io(e.to_string()))?;
        if metadata.len() > self.max_upload_bytes {
            return Err(ClientError::FileTooLarge(metadata.len()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::Io(e.to_string()))?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name)))
    }
}

/// Attach the response-language and web-search preferences as form fields.
/// An unset language falls back to the detected language of submitted free
/// text, and to the backend's choice otherwise.
fn apply_preferences(
    form: multipart::Form,
    submission: &Submission,
    prefs: &Preferences,
) -> multipart::Form {
    let language = prefs.response_language.clone().or_else(|| match submission {
        Submission::Text(text) => detect_language(text),
        _ => None,
    });

    let form = match language {
        Some(lang) => form.text("language", lang),
        None => form,
    };
    form.text("web_search", if prefs.web_search { "true" } else { "false" })
}
