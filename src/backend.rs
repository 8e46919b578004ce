/// Analysis backend client
///
/// The backend is an opaque HTTP service: one multipart POST to
/// `/analyze` per submission, JSON back. `HttpBackend` is the real client;
/// the `AnalysisBackend` trait is the seam the application dispatches
/// through.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::state::controller::{Completion, Submission};
use crate::state::data::AnalysisResult;

/// Something that can analyse an image
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, AnalysisError>;
}

/// Run a submission against a backend and package the outcome
pub async fn dispatch(backend: Arc<dyn AnalysisBackend>, submission: Submission) -> Completion {
    log::info!(
        "📤 Submitting {} ({}) as '{}' [{}]",
        submission.image.name,
        submission.image.media_type,
        submission.style.id(),
        submission.token
    );

    let outcome = backend.analyze(&submission).await;

    if outcome.is_ok() {
        log::info!("✅ Analysis complete [{}]", submission.token);
    }

    Completion {
        token: submission.token,
        image: submission.image,
        outcome,
    }
}

/// Reqwest client for the analysis service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    analyze_url: String,
    timeout_secs: u64,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Client(format!("could not create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            analyze_url: config.analyze_url(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Probe the service root
    ///
    /// Only used to tell the user whether the backend answers at all; the
    /// app stays usable either way.
    pub async fn ping(&self) -> Result<(), AnalysisError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status.as_u16()));
        }
        Ok(())
    }

    fn build_form(submission: &Submission) -> Result<Form, AnalysisError> {
        let file = Part::bytes(submission.image.bytes.to_vec())
            .file_name(submission.image.name.clone())
            .mime_str(&submission.image.media_type)
            .map_err(|e| {
                AnalysisError::Client(format!(
                    "invalid media type '{}': {}",
                    submission.image.media_type, e
                ))
            })?;

        Ok(Form::new()
            .part("file", file)
            .text("style", submission.style.id())
            .text("num_captions", submission.num_captions.to_string())
            .text("num_hashtags", submission.num_hashtags.to_string()))
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout(self.timeout_secs)
        } else {
            AnalysisError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, AnalysisError> {
        let form = Self::build_form(submission)?;

        let response = self
            .client
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        serde_json::from_slice(&body)
            .map(AnalysisResult::new)
            .map_err(|e| AnalysisError::Parse(e.to_string()))
    }
}
