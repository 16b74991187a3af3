use std::time::Duration;

use crate::wire::{ErrorBody, JobStatusDto, SubmitReceipt};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx answer; `message` carries the service-supplied error text
    /// when the body had one.
    #[error("service rejected the request (http {status})")]
    Rejected { status: u16, message: Option<String> },
    #[error("could not decode service response: {0}")]
    Decode(String),
}

#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Submit a new copy job; returns the handle the service assigned.
    async fn submit(&self, url: &str) -> Result<SubmitReceipt, ApiError>;
    /// Fetch one status snapshot for a job.
    async fn status(&self, job_id: &str) -> Result<JobStatusDto, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpJobApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl HttpJobApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Fixed location of the job's archive download.
    pub fn download_url(&self, job_id: &str) -> String {
        self.endpoint(&format!("api/download/{job_id}"))
    }

    /// Fixed location of the job's browsable preview.
    pub fn preview_url(&self, job_id: &str) -> String {
        self.endpoint(&format!("api/preview/{job_id}"))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl JobApi for HttpJobApi {
    async fn submit(&self, url: &str) -> Result<SubmitReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint("api/copy"))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        response
            .json::<SubmitReceipt>()
            .await
            .map_err(map_reqwest_error)
    }

    async fn status(&self, job_id: &str) -> Result<JobStatusDto, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("api/status/{job_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        response
            .json::<JobStatusDto>()
            .await
            .map_err(map_reqwest_error)
    }
}

async fn rejection(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);
    ApiError::Rejected { status, message }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Network(err.to_string())
}
