use std::path::Path;
use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_info};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{FailureKind, HistoryRecord, ServiceError, SummarizePayload, UploadKind};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for a whole request; summarization of long documents is slow.
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The remote summarization service, one method per endpoint.
#[async_trait::async_trait]
pub trait SummaryService: Send + Sync {
    /// `GET /history`
    async fn history(&self) -> Result<Vec<HistoryRecord>, ServiceError>;

    /// `POST /summarize`; `Ok(None)` when the response carries no summary.
    async fn summarize(&self, payload: &SummarizePayload) -> Result<Option<String>, ServiceError>;

    /// `DELETE /delete/{id}`
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;

    /// `DELETE /clear`
    async fn clear(&self) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    base: Url,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot be used as a base url"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base, client })
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::new(FailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        label: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ServiceError> {
        let started = Instant::now();
        engine_debug!("{label}: sending");
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        engine_info!(
            "{label}: status {} in {} ms",
            status.as_u16(),
            started.elapsed().as_millis()
        );
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = describe_error_body(&body).unwrap_or_else(|| status.to_string());
        Err(ServiceError::new(
            FailureKind::HttpStatus(status.as_u16()),
            message,
        ))
    }

    async fn file_form(path: &Path, model: &str) -> Result<Form, ServiceError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ServiceError::new(FailureKind::Io, format!("{}: {err}", path.display()))
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mut part = Part::bytes(bytes).file_name(filename.clone());
        if let Some(kind) = UploadKind::from_filename(&filename) {
            part = part.mime_str(kind.mime_type()).map_err(map_reqwest_error)?;
        }

        Ok(Form::new()
            .part("file", part)
            .text("model", model.to_string()))
    }
}

#[async_trait::async_trait]
impl SummaryService for ReqwestService {
    async fn history(&self) -> Result<Vec<HistoryRecord>, ServiceError> {
        let url = self.endpoint(&["history"])?;
        let response = self.send("GET /history", self.client.get(url)).await?;
        response
            .json::<Vec<HistoryRecord>>()
            .await
            .map_err(|err| ServiceError::new(FailureKind::Decode, err.to_string()))
    }

    async fn summarize(&self, payload: &SummarizePayload) -> Result<Option<String>, ServiceError> {
        let url = self.endpoint(&["summarize"])?;
        let request = match payload {
            SummarizePayload::Text { text, model } => {
                self.client.post(url).json(&TextRequest { text, model })
            }
            SummarizePayload::File { path, model } => {
                let form = Self::file_form(path, model).await?;
                self.client.post(url).multipart(form)
            }
        };

        let response = self.send("POST /summarize", request).await?;
        let body: SummarizeResponse = response
            .json()
            .await
            .map_err(|err| ServiceError::new(FailureKind::Decode, err.to_string()))?;
        Ok(body.summary)
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["delete", id])?;
        self.send("DELETE /delete", self.client.delete(url)).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        let url = self.endpoint(&["clear"])?;
        self.send("DELETE /clear", self.client.delete(url)).await?;
        Ok(())
    }
}

/// Pulls `error`/`details` out of a JSON error body, if there is one.
fn describe_error_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match (parsed.error, parsed.details) {
        (Some(error), Some(details)) => Some(format!("{error} ({details})")),
        (Some(error), None) => Some(error),
        (None, Some(details)) => Some(details),
        (None, None) => None,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ServiceError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
