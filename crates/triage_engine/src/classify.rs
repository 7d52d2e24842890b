use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use triage_logging::{excerpt, triage_debug, triage_info, triage_warn};
use url::Url;

use crate::inspect::mime_for_name;
use crate::{Classification, ClassifyError, ClassifyRequest, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "https://analisador-email-backend.vercel.app/api/classify";

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub endpoint: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// Transport to the classification endpoint. One call per submission, no retry.
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ClassifyError>;
}

/// Parses an endpoint URL, accepting only http and https.
pub fn parse_endpoint(raw: &str) -> Result<Url, ClassifyError> {
    let url = Url::parse(raw).map_err(|err| {
        ClassifyError::new(FailureKind::InvalidEndpoint, format!("{raw}: {err}"))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClassifyError::new(
            FailureKind::InvalidEndpoint,
            format!("unsupported scheme {other}"),
        )),
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    settings: ClassifierSettings,
}

impl ReqwestClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ClassifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClassifyError> {
        let max_bytes = self.settings.max_response_bytes;
        let too_large = || {
            ClassifyError::new(
                FailureKind::TooLarge { max_bytes },
                "The server response was too large",
            )
        };

        if response
            .content_length()
            .is_some_and(|content_len| content_len > max_bytes)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| map_reqwest_error(&self.settings.endpoint, err))?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ClassifyError> {
        let endpoint = parse_endpoint(&self.settings.endpoint)?;
        let client = self.build_client()?;
        let form = build_form(request).await?;

        triage_info!("POST {} ({})", endpoint, describe(request));
        let response = client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| map_reqwest_error(endpoint.as_str(), err))?;

        let status = response.status();
        let body = self.read_body(response).await?;
        triage_debug!("Response status={} bytes={}", status, body.len());

        if !status.is_success() {
            let message = error_detail(&body)
                .unwrap_or_else(|| format!("Http failure response for {endpoint}: {status}"));
            triage_warn!("Classification rejected: {} {}", status, excerpt(&message));
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        parse_classification(&body)
    }
}

async fn build_form(request: &ClassifyRequest) -> Result<Form, ClassifyError> {
    match request {
        ClassifyRequest::Text(text) => Ok(Form::new().text("email_text", text.clone())),
        ClassifyRequest::File(upload) => {
            let bytes = tokio::fs::read(&upload.path).await.map_err(|err| {
                ClassifyError::new(
                    FailureKind::FileRead,
                    format!("Could not read {}: {err}", upload.file_name),
                )
            })?;
            let mime = upload
                .mime
                .as_deref()
                .or_else(|| mime_for_name(&upload.file_name))
                .unwrap_or(FALLBACK_MIME);
            let part = Part::bytes(bytes)
                .file_name(upload.file_name.clone())
                .mime_str(mime)
                .map_err(|err| ClassifyError::new(FailureKind::FileRead, err.to_string()))?;
            Ok(Form::new().part("file", part))
        }
    }
}

fn describe(request: &ClassifyRequest) -> String {
    match request {
        ClassifyRequest::Text(text) => format!("email_text, {} chars", text.chars().count()),
        ClassifyRequest::File(upload) => format!("file {}", upload.file_name),
    }
}

/// Decodes a success body; confidence must be a probability.
fn parse_classification(body: &[u8]) -> Result<Classification, ClassifyError> {
    let classification: Classification = serde_json::from_slice(body).map_err(|err| {
        ClassifyError::new(
            FailureKind::MalformedResponse,
            format!("Unexpected response from the server: {err}"),
        )
    })?;

    if !(0.0..=1.0).contains(&classification.confidence) {
        return Err(ClassifyError::new(
            FailureKind::MalformedResponse,
            format!(
                "Unexpected response from the server: confidence {} out of range",
                classification.confidence
            ),
        ));
    }
    Ok(classification)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pulls the `detail` field out of an error body, if there is one.
fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail {
        serde_json::Value::Null => None,
        serde_json::Value::String(detail) if detail.trim().is_empty() => None,
        serde_json::Value::String(detail) => Some(detail),
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(endpoint: &str, err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(
            FailureKind::Timeout,
            format!("Request to {endpoint} timed out"),
        );
    }
    ClassifyError::new(
        FailureKind::Network,
        format!("Could not reach {endpoint}: {err}"),
    )
}
