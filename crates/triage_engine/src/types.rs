use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Successful response body of the classification endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f64,
    pub suggested_response: String,
    pub original_text_preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: Option<String>,
}

/// One outbound call: multipart field `email_text` or `file`, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyRequest {
    Text(String),
    File(UploadFile),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        result: Result<Classification, ClassifyError>,
    },
}

/// Failure of a classification call; `message` is meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    TooLarge { max_bytes: u64 },
    FileRead,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            FailureKind::FileRead => write!(f, "file read error"),
        }
    }
}
