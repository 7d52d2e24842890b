use std::path::PathBuf;

/// Correlates an outbound classification call with the submission that issued it.
pub type RequestId = u64;

/// Classification result returned by the remote endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAnalysis {
    pub category: String,
    /// In `0.0..=1.0`.
    pub confidence: f64,
    pub suggested_response: String,
    pub original_text_preview: String,
}

/// A file picked or dropped by the user. The bytes are read when the
/// submission is sent, not when the file is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFile {
    pub path: PathBuf,
    pub file_name: String,
    /// MIME type reported for the file, if any source could tell.
    pub declared_mime: Option<String>,
    pub size: u64,
}
