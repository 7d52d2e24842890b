use crate::{EmailFile, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one outbound classification call.
    Classify {
        request_id: RequestId,
        submission: Submission,
    },
    /// Copy text to the clipboard. Outcome is not reported back.
    CopyToClipboard { text: String },
}

/// Payload of one submission. Text and file are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text(String),
    File(EmailFile),
}
