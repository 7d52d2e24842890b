use crate::{EmailAnalysis, EmailFile, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the email text buffer.
    InputChanged(String),
    /// User picked a file through the file browser.
    FileSelected(EmailFile),
    /// User dropped a file onto the input area.
    FileDropped(EmailFile),
    /// User submitted the text buffer.
    SubmitTextClicked,
    /// User submitted the selected file.
    SubmitFileClicked,
    /// User cleared the input form (text and file).
    ResetFormClicked,
    /// User cleared the displayed result or error.
    ClearResultsClicked,
    /// User asked to copy the suggested response.
    CopyResponseClicked,
    /// User acknowledged the current notice.
    DismissNotice,
    /// Engine returned a classification.
    ClassificationSucceeded {
        request_id: RequestId,
        analysis: EmailAnalysis,
    },
    /// Engine call failed. `message` is shown to the user when present.
    ClassificationFailed {
        request_id: RequestId,
        message: Option<String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
