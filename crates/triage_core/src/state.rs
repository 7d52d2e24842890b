use crate::view_model::{AppViewModel, SelectedFileView};
use crate::{
    category_class, confidence_color, format_file_size, EmailAnalysis, EmailFile, InputError,
    RequestId,
};

/// Message shown when a failed call carries no usable description.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Lifecycle of the current submission. Loading never coexists with a result
/// or an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        request_id: RequestId,
    },
    Succeeded(EmailAnalysis),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    email_text: String,
    selected_file: Option<EmailFile>,
    notice: Option<InputError>,
    phase: Phase,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let analysis = self.analysis().cloned();
        AppViewModel {
            email_text: self.email_text.clone(),
            selected_file: self.selected_file.as_ref().map(|file| SelectedFileView {
                file_name: file.file_name.clone(),
                size_label: format_file_size(file.size),
            }),
            notice: self.notice.as_ref().map(ToString::to_string),
            loading: self.is_loading(),
            error: match &self.phase {
                Phase::Failed(message) => Some(message.clone()),
                _ => None,
            },
            category_class: analysis.as_ref().map(category_class),
            confidence_color: confidence_color(analysis.as_ref()),
            confidence_label: analysis
                .as_ref()
                .map(|a| format!("{:.1}%", a.confidence * 100.0)),
            analysis,
            can_submit_text: !self.email_text.trim().is_empty(),
            can_submit_file: self.selected_file.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn email_text(&self) -> &str {
        &self.email_text
    }

    pub fn selected_file(&self) -> Option<&EmailFile> {
        self.selected_file.as_ref()
    }

    pub fn analysis(&self) -> Option<&EmailAnalysis> {
        match &self.phase {
            Phase::Succeeded(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Request id of the call whose response would still be applied.
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Loading { request_id } => Some(request_id),
            _ => None,
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_email_text(&mut self, text: String) {
        if self.email_text != text {
            self.email_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_file(&mut self, file: EmailFile) {
        self.selected_file = Some(file);
        self.mark_dirty();
    }

    pub(crate) fn clear_selected_file(&mut self) {
        if self.selected_file.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: InputError) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn reset_form(&mut self) {
        self.email_text.clear();
        self.selected_file = None;
        self.notice = None;
        self.mark_dirty();
    }

    /// Discards any previous result or error and enters `Loading`.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.phase = Phase::Loading { request_id };
        self.mark_dirty();
        request_id
    }

    /// Applies a response only when it belongs to the pending request.
    pub(crate) fn complete(&mut self, request_id: RequestId, outcome: Phase) -> bool {
        if self.pending_request() != Some(request_id) {
            return false;
        }
        self.phase = outcome;
        self.mark_dirty();
        true
    }

    pub(crate) fn clear_results(&mut self) {
        self.phase = Phase::Idle;
        self.mark_dirty();
    }
}
