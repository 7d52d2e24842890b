use crate::{CategoryClass, ConfidenceColor, EmailAnalysis};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub file_name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub email_text: String,
    pub selected_file: Option<SelectedFileView>,
    /// Blocking notice raised by the input collector.
    pub notice: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub analysis: Option<EmailAnalysis>,
    pub category_class: Option<CategoryClass>,
    pub confidence_color: ConfidenceColor,
    /// Confidence as a percentage with one decimal, e.g. `87.5%`.
    pub confidence_label: Option<String>,
    pub can_submit_text: bool,
    pub can_submit_file: bool,
    pub dirty: bool,
}
