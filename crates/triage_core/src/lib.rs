//! Mail triage core: pure state machine, input validation and view-model helpers.
mod analysis;
mod display;
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use analysis::{EmailAnalysis, EmailFile, RequestId};
pub use display::{
    category_class, confidence_color, format_file_size, CategoryClass, ConfidenceColor,
    LOADING_TEXT, PRODUCTIVE_CATEGORY,
};
pub use effect::{Effect, Submission};
pub use msg::Msg;
pub use state::{AppState, Phase, GENERIC_ERROR};
pub use update::update;
pub use validate::{
    submission_text, validate_file, InputError, ACCEPTED_EXTENSIONS, ACCEPTED_MIME_TYPES,
};
pub use view_model::{AppViewModel, SelectedFileView};
