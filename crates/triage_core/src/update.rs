use triage_logging::{excerpt, triage_debug, triage_info, triage_warn};

use crate::{
    submission_text, validate_file, AppState, Effect, EmailFile, Msg, Phase, Submission,
    GENERIC_ERROR,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.dismiss_notice();
            state.set_email_text(text);
            Vec::new()
        }
        Msg::FileSelected(file) => {
            accept_file(&mut state, file, true);
            Vec::new()
        }
        Msg::FileDropped(file) => {
            accept_file(&mut state, file, false);
            Vec::new()
        }
        Msg::SubmitTextClicked => match submission_text(state.email_text()) {
            Ok(text) => {
                triage_info!(
                    "Submitting text chars={} excerpt={:?}",
                    text.chars().count(),
                    excerpt(&text)
                );
                submit(&mut state, Submission::Text(text))
            }
            Err(err) => {
                triage_debug!("Ignoring text submit: {}", err);
                Vec::new()
            }
        },
        Msg::SubmitFileClicked => match state.selected_file().cloned() {
            Some(file) => {
                triage_info!(
                    "Submitting file name={} size={}",
                    file.file_name,
                    file.size
                );
                submit(&mut state, Submission::File(file))
            }
            None => Vec::new(),
        },
        Msg::ResetFormClicked => {
            state.reset_form();
            Vec::new()
        }
        Msg::ClearResultsClicked => {
            if let Some(request_id) = state.pending_request() {
                triage_debug!("Clearing while request {} is in flight", request_id);
            }
            state.clear_results();
            Vec::new()
        }
        Msg::CopyResponseClicked => match state.analysis() {
            Some(analysis) => vec![Effect::CopyToClipboard {
                text: analysis.suggested_response.clone(),
            }],
            None => Vec::new(),
        },
        Msg::DismissNotice => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::ClassificationSucceeded {
            request_id,
            analysis,
        } => {
            let category = analysis.category.clone();
            if state.complete(request_id, Phase::Succeeded(analysis)) {
                triage_info!("Request {} classified as {}", request_id, category);
            } else {
                triage_debug!("Dropping stale response for request {}", request_id);
            }
            Vec::new()
        }
        Msg::ClassificationFailed {
            request_id,
            message,
        } => {
            let message = message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_ERROR.to_string());
            if state.complete(request_id, Phase::Failed(message)) {
                triage_warn!("Request {} failed", request_id);
            } else {
                triage_debug!("Dropping stale failure for request {}", request_id);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Browse selection drops the previous file on rejection; a rejected drop
/// leaves the current selection alone.
fn accept_file(state: &mut AppState, file: EmailFile, replace_on_reject: bool) {
    match validate_file(&file) {
        Ok(()) => {
            state.dismiss_notice();
            state.select_file(file);
        }
        Err(err) => {
            triage_warn!("Rejected file {}: {}", file.file_name, err);
            if replace_on_reject {
                state.clear_selected_file();
            }
            state.set_notice(err);
        }
    }
}

fn submit(state: &mut AppState, submission: Submission) -> Vec<Effect> {
    state.dismiss_notice();
    let request_id = state.begin_request();
    vec![Effect::Classify {
        request_id,
        submission,
    }]
}
