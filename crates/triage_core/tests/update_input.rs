use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use triage_core::{update, AppState, EmailFile, Effect, Msg, SelectedFileView, Submission};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(triage_logging::initialize_for_tests);
}

fn file(name: &str, mime: Option<&str>) -> EmailFile {
    EmailFile {
        path: PathBuf::from("/tmp").join(name),
        file_name: name.to_string(),
        declared_mime: mime.map(str::to_string),
        size: 2048,
    }
}

#[test]
fn blank_text_never_issues_a_call() {
    init_logging();
    for input in ["", "   ", "\n\t  \n"] {
        let (state, _) = update(AppState::new(), Msg::InputChanged(input.to_string()));
        let before = state.clone();
        let (next, effects) = update(state, Msg::SubmitTextClicked);

        assert!(effects.is_empty(), "input {input:?} issued {effects:?}");
        assert_eq!(next, before);
        assert!(!next.view().loading);
    }
}

#[test]
fn text_submit_is_trimmed() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::InputChanged("  Please review the invoice.\n".to_string()),
    );
    let (state, effects) = update(state, Msg::SubmitTextClicked);

    assert_eq!(
        effects,
        vec![Effect::Classify {
            request_id: 1,
            submission: Submission::Text("Please review the invoice.".to_string()),
        }]
    );
    assert!(state.view().loading);
    // The buffer itself is left as typed.
    assert_eq!(state.view().email_text, "  Please review the invoice.\n");
}

#[test]
fn valid_file_is_selected_and_shown() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::FileSelected(file("mail.pdf", Some("application/pdf"))),
    );

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(
        view.selected_file,
        Some(SelectedFileView {
            file_name: "mail.pdf".to_string(),
            size_label: "2 KB".to_string(),
        })
    );
    assert!(view.can_submit_file);
    assert_eq!(view.notice, None);
}

#[test]
fn invalid_file_raises_notice_and_is_not_stored() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSelected(file("mail.txt", None)),
    );
    let (state, effects) = update(state, Msg::FileSelected(file("photo.png", Some("image/png"))));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.selected_file, None);
    assert!(view.notice.unwrap().contains("photo.png"));
}

#[test]
fn rejected_drop_keeps_existing_selection() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileDropped(file("mail.txt", None)),
    );
    let (state, _) = update(state, Msg::FileDropped(file("archive.zip", None)));

    let view = state.view();
    assert_eq!(view.selected_file.unwrap().file_name, "mail.txt");
    assert!(view.notice.is_some());
}

#[test]
fn drop_and_select_share_validation() {
    init_logging();
    let cases = [
        ("a.txt", None, true),
        ("a.PDF", None, true),
        ("a.eml", Some("text/plain"), true),
        ("a", Some("application/pdf"), true),
        ("a.docx", None, false),
        ("a.html", Some("text/html"), false),
    ];
    for (name, mime, accepted) in cases {
        for msg in [
            Msg::FileSelected(file(name, mime)),
            Msg::FileDropped(file(name, mime)),
        ] {
            let (state, _) = update(AppState::new(), msg);
            assert_eq!(state.view().selected_file.is_some(), accepted, "{name}");
            assert_eq!(state.view().notice.is_none(), accepted, "{name}");
        }
    }
}

#[test]
fn file_submit_without_selection_is_noop() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitFileClicked);

    assert!(effects.is_empty());
    assert!(!state.view().loading);
}

#[test]
fn file_submit_emits_one_file_submission() {
    init_logging();
    let selected = file("mail.txt", Some("text/plain"));
    let (state, _) = update(AppState::new(), Msg::InputChanged("ignored".to_string()));
    let (state, _) = update(state, Msg::FileSelected(selected.clone()));
    let (_state, effects) = update(state, Msg::SubmitFileClicked);

    assert_eq!(
        effects,
        vec![Effect::Classify {
            request_id: 1,
            submission: Submission::File(selected),
        }]
    );
}

#[test]
fn reset_form_clears_text_and_file() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("hello".to_string()));
    let (state, _) = update(state, Msg::FileSelected(file("mail.txt", None)));
    let (state, effects) = update(state, Msg::ResetFormClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.email_text, "");
    assert_eq!(view.selected_file, None);
    assert!(!view.can_submit_text);
    assert!(!view.can_submit_file);
}

#[test]
fn editing_text_dismisses_notice() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileSelected(file("x.exe", None)));
    assert!(state.view().notice.is_some());

    let (state, _) = update(state, Msg::InputChanged("Hi".to_string()));
    assert_eq!(state.view().notice, None);

    let (state, _) = update(state, Msg::FileDropped(file("y.exe", None)));
    let (state, _) = update(state, Msg::DismissNotice);
    assert_eq!(state.view().notice, None);
}
