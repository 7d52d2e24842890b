use std::sync::Once;

use pretty_assertions::assert_eq;
use triage_core::{
    update, AppState, CategoryClass, ConfidenceColor, EmailAnalysis, Effect, Msg, Phase,
    RequestId, GENERIC_ERROR,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(triage_logging::initialize_for_tests);
}

fn analysis(category: &str, confidence: f64) -> EmailAnalysis {
    EmailAnalysis {
        category: category.to_string(),
        confidence,
        suggested_response: "Thanks, we are on it.".to_string(),
        original_text_preview: "Hello team...".to_string(),
    }
}

fn submit_text(state: AppState, input: &str) -> (AppState, RequestId) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, effects) = update(state, Msg::SubmitTextClicked);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Classify { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("classify effect");
    (state, request_id)
}

#[test]
fn submit_enters_loading_without_result_or_error() {
    init_logging();
    let (mut state, request_id) = submit_text(AppState::new(), "Status of ticket 42?");

    assert_eq!(state.phase(), &Phase::Loading { request_id });
    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.analysis, None);
    assert_eq!(view.error, None);
    assert_eq!(view.confidence_color, ConfidenceColor::Neutral);
    assert!(state.consume_dirty());
}

#[test]
fn success_stores_exact_result() {
    init_logging();
    let (state, request_id) = submit_text(AppState::new(), "Status of ticket 42?");
    let expected = analysis("Produtivo", 0.95);

    let (state, effects) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id,
            analysis: expected.clone(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.analysis, Some(expected));
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.category_class, Some(CategoryClass::Productive));
    assert_eq!(view.confidence_color, ConfidenceColor::Success);
    assert_eq!(view.confidence_label.as_deref(), Some("95.0%"));
}

#[test]
fn other_categories_are_unproductive() {
    init_logging();
    let (state, request_id) = submit_text(AppState::new(), "Happy holidays!");
    let (state, _) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id,
            analysis: analysis("Improdutivo", 0.65),
        },
    );

    let view = state.view();
    assert_eq!(view.category_class, Some(CategoryClass::Unproductive));
    assert_eq!(view.confidence_color, ConfidenceColor::Warning);
}

#[test]
fn failure_stores_message() {
    init_logging();
    let (state, request_id) = submit_text(AppState::new(), "Status?");
    let (state, _) = update(
        state,
        Msg::ClassificationFailed {
            request_id,
            message: Some("Text is too short or empty.".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.analysis, None);
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some("Text is too short or empty."));
}

#[test]
fn failure_without_message_uses_generic_text() {
    init_logging();
    for message in [None, Some(String::new()), Some("  ".to_string())] {
        let (state, request_id) = submit_text(AppState::new(), "Status?");
        let (state, _) = update(
            state,
            Msg::ClassificationFailed {
                request_id,
                message,
            },
        );
        assert_eq!(state.view().error.as_deref(), Some(GENERIC_ERROR));
    }
}

#[test]
fn new_submission_discards_previous_outcome() {
    init_logging();
    let (state, first) = submit_text(AppState::new(), "First email");
    let (state, _) = update(
        state,
        Msg::ClassificationFailed {
            request_id: first,
            message: Some("boom".to_string()),
        },
    );
    assert!(state.view().error.is_some());

    let (state, second) = submit_text(state, "Second email");
    assert_ne!(first, second);
    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.analysis, None);
}

#[test]
fn clear_always_resets_results() {
    init_logging();
    // From success.
    let (state, request_id) = submit_text(AppState::new(), "Email");
    let (state, _) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id,
            analysis: analysis("Produtivo", 0.9),
        },
    );
    let (state, _) = update(state, Msg::ClearResultsClicked);
    assert_eq!(state.phase(), &Phase::Idle);

    // From failure.
    let (state, request_id) = submit_text(state, "Email");
    let (state, _) = update(
        state,
        Msg::ClassificationFailed {
            request_id,
            message: None,
        },
    );
    let (state, _) = update(state, Msg::ClearResultsClicked);
    let view = state.view();
    assert_eq!(view.analysis, None);
    assert_eq!(view.error, None);

    // From idle and while loading.
    let (state, _) = update(AppState::new(), Msg::ClearResultsClicked);
    assert_eq!(state.phase(), &Phase::Idle);
    let (state, _) = submit_text(state, "Email");
    let (state, _) = update(state, Msg::ClearResultsClicked);
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.analysis, None);
    assert_eq!(view.error, None);
}

#[test]
fn late_response_after_clear_is_ignored() {
    init_logging();
    let (state, request_id) = submit_text(AppState::new(), "Email");
    let (mut state, _) = update(state, Msg::ClearResultsClicked);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id,
            analysis: analysis("Produtivo", 0.9),
        },
    );

    assert_eq!(state.phase(), &Phase::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn superseded_response_is_ignored() {
    init_logging();
    let (state, first) = submit_text(AppState::new(), "First");
    let (state, second) = submit_text(state, "Second");

    // The first call resolves last in wall-clock order but is stale.
    let (state, _) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id: second,
            analysis: analysis("Improdutivo", 0.3),
        },
    );
    let (state, _) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id: first,
            analysis: analysis("Produtivo", 0.99),
        },
    );

    let view = state.view();
    assert_eq!(view.analysis.unwrap().category, "Improdutivo");
    assert_eq!(view.confidence_color, ConfidenceColor::Danger);
}

#[test]
fn pending_stale_response_does_not_end_loading() {
    init_logging();
    let (state, first) = submit_text(AppState::new(), "First");
    let (state, second) = submit_text(state, "Second");
    let (state, _) = update(
        state,
        Msg::ClassificationFailed {
            request_id: first,
            message: Some("late".to_string()),
        },
    );

    assert_eq!(state.pending_request(), Some(second));
    assert!(state.view().loading);
    assert_eq!(state.view().error, None);
}

#[test]
fn copy_emits_effect_only_with_result() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CopyResponseClicked);
    assert!(effects.is_empty());

    let (state, request_id) = submit_text(state, "Email");
    let (state, _) = update(
        state,
        Msg::ClassificationSucceeded {
            request_id,
            analysis: analysis("Produtivo", 0.9),
        },
    );
    let before = state.clone();
    let (next, effects) = update(state, Msg::CopyResponseClicked);

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "Thanks, we are on it.".to_string()
        }]
    );
    assert_eq!(next, before);
}
