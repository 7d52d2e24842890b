use std::io;
use std::sync::{mpsc, Arc};

use triage_core::{EmailAnalysis, EmailFile, Effect, Msg, Submission};
use triage_engine::{
    Classification, ClassifierSettings, ClassifyRequest, EngineEvent, EngineHandle, EventSink,
    FileInfo, UploadFile,
};
use triage_logging::{triage_debug, triage_info, triage_warn};

use super::app::LoopEvent;
use super::clipboard;

/// Executes effects emitted by the core and feeds engine results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClassifierSettings, loop_tx: mpsc::Sender<LoopEvent>) -> io::Result<Self> {
        let sink = Arc::new(LoopSink { tx: loop_tx });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Classify {
                    request_id,
                    submission,
                } => {
                    triage_info!("Classify request_id={}", request_id);
                    self.engine.submit(request_id, to_request(submission));
                }
                Effect::CopyToClipboard { text } => {
                    // Fire and forget: the outcome never reaches the state machine.
                    match clipboard::osc52_copy(&mut io::stdout(), &text) {
                        Ok(()) => triage_debug!("Copied {} chars", text.chars().count()),
                        Err(err) => triage_warn!("Clipboard copy failed: {}", err),
                    }
                }
            }
        }
    }
}

struct LoopSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for LoopSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Engine(to_msg(event)));
    }
}

pub fn to_request(submission: Submission) -> ClassifyRequest {
    match submission {
        Submission::Text(text) => ClassifyRequest::Text(text),
        Submission::File(file) => ClassifyRequest::File(UploadFile {
            path: file.path,
            file_name: file.file_name,
            mime: file.declared_mime,
        }),
    }
}

pub fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed {
            request_id,
            result: Ok(classification),
        } => Msg::ClassificationSucceeded {
            request_id,
            analysis: to_analysis(classification),
        },
        EngineEvent::Completed {
            request_id,
            result: Err(err),
        } => Msg::ClassificationFailed {
            request_id,
            message: Some(err.message),
        },
    }
}

pub fn to_email_file(info: FileInfo) -> EmailFile {
    EmailFile {
        path: info.path,
        file_name: info.file_name,
        declared_mime: info.declared_mime,
        size: info.size,
    }
}

fn to_analysis(classification: Classification) -> EmailAnalysis {
    EmailAnalysis {
        category: classification.category,
        confidence: classification.confidence,
        suggested_response: classification.suggested_response,
        original_text_preview: classification.original_text_preview,
    }
}
