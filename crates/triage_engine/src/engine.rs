use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use triage_logging::{triage_debug, triage_warn};

use crate::classify::{Classifier, ClassifierSettings, ReqwestClassifier};
use crate::{ClassifyRequest, EngineEvent, RequestId};

/// Receives engine events on whatever thread finished the work.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Classify {
        request_id: RequestId,
        request: ClassifyRequest,
    },
}

/// Owns a background runtime that executes classification calls. Calls are
/// never cancelled; every submitted request produces exactly one
/// `EngineEvent::Completed`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClassifierSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_classifier(Arc::new(ReqwestClassifier::new(settings)), sink)
    }

    pub fn with_classifier(
        classifier: Arc<dyn Classifier>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("triage-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let classifier = classifier.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(classifier.as_ref(), command, sink.as_ref()).await;
                });
            }
            triage_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, request: ClassifyRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Classify {
                request_id,
                request,
            })
            .is_err()
        {
            triage_warn!("Engine stopped; request {} dropped", request_id);
        }
    }
}

async fn handle_command(classifier: &dyn Classifier, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Classify {
            request_id,
            request,
        } => {
            let result = classifier.classify(&request).await;
            if let Err(err) = &result {
                triage_warn!("Request {} failed: {}", request_id, err);
            }
            sink.emit(EngineEvent::Completed { request_id, result });
        }
    }
}
