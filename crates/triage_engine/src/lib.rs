//! Mail triage engine: classification transport and effect execution.
mod classify;
mod engine;
mod inspect;
mod types;

pub use classify::{parse_endpoint, Classifier, ClassifierSettings, ReqwestClassifier, DEFAULT_ENDPOINT};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use inspect::{inspect_file, mime_for_name, sniff_mime, FileInfo};
pub use types::{
    Classification, ClassifyError, ClassifyRequest, EngineEvent, FailureKind, RequestId,
    UploadFile,
};
