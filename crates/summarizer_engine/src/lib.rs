//! Summarizer engine: service client, background execution and local file output.
mod client;
mod download;
mod engine;
mod persist;
mod types;

pub use client::{ReqwestService, ServiceSettings, SummaryService};
pub use download::{download_document, download_filename, DownloadWriter};
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, HistoryRecord, ServiceError, SummarizePayload, UploadKind,
};
