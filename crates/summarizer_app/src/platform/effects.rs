use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info};
use summarizer_core::{Effect, HistoryEntry, Msg, SummarizeRequest};
use summarizer_engine::{
    DownloadWriter, EngineEvent, EngineHandle, FailureKind, HistoryRecord, ServiceError,
    SummarizePayload,
};

/// Executes core effects: service calls go to the engine, downloads are written in place.
pub struct EffectRunner {
    engine: EngineHandle,
    downloads: DownloadWriter,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, download_dir: PathBuf) -> Self {
        engine_info!("Downloads will be written to {:?}", download_dir);
        Self {
            engine,
            downloads: DownloadWriter::new(download_dir),
        }
    }

    /// Starts every effect. Effects that complete synchronously report back
    /// through the returned messages.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut completed = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadHistory => {
                    engine_debug!("LoadHistory");
                    self.engine.load_history();
                }
                Effect::Summarize(request) => {
                    let payload = to_payload(request);
                    engine_info!(
                        "Summarize kind={} model={}",
                        payload_kind(&payload),
                        payload.model()
                    );
                    self.engine.summarize(payload);
                }
                Effect::DeleteEntry { id } => {
                    engine_info!("DeleteEntry id={}", id);
                    self.engine.delete(id);
                }
                Effect::ClearHistory => {
                    engine_info!("ClearHistory");
                    self.engine.clear();
                }
                Effect::Download { model, summary } => {
                    let result = self
                        .downloads
                        .save(model.as_deref(), &summary)
                        .map_err(|err| err.to_string());
                    completed.push(Msg::DownloadFinished(result));
                }
            }
        }
        completed
    }

    /// Drains finished service calls without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_engine_event(event));
        }
        inbox
    }
}

fn to_payload(request: SummarizeRequest) -> SummarizePayload {
    match request {
        SummarizeRequest::Text { text, model } => SummarizePayload::Text {
            text,
            model: model.as_str().to_string(),
        },
        SummarizeRequest::File { attachment, model } => SummarizePayload::File {
            path: attachment.path,
            model: model.as_str().to_string(),
        },
    }
}

fn payload_kind(payload: &SummarizePayload) -> &'static str {
    match payload {
        SummarizePayload::Text { .. } => "json",
        SummarizePayload::File { .. } => "multipart",
    }
}

fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HistoryLoaded(Ok(records)) => {
            Msg::HistoryLoaded(records.into_iter().map(to_history_entry).collect())
        }
        EngineEvent::HistoryLoaded(Err(err)) => Msg::HistoryLoadFailed {
            reason: err.to_string(),
        },
        EngineEvent::Summarized(Ok(summary)) => Msg::SummaryReceived { summary },
        EngineEvent::Summarized(Err(err)) if err.kind == FailureKind::Io => {
            Msg::AttachmentUnreadable {
                reason: err.to_string(),
            }
        }
        EngineEvent::Summarized(Err(err)) => Msg::SummarizeFailed {
            reason: err.to_string(),
        },
        EngineEvent::Deleted { id, result } => Msg::DeleteFinished {
            id,
            result: result.map_err(reason),
        },
        EngineEvent::Cleared(result) => Msg::ClearFinished(result.map_err(reason)),
    }
}

fn to_history_entry(record: HistoryRecord) -> HistoryEntry {
    HistoryEntry {
        id: record.id,
        model: record.model,
        text: record.text,
        summary: record.summary,
    }
}

fn reason(err: ServiceError) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer_core::{Attachment, ModelKind};
    use summarizer_engine::ServiceSettings;
    use tempfile::TempDir;

    fn http_error(code: u16) -> ServiceError {
        ServiceError {
            kind: FailureKind::HttpStatus(code),
            message: String::new(),
        }
    }

    #[test]
    fn text_request_becomes_json_payload() {
        let payload = to_payload(SummarizeRequest::Text {
            text: "Hello world".to_string(),
            model: ModelKind::T5,
        });
        assert_eq!(
            payload,
            SummarizePayload::Text {
                text: "Hello world".to_string(),
                model: "t5".to_string(),
            }
        );
        assert_eq!(payload_kind(&payload), "json");
    }

    #[test]
    fn file_request_becomes_multipart_payload() {
        let payload = to_payload(SummarizeRequest::File {
            attachment: Attachment::from_path(PathBuf::from("/docs/a.pdf")),
            model: ModelKind::Bart,
        });
        assert_eq!(
            payload,
            SummarizePayload::File {
                path: PathBuf::from("/docs/a.pdf"),
                model: "bart".to_string(),
            }
        );
        assert_eq!(payload_kind(&payload), "multipart");
    }

    fn runner_in(dir: &TempDir) -> EffectRunner {
        let engine = EngineHandle::new(ServiceSettings::default()).unwrap();
        EffectRunner::new(engine, dir.path().to_path_buf())
    }

    #[test]
    fn download_effect_writes_file_and_reports_path() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);

        let completed = runner.run(vec![Effect::Download {
            model: Some("t5".to_string()),
            summary: "Hi.".to_string(),
        }]);

        let expected = temp.path().join("summary_t5.txt");
        assert_eq!(completed, vec![Msg::DownloadFinished(Ok(expected.clone()))]);
        assert_eq!(
            std::fs::read_to_string(expected).unwrap(),
            "Model: T5\n\nSummary:\nHi."
        );
    }

    #[test]
    fn download_into_unusable_dir_reports_failure() {
        let temp = TempDir::new().unwrap();
        let not_a_dir = temp.path().join("taken");
        std::fs::write(&not_a_dir, "occupied").unwrap();
        let engine = EngineHandle::new(ServiceSettings::default()).unwrap();
        let runner = EffectRunner::new(engine, not_a_dir);

        let completed = runner.run(vec![Effect::Download {
            model: None,
            summary: "Hi.".to_string(),
        }]);

        assert!(matches!(completed.as_slice(), [Msg::DownloadFinished(Err(_))]));
    }

    #[test]
    fn poll_without_events_is_empty() {
        let temp = TempDir::new().unwrap();
        let runner = runner_in(&temp);
        assert!(runner.poll().is_empty());
    }

    #[test]
    fn unreadable_attachment_is_not_a_server_error() {
        let err = ServiceError {
            kind: FailureKind::Io,
            message: "/no/such/dir/report.pdf: No such file or directory".to_string(),
        };
        let msg = map_engine_event(EngineEvent::Summarized(Err(err)));
        assert!(matches!(msg, Msg::AttachmentUnreadable { .. }));
    }

    #[test]
    fn history_records_map_to_entries() {
        let msg = map_engine_event(EngineEvent::HistoryLoaded(Ok(vec![HistoryRecord {
            id: "1".to_string(),
            model: "bart".to_string(),
            text: "t".to_string(),
            summary: "s".to_string(),
        }])));
        assert_eq!(
            msg,
            Msg::HistoryLoaded(vec![HistoryEntry {
                id: "1".to_string(),
                model: "bart".to_string(),
                text: "t".to_string(),
                summary: "s".to_string(),
            }])
        );
    }

    #[test]
    fn failures_map_to_reasons() {
        assert_eq!(
            map_engine_event(EngineEvent::Deleted {
                id: "42".to_string(),
                result: Err(http_error(404)),
            }),
            Msg::DeleteFinished {
                id: "42".to_string(),
                result: Err("http status 404".to_string()),
            }
        );
        assert_eq!(
            map_engine_event(EngineEvent::Summarized(Err(http_error(500)))),
            Msg::SummarizeFailed {
                reason: "http status 500".to_string(),
            }
        );
        assert_eq!(
            map_engine_event(EngineEvent::Cleared(Ok(()))),
            Msg::ClearFinished(Ok(()))
        );
    }
}
