use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::engine_debug;

use crate::client::{ReqwestService, ServiceSettings, SummaryService};
use crate::{EngineEvent, FailureKind, ServiceError, SummarizePayload};

enum EngineCommand {
    LoadHistory,
    Summarize(SummarizePayload),
    Delete { id: String },
    Clear,
}

/// Runs service requests on a background tokio runtime.
///
/// Every command resolves exactly once into an [`EngineEvent`].
#[derive(Debug)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let service = ReqwestService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn SummaryService>) -> Result<Self, ServiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_history(&self) {
        self.submit(EngineCommand::LoadHistory);
    }

    pub fn summarize(&self, payload: SummarizePayload) {
        self.submit(EngineCommand::Summarize(payload));
    }

    pub fn delete(&self, id: impl Into<String>) {
        self.submit(EngineCommand::Delete { id: id.into() });
    }

    pub fn clear(&self) {
        self.submit(EngineCommand::Clear);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    service: &dyn SummaryService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadHistory => EngineEvent::HistoryLoaded(service.history().await),
        EngineCommand::Summarize(payload) => {
            engine_debug!("Summarize with model {}", payload.model());
            EngineEvent::Summarized(service.summarize(&payload).await)
        }
        EngineCommand::Delete { id } => {
            let result = service.delete(&id).await;
            EngineEvent::Deleted { id, result }
        }
        EngineCommand::Clear => EngineEvent::Cleared(service.clear().await),
    };
    let _ = event_tx.send(event);
}
