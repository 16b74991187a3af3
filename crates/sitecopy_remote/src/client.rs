use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::client_debug;

use crate::{ApiError, JobApi, JobStatusDto, SubmitReceipt};

enum RemoteCommand {
    Submit { url: String },
    FetchStatus { job_id: String },
}

/// Answers from the service, tagged with the job they were issued for.
#[derive(Debug, Clone)]
pub enum RemoteEvent {
    SubmitFinished {
        result: Result<SubmitReceipt, ApiError>,
    },
    StatusFetched {
        job_id: String,
        result: Result<JobStatusDto, ApiError>,
    },
}

/// Commands in, events out. One background thread owns a tokio runtime and
/// runs each call as its own task; callers never block.
pub struct RemoteHandle {
    cmd_tx: mpsc::Sender<RemoteCommand>,
}

impl RemoteHandle {
    pub fn new(api: Arc<dyn JobApi>) -> (Self, mpsc::Receiver<RemoteEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<RemoteEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn submit(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(RemoteCommand::Submit { url: url.into() });
    }

    pub fn fetch_status(&self, job_id: impl Into<String>) {
        let _ = self.cmd_tx.send(RemoteCommand::FetchStatus {
            job_id: job_id.into(),
        });
    }
}

async fn handle_command(
    api: &dyn JobApi,
    command: RemoteCommand,
    event_tx: mpsc::Sender<RemoteEvent>,
) {
    match command {
        RemoteCommand::Submit { url } => {
            let result = api.submit(&url).await;
            if let Err(err) = &result {
                client_debug!("submit of {url} failed: {err}");
            }
            let _ = event_tx.send(RemoteEvent::SubmitFinished { result });
        }
        RemoteCommand::FetchStatus { job_id } => {
            let result = api.status(&job_id).await;
            if let Err(err) = &result {
                client_debug!("status fetch for job {job_id} failed: {err}");
            }
            let _ = event_tx.send(RemoteEvent::StatusFetched { job_id, result });
        }
    }
}
