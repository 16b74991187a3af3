use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use sitecopy_core::{Effect, JobState, Msg, StatusSnapshot, Step, StepState};
use sitecopy_remote::{
    ApiError, HttpJobApi, JobApi, JobStateDto, JobStatusDto, PollTimer, RemoteEvent, RemoteHandle,
    StepDto, StepStateDto,
};

use crate::app::Event;
use crate::config::ClientConfig;

/// Executes effects from the state machine against the remote service and
/// owns the poll timer. At most one timer is live at any time.
pub struct EffectRunner {
    api: Arc<HttpJobApi>,
    remote: RemoteHandle,
    poll: Option<PollTimer>,
    poll_interval: Duration,
    event_tx: mpsc::Sender<Event>,
}

impl EffectRunner {
    pub fn new(config: &ClientConfig, event_tx: mpsc::Sender<Event>) -> Result<Self, ApiError> {
        let api = Arc::new(HttpJobApi::new(config.api_settings())?);
        let (remote, remote_events) = RemoteHandle::new(api.clone() as Arc<dyn JobApi>);
        spawn_event_pump(remote_events, event_tx.clone());

        Ok(Self {
            api,
            remote,
            poll: None,
            poll_interval: config.poll_interval(),
            event_tx,
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitJob { url } => {
                    client_info!("Submitting copy job for {url}");
                    self.remote.submit(url);
                }
                Effect::StartPolling { job_id } => self.start_polling(job_id),
                Effect::StopPolling => self.stop_polling(),
                Effect::FetchStatus { job_id } => {
                    client_debug!(
                        "poll tick {}: fetching status of job {job_id}",
                        client_logging::get_poll_tick()
                    );
                    self.remote.fetch_status(job_id);
                }
                Effect::OpenDownload { job_id } => self.navigate(self.api.download_url(&job_id)),
                Effect::OpenPreview { job_id } => self.navigate(self.api.preview_url(&job_id)),
            }
        }
    }

    fn start_polling(&mut self, job_id: String) {
        if self.poll.is_some() {
            // One timer at a time; a live one here means a bug upstream.
            client_warn!("poll timer already armed, replacing it");
            self.stop_polling();
        }
        client_info!("Polling status for job {job_id}");
        let event_tx = self.event_tx.clone();
        self.poll = Some(PollTimer::spawn(self.poll_interval, move || {
            let _ = event_tx.send(Event::Core(Msg::PollTick));
        }));
    }

    fn stop_polling(&mut self) {
        if let Some(timer) = self.poll.take() {
            timer.cancel();
        }
    }

    fn navigate(&self, url: String) {
        client_info!("Opening {url}");
        if let Err(err) = webbrowser::open(&url) {
            client_warn!("Failed to open {url}: {err}");
        }
    }
}

fn spawn_event_pump(remote_events: mpsc::Receiver<RemoteEvent>, event_tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let mut failure_streak: u32 = 0;
        while let Ok(event) = remote_events.recv() {
            let msg = match event {
                RemoteEvent::SubmitFinished { result } => Msg::SubmitFinished {
                    result: result
                        .map(|receipt| receipt.job_id)
                        .map_err(|err| submit_failure_text(&err)),
                },
                RemoteEvent::StatusFetched { job_id, result } => match result {
                    Ok(snapshot) => {
                        failure_streak = 0;
                        Msg::StatusReceived {
                            job_id,
                            snapshot: map_snapshot(snapshot),
                        }
                    }
                    Err(err) => {
                        // Never surfaced and never fatal; the loop retries on
                        // its schedule. The streak makes a dead backend
                        // visible in the log.
                        failure_streak += 1;
                        client_warn!(
                            "Status poll for job {job_id} failed ({failure_streak} in a row): {err}"
                        );
                        Msg::StatusFailed {
                            job_id,
                            error: err.to_string(),
                        }
                    }
                },
            };
            if event_tx.send(Event::Core(msg)).is_err() {
                return;
            }
        }
    });
}

fn submit_failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Rejected {
            message: Some(text),
            ..
        } => text.clone(),
        ApiError::Rejected { message: None, .. } => {
            "The copy service rejected the request".to_string()
        }
        ApiError::Timeout | ApiError::Network(_) => "Could not reach the copy service".to_string(),
        ApiError::Decode(_) => "Unexpected answer from the copy service".to_string(),
    }
}

fn map_snapshot(dto: JobStatusDto) -> StatusSnapshot {
    StatusSnapshot {
        state: map_state(dto.status),
        progress: dto.progress,
        message: dto.message,
        steps: dto.steps.into_iter().map(map_step).collect(),
        url: dto.url,
        output_path: dto.output_path,
        error: dto.error,
        completed_at: dto.completed_at,
    }
}

fn map_state(state: JobStateDto) -> JobState {
    match state {
        JobStateDto::Running => JobState::Running,
        JobStateDto::Completed => JobState::Completed,
        JobStateDto::Error => JobState::Error,
        JobStateDto::Unknown => JobState::Unknown,
    }
}

fn map_step(step: StepDto) -> Step {
    let state = match step.status {
        StepStateDto::Completed => StepState::Completed,
        StepStateDto::Current => StepState::Current,
        // Unrecognized step states render as pending.
        StepStateDto::Pending | StepStateDto::Other => StepState::Pending,
    };
    Step {
        state,
        message: step.message,
    }
}
