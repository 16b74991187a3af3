use crate::view_model::{AppViewModel, ResultView, StepMarker, StepRowView};

/// Opaque job handle assigned by the remote service.
pub type JobId = String;

/// How many render ticks a transient notice stays visible.
pub const NOTICE_TICKS: u32 = 20;

/// Which section of the client is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Form,
    Progress,
    Result,
}

/// Job state as reported by the service. Anything the client does not
/// recognize arrives as `Unknown` and is treated as still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Completed,
    Error,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Current,
    Completed,
}

/// One named phase of the remote copy pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: StepState,
    pub message: String,
}

/// The status payload of one poll, as handed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: JobState,
    pub progress: u32,
    pub message: Option<String>,
    pub steps: Vec<Step>,
    pub url: Option<String>,
    pub output_path: Option<String>,
    pub error: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ProgressModel {
    percent: u32,
    status_line: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CopyResult {
    url: Option<String>,
    output_path: Option<String>,
    completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    text: String,
    remaining_ticks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    url_input: String,
    submit_in_flight: bool,
    current_job_id: Option<JobId>,
    progress: ProgressModel,
    result: Option<CopyResult>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The job currently being tracked, if any.
    pub fn job_id(&self) -> Option<&str> {
        self.current_job_id.as_deref()
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            url_input: self.url_input.clone(),
            submit_enabled: self.phase == Phase::Form && !self.submit_in_flight,
            progress_percent: self.progress.percent.min(100),
            status_line: self.progress.status_line.clone(),
            steps: self.progress.steps.iter().map(step_row).collect(),
            result: self.result.as_ref().map(|result| ResultView {
                url: result.url.clone(),
                output_path: result.output_path.clone(),
                completed_at: result.completed_at.clone(),
            }),
            notice: self.notice.as_ref().map(|notice| notice.text.clone()),
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn submit_in_flight(&self) -> bool {
        self.submit_in_flight
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submit_in_flight = true;
        self.dirty = true;
    }

    /// Remote accepted the submission: track the job and enter the
    /// progress phase with a zeroed display.
    pub(crate) fn accept_job(&mut self, job_id: JobId) {
        self.current_job_id = Some(job_id);
        self.submit_in_flight = false;
        self.phase = Phase::Progress;
        self.progress = ProgressModel {
            percent: 0,
            status_line: "Starting...".to_string(),
            steps: Vec::new(),
        };
        self.result = None;
        self.dirty = true;
    }

    /// Remote rejected the submission: re-arm the form, keep the input.
    pub(crate) fn fail_submit(&mut self, message: String) {
        self.submit_in_flight = false;
        self.show_notice(message);
    }

    pub(crate) fn apply_progress(&mut self, snapshot: &StatusSnapshot) {
        self.progress.percent = snapshot.progress;
        self.progress.status_line = snapshot
            .message
            .clone()
            .unwrap_or_else(|| "Working...".to_string());
        self.progress.steps = snapshot.steps.clone();
        self.dirty = true;
    }

    pub(crate) fn complete(&mut self, snapshot: StatusSnapshot) {
        self.phase = Phase::Result;
        self.result = Some(CopyResult {
            url: snapshot.url,
            output_path: snapshot.output_path,
            completed_at: snapshot.completed_at,
        });
        self.dirty = true;
    }

    /// Back to the initial configuration. The only path out of a terminal
    /// state; safe to call repeatedly.
    pub(crate) fn reset(&mut self) {
        self.phase = Phase::Form;
        self.url_input.clear();
        self.submit_in_flight = false;
        self.current_job_id = None;
        self.progress = ProgressModel::default();
        self.result = None;
        self.notice = None;
        self.dirty = true;
    }

    pub(crate) fn show_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            remaining_ticks: NOTICE_TICKS,
        });
        self.dirty = true;
    }

    pub(crate) fn tick_notice(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.remaining_ticks = notice.remaining_ticks.saturating_sub(1);
            if notice.remaining_ticks == 0 {
                self.notice = None;
                self.dirty = true;
            }
        }
    }
}

fn step_row(step: &Step) -> StepRowView {
    let marker = match step.state {
        StepState::Completed => StepMarker::Done,
        StepState::Current => StepMarker::Active,
        StepState::Pending => StepMarker::Pending,
    };
    StepRowView {
        marker,
        message: step.message.clone(),
    }
}
