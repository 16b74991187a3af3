use crate::{AppState, Effect, JobId, JobState, Msg, Phase, StatusSnapshot};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::CopySubmitted => submit(&mut state),
        Msg::SubmitFinished { result } => finish_submit(&mut state, result),
        Msg::PollTick => match state.job_id() {
            // A tick that straggles in after a reset or a terminal
            // snapshot fetches nothing.
            Some(job_id) if state.phase() == Phase::Progress => vec![Effect::FetchStatus {
                job_id: job_id.to_owned(),
            }],
            _ => Vec::new(),
        },
        Msg::StatusReceived { job_id, snapshot } => apply_status(&mut state, job_id, snapshot),
        Msg::StatusFailed { .. } => {
            // Transient poll failures never abort the loop or reach the
            // user; the next tick retries. The shell logs them.
            Vec::new()
        }
        Msg::DownloadClicked => match state.job_id() {
            Some(job_id) => vec![Effect::OpenDownload {
                job_id: job_id.to_owned(),
            }],
            None => Vec::new(),
        },
        Msg::PreviewClicked => match state.job_id() {
            Some(job_id) => vec![Effect::OpenPreview {
                job_id: job_id.to_owned(),
            }],
            None => Vec::new(),
        },
        Msg::NewCopyClicked => {
            state.reset();
            vec![Effect::StopPolling]
        }
        Msg::Tick => {
            state.tick_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.phase() != Phase::Form || state.submit_in_flight() {
        return Vec::new();
    }

    let url = state.url_input().trim().to_owned();
    if url.is_empty() {
        state.show_notice("Enter a URL to copy".to_string());
        return Vec::new();
    }
    if !is_supported_url(&url) {
        state.show_notice("Invalid URL. Expected format: https://example.com".to_string());
        return Vec::new();
    }

    state.begin_submit();
    vec![Effect::SubmitJob { url }]
}

fn finish_submit(state: &mut AppState, result: Result<JobId, String>) -> Vec<Effect> {
    if !state.submit_in_flight() {
        // The submission was abandoned (reset) before the answer arrived.
        return Vec::new();
    }
    match result {
        Ok(job_id) => {
            state.accept_job(job_id.clone());
            vec![Effect::StartPolling { job_id }]
        }
        Err(message) => {
            state.fail_submit(message);
            Vec::new()
        }
    }
}

fn apply_status(state: &mut AppState, job_id: JobId, snapshot: StatusSnapshot) -> Vec<Effect> {
    if state.job_id() != Some(job_id.as_str()) {
        // Straggler response issued under a job that is no longer current.
        return Vec::new();
    }

    // Render first: the final snapshot must be reflected before any
    // transition away from the progress view.
    state.apply_progress(&snapshot);

    match snapshot.state {
        JobState::Completed => {
            state.complete(snapshot);
            vec![Effect::StopPolling]
        }
        JobState::Error => {
            let message = snapshot
                .error
                .unwrap_or_else(|| "The copy failed on the service".to_string());
            state.reset();
            state.show_notice(message);
            vec![Effect::StopPolling]
        }
        // Running and anything unrecognized both mean: keep polling.
        JobState::Running | JobState::Unknown => Vec::new(),
    }
}

fn is_supported_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
