use sitecopy_core::{AppViewModel, Phase, StepMarker};

pub const MARKER_DONE: &str = "[x]";
pub const MARKER_ACTIVE: &str = "[>]";
pub const MARKER_PENDING: &str = "[ ]";

/// Rendered in place of missing result metadata, never a blank.
pub const NOT_AVAILABLE: &str = "not available";

const BAR_WIDTH: u32 = 30;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(notice) = &view.notice {
        lines.push(format!("! {notice}"));
    }

    match view.phase {
        Phase::Form => {
            if view.submit_enabled {
                lines.push("Enter a URL to copy (http/https), then press Enter:".to_string());
            } else {
                lines.push("Submitting...".to_string());
            }
        }
        Phase::Progress => {
            lines.push(format!(
                "{} {:>3}%",
                progress_bar(view.progress_percent),
                view.progress_percent
            ));
            lines.push(view.status_line.clone());
            for step in &view.steps {
                let marker = match step.marker {
                    StepMarker::Done => MARKER_DONE,
                    StepMarker::Active => MARKER_ACTIVE,
                    StepMarker::Pending => MARKER_PENDING,
                };
                lines.push(format!("  {marker} {}", step.message));
            }
        }
        Phase::Result => {
            lines.push("Copy finished.".to_string());
            let url = view.result.as_ref().and_then(|result| result.url.as_deref());
            let output_path = view
                .result
                .as_ref()
                .and_then(|result| result.output_path.as_deref());
            lines.push(format!("  Source: {}", url.unwrap_or(NOT_AVAILABLE)));
            lines.push(format!(
                "  Output: {}",
                output_path.unwrap_or(NOT_AVAILABLE)
            ));
            if let Some(completed_at) = view
                .result
                .as_ref()
                .and_then(|result| result.completed_at.as_deref())
            {
                lines.push(finished_line(completed_at));
            }
            lines.push("Actions: [d]ownload  [p]review  [n]ew copy".to_string());
        }
    }

    lines
}

fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) * BAR_WIDTH / 100) as usize;
    let width = BAR_WIDTH as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

// The service stamps naive ISO-8601 timestamps; fall back to the raw string.
fn finished_line(raw: &str) -> String {
    match raw.parse::<chrono::NaiveDateTime>() {
        Ok(ts) => format!("  Finished: {}", ts.format("%Y-%m-%d %H:%M:%S")),
        Err(_) => format!("  Finished: {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecopy_core::{update, AppState, JobState, Msg, StatusSnapshot, Step, StepState};

    fn tracking_job(job_id: &str) -> AppState {
        let state = AppState::new();
        let (state, _) = update(state, Msg::InputChanged("https://example.com".to_string()));
        let (state, _) = update(state, Msg::CopySubmitted);
        let (state, _) = update(
            state,
            Msg::SubmitFinished {
                result: Ok(job_id.to_string()),
            },
        );
        state
    }

    fn snapshot(state: JobState) -> StatusSnapshot {
        StatusSnapshot {
            state,
            progress: 0,
            message: None,
            steps: Vec::new(),
            url: None,
            output_path: None,
            error: None,
            completed_at: None,
        }
    }

    #[test]
    fn progress_view_shows_bar_status_and_markers() {
        let state = tracking_job("abc");
        let (state, _) = update(
            state,
            Msg::StatusReceived {
                job_id: "abc".to_string(),
                snapshot: StatusSnapshot {
                    state: JobState::Running,
                    progress: 40,
                    message: Some("Fetching pages".to_string()),
                    steps: vec![
                        Step {
                            state: StepState::Completed,
                            message: "Init".to_string(),
                        },
                        Step {
                            state: StepState::Current,
                            message: "Crawl".to_string(),
                        },
                        Step {
                            state: StepState::Pending,
                            message: "Archive".to_string(),
                        },
                    ],
                    ..snapshot(JobState::Running)
                },
            },
        );

        let lines = render(&state.view());
        assert_eq!(lines[0], "[############------------------]  40%");
        assert_eq!(lines[1], "Fetching pages");
        assert_eq!(lines[2], "  [x] Init");
        assert_eq!(lines[3], "  [>] Crawl");
        assert_eq!(lines[4], "  [ ] Archive");
    }

    #[test]
    fn result_view_marks_missing_metadata() {
        let state = tracking_job("abc");
        let (state, _) = update(
            state,
            Msg::StatusReceived {
                job_id: "abc".to_string(),
                snapshot: snapshot(JobState::Completed),
            },
        );

        let lines = render(&state.view());
        assert_eq!(lines[0], "Copy finished.");
        assert_eq!(lines[1], format!("  Source: {NOT_AVAILABLE}"));
        assert_eq!(lines[2], format!("  Output: {NOT_AVAILABLE}"));
    }

    #[test]
    fn result_view_renders_metadata_verbatim() {
        let state = tracking_job("abc");
        let (state, _) = update(
            state,
            Msg::StatusReceived {
                job_id: "abc".to_string(),
                snapshot: StatusSnapshot {
                    url: Some("https://example.com".to_string()),
                    output_path: Some("/out/example.zip".to_string()),
                    completed_at: Some("2026-08-07T12:00:00".to_string()),
                    ..snapshot(JobState::Completed)
                },
            },
        );

        let lines = render(&state.view());
        assert!(lines.contains(&"  Source: https://example.com".to_string()));
        assert!(lines.contains(&"  Output: /out/example.zip".to_string()));
        assert!(lines.contains(&"  Finished: 2026-08-07 12:00:00".to_string()));
    }

    #[test]
    fn notice_renders_above_the_form() {
        let state = AppState::new();
        let (state, _) = update(state, Msg::InputChanged("not a url".to_string()));
        let (state, _) = update(state, Msg::CopySubmitted);

        let lines = render(&state.view());
        assert_eq!(
            lines[0],
            "! Invalid URL. Expected format: https://example.com"
        );
    }

    #[test]
    fn progress_bar_clamps_overshoot() {
        assert_eq!(progress_bar(250), progress_bar(100));
    }
}
