use crate::state::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub phase: Phase,
    pub url_input: String,
    pub submit_enabled: bool,
    /// Clamped to 0..=100 for display.
    pub progress_percent: u32,
    pub status_line: String,
    pub steps: Vec<StepRowView>,
    pub result: Option<ResultView>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRowView {
    pub marker: StepMarker,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    Done,
    Active,
    Pending,
}

/// Final result metadata. `None` fields render as an explicit
/// "not available" marker, never as blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub url: Option<String>,
    pub output_path: Option<String>,
    pub completed_at: Option<String>,
}
