#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input for copying.
    CopySubmitted,
    /// Remote service answered the submit call.
    SubmitFinished {
        result: Result<crate::JobId, String>,
    },
    /// Poll timer fired.
    PollTick,
    /// Status snapshot arrived for a poll issued under `job_id`.
    StatusReceived {
        job_id: crate::JobId,
        snapshot: crate::StatusSnapshot,
    },
    /// A poll attempt failed in transport or decoding.
    StatusFailed {
        job_id: crate::JobId,
        error: String,
    },
    /// User asked to download the finished copy as an archive.
    DownloadClicked,
    /// User asked to open the finished copy in the browser.
    PreviewClicked,
    /// User clicked New copy.
    NewCopyClicked,
    /// UI/render tick to coalesce rendering and expire notices.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
