//! Serde types for the copy service wire contract.

use serde::Deserialize;

/// Answer to a submit call. The service also echoes `status` and a greeting
/// message; only the handle matters to the client, extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitReceipt {
    pub job_id: String,
}

/// Error body of a rejected call. The `error` field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Job state string as the service spells it. The live service reports
/// `processing` while working; that and any future value land in `Unknown`,
/// which the client treats as still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStateDto {
    Running,
    Completed,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStateDto {
    #[default]
    Pending,
    Current,
    Completed,
    /// Unrecognized step states render with the pending marker.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepDto {
    #[serde(default)]
    pub status: StepStateDto,
    #[serde(default)]
    pub message: String,
}

/// One status snapshot. Everything except `status` is optional on the wire;
/// absent `progress` means 0 and absent `message` gets a placeholder later.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobStatusDto {
    #[serde(default)]
    pub status: JobStateDto,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDto>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}
