//! Sitecopy remote: HTTP access to the copy service and poll scheduling.
mod api;
mod client;
mod poll;
mod wire;

pub use api::{ApiError, ApiSettings, HttpJobApi, JobApi};
pub use client::{RemoteEvent, RemoteHandle};
pub use poll::PollTimer;
pub use wire::{JobStateDto, JobStatusDto, StepDto, StepStateDto, SubmitReceipt};
