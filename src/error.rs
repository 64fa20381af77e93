// src/error.rs
use thiserror::Error;

/// Failures surfaced by the profile and recommendation operations.
///
/// Corrupt persisted data is not represented here: it is read back as absent.
#[derive(Debug, Error)]
pub enum JobMatchError {
    /// Required input missing; raised before any I/O.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure or non-success status from the scoring service.
    #[error("Service error: {0:#}")]
    Service(#[from] anyhow::Error),

    /// Success status but a body of the wrong shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Storage error: {0:#}")]
    Storage(#[source] anyhow::Error),

    #[error("Profile is incomplete: add your name, email and at least one skill")]
    IncompleteProfile,
}

impl JobMatchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, JobMatchError::Validation(_))
    }
}

pub type JobMatchResult<T> = std::result::Result<T, JobMatchError>;
