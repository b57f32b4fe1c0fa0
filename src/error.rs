//! Error types for Sky Runner
//!
//! Gameplay endings (ground, obstacles) are not errors; see
//! [`crate::sim::TickOutcome`].

use thiserror::Error;

use crate::sim::SessionPhase;

/// The main error type for Sky Runner operations
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Invalid session transition: {from:?} -> {to:?}")]
    InvalidTransition { from: SessionPhase, to: SessionPhase },

    #[error("Simulation state became non-finite: {0}")]
    NonFinite(&'static str),

    #[error("Audio unavailable: {0}")]
    AudioUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Result type alias for Sky Runner operations
pub type Result<T> = std::result::Result<T, RunnerError>;
