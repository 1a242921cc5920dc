//! Core error types for routinely-core.
//!
//! Errors fall into two classes. Input errors (bad times, empty task lists,
//! nothing extractable) are expected and recoverable by the caller. Invariant
//! violations come from the validator and mean the scheduler itself produced
//! an inconsistent routine; callers must not persist or display it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for routinely-core.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A wake/sleep string is not a strict 24-hour `HH:MM`
    #[error("Invalid time format: '{value}' (expected HH:MM, 24-hour)")]
    InvalidTimeFormat { value: String },

    /// Wake and sleep times are identical
    #[error("Degenerate window: wake and sleep are both {time}")]
    DegenerateWindow { time: String },

    /// The window handed to the packer has no room at all
    #[error("Empty window: [{start}, {end}) has no schedulable minutes")]
    EmptyWindow { start: u32, end: u32 },

    /// The packer was given nothing to place
    #[error("No tasks to schedule")]
    NoTasks,

    /// Natural-language extraction returned an empty task list
    #[error("No tasks could be extracted from the supplied text")]
    NoExtractableTasks,

    /// A task request breaks its own constraints
    #[error("Invalid task #{index}: {reason}")]
    InvalidTask { index: usize, reason: String },

    /// Edit or completion targeted a segment that does not exist
    #[error("Segment not found: {0}")]
    SegmentNotFound(String),

    /// The text-extraction collaborator failed
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// The validator rejected generated or edited segments
    #[error("Invariant violation: {0}")]
    InvariantViolation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    /// True for the defect class: the routine must be refused, not repaired.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ScheduleError::InvariantViolation(_))
    }

    /// True for errors caused by caller input (re-prompt or fall back).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidTimeFormat { .. }
                | ScheduleError::DegenerateWindow { .. }
                | ScheduleError::EmptyWindow { .. }
                | ScheduleError::NoTasks
                | ScheduleError::NoExtractableTasks
                | ScheduleError::InvalidTask { .. }
                | ScheduleError::SegmentNotFound(_)
        )
    }
}

/// Post-condition failures reported by the routine validator.
///
/// Indices refer to positions in the checked segment slice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("segment {index} starts at {start}, not after previous start {previous_start}")]
    NotSorted {
        index: usize,
        start: u32,
        previous_start: u32,
    },

    #[error("segment {index} starts at {start} before previous segment ends at {previous_end}")]
    Overlap {
        index: usize,
        start: u32,
        previous_end: u32,
    },

    #[error("segment {index} [{start}, {end}) lies outside window [{window_start}, {window_end}]")]
    OutsideWindow {
        index: usize,
        start: u32,
        end: u32,
        window_start: u32,
        window_end: u32,
    },

    #[error("segment {index} claims {claimed} minutes but spans {actual}")]
    DurationMismatch {
        index: usize,
        claimed: u32,
        actual: i64,
    },

    #[error("segments total {total} minutes, window only has {available}")]
    ExceedsWindow { total: u64, available: u32 },
}

/// Failures of the text-extraction collaborator.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No extractor is wired into the engine
    #[error("no text extractor configured")]
    NotConfigured,

    /// The service could not be reached or refused the request
    #[error("extraction service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something that is not a task list
    #[error("malformed extraction response: {0}")]
    Malformed(String),

    /// The call did not finish within the configured budget
    #[error("extraction timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExtractionError::Malformed(err.to_string())
        } else {
            ExtractionError::Unavailable(err.to_string())
        }
    }
}

/// Result type alias for ScheduleError
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
