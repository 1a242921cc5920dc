//! # Routinely Core Library
//!
//! This library builds a single day's routine: an ordered, non-overlapping
//! list of timed activities that fits between a user's wake and sleep times.
//! Everything is reachable through the `routinely` CLI binary, which is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Window**: wake/sleep times resolved into an unwrapped minute range,
//!   so days crossing midnight need no special casing downstream
//! - **Energy**: step-function lookup over a user's energy points
//! - **Scheduler**: the segment packer (sequential or energy-aware)
//! - **Modes**: manual, automatic and natural-language adapters that all
//!   reduce to a packer input
//! - **Validator**: the final ordering/overlap/containment check
//! - **Storage**: TOML configuration and JSON routine files
//!
//! ## Key Components
//!
//! - [`RoutineEngine`]: Entry point for generating a routine
//! - [`DailyRoutine`]: The generated day
//! - [`SegmentPacker`]: Placement of tasks into the window
//! - [`Config`]: Application configuration management

pub mod adaptation;
pub mod collaborators;
pub mod energy;
pub mod engine;
pub mod error;
pub mod extract;
pub mod modes;
pub mod routine;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod validator;
pub mod window;

pub use adaptation::Adaptation;
pub use collaborators::{
    PlanningContext, RoutineStore, StaticTaskSource, TaskExtractor, TaskSource, UserProfile,
};
pub use energy::{EnergyLevel, EnergyPoint, EnergyProfile};
pub use engine::RoutineEngine;
pub use error::{ConfigError, ExtractionError, ScheduleError, ValidationError};
pub use extract::HttpTaskExtractor;
pub use modes::{AutomaticRequest, GenerationRequest};
pub use routine::{DailyRoutine, RoutineEdit, RoutineSegment};
pub use scheduler::{PackOutcome, SchedulerConfig, SegmentPacker};
pub use storage::{Config, FileRoutineStore};
pub use task::{ActivityType, Priority, TaskRequest};
pub use window::DayWindow;
