//! Segment packing for daily routines.
//!
//! This module lays task requests out inside an awake window:
//! - Places tasks back to back from the wake time, skipping any that no
//!   longer fit and continuing with the rest
//! - Optionally prefers high-cognitive work when the energy profile is high,
//!   among tasks of the same priority class
//!
//! The packer never adds segments of its own. Breaks reach it as explicit
//! `Break` requests from the mode adapters.

mod packer;

pub use packer::{EnergyAwarePolicy, PackOutcome, PlacementPolicy, SegmentPacker};

use serde::{Deserialize, Serialize};

/// Label used for planned recovery breaks.
pub const RECOVERY_BREAK_LABEL: &str = "Recovery break";

/// Plan a break once this much high-cognitive work runs back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryBreak {
    pub focus_before_break_minutes: u32,
    pub break_minutes: u32,
}

/// Scheduler tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Energy probe grid size (minutes)
    #[serde(default = "default_probe_minutes")]
    pub probe_minutes: u32,
    /// Focus minutes that trigger a recovery break (0, the default, disables breaks)
    #[serde(default = "default_focus_before_break")]
    pub focus_before_break_minutes: u32,
    /// Recovery break length (minutes)
    #[serde(default = "default_recovery_break")]
    pub recovery_break_minutes: u32,
    /// Budget for one text-extraction call (seconds)
    #[serde(default = "default_extraction_timeout")]
    pub extraction_timeout_secs: u64,
}

fn default_probe_minutes() -> u32 {
    30
}
fn default_focus_before_break() -> u32 {
    0
}
fn default_recovery_break() -> u32 {
    15
}
fn default_extraction_timeout() -> u64 {
    30
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            probe_minutes: default_probe_minutes(),
            focus_before_break_minutes: default_focus_before_break(),
            recovery_break_minutes: default_recovery_break(),
            extraction_timeout_secs: default_extraction_timeout(),
        }
    }
}

impl SchedulerConfig {
    /// The recovery-break rule, if enabled.
    pub fn recovery_break(&self) -> Option<RecoveryBreak> {
        if self.focus_before_break_minutes == 0 || self.recovery_break_minutes == 0 {
            return None;
        }
        Some(RecoveryBreak {
            focus_before_break_minutes: self.focus_before_break_minutes,
            break_minutes: self.recovery_break_minutes,
        })
    }
}
