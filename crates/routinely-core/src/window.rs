//! Awake window resolution.
//!
//! Wake and sleep times are turned into a linear minute range over two
//! stacked days (0..2880), so a sleep time after midnight still sorts after
//! the wake time.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// The awake period available for scheduling, in unwrapped minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// First schedulable minute (minute of the wake day)
    pub start_minute: u32,
    /// One past the last schedulable minute; may exceed 1440
    pub end_minute: u32,
}

impl DayWindow {
    /// Resolve `HH:MM` wake and sleep times into a window.
    ///
    /// A sleep time at or before the wake time is read as the following day.
    ///
    /// # Errors
    ///
    /// `InvalidTimeFormat` for malformed times, `DegenerateWindow` when both
    /// times are equal.
    pub fn resolve(wake_time: &str, sleep_time: &str) -> Result<Self> {
        let wake = parse_hhmm(wake_time)?;
        let sleep = parse_hhmm(sleep_time)?;

        if wake == sleep {
            return Err(ScheduleError::DegenerateWindow {
                time: wake_time.to_string(),
            });
        }

        let end = if sleep < wake {
            sleep + MINUTES_PER_DAY
        } else {
            sleep
        };

        Ok(Self {
            start_minute: wake,
            end_minute: end,
        })
    }

    /// Build a window from raw minutes.
    ///
    /// The start is clamped into the first day and the end to at most one
    /// day after the start, so the result stays inside `0..2880`. The window
    /// may still be empty; the packer rejects those.
    pub fn from_minutes(start_minute: u32, end_minute: u32) -> Self {
        let start_minute = start_minute.min(MINUTES_PER_DAY - 1);
        Self {
            start_minute,
            end_minute: end_minute.min(start_minute + MINUTES_PER_DAY),
        }
    }

    /// Schedulable minutes, zero when the window is empty or inverted.
    pub fn width(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    pub fn is_empty(&self) -> bool {
        self.end_minute <= self.start_minute
    }

    /// Whether `[start, end)` lies inside the window.
    pub fn contains_range(&self, start: u32, end: u32) -> bool {
        self.start_minute <= start && end <= self.end_minute
    }

    /// Display label such as `07:00-23:00` or `23:00-06:00`.
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            format_minute(self.start_minute),
            format_minute(self.end_minute)
        )
    }
}

/// Parse a strict 24-hour `HH:MM` string into a minute of day.
///
/// # Errors
///
/// Returns `InvalidTimeFormat` unless the input is exactly two digits, a
/// colon and two digits, with hour <= 23 and minute <= 59.
pub fn parse_hhmm(value: &str) -> Result<u32> {
    let invalid = || ScheduleError::InvalidTimeFormat {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    if !bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let hour: u32 = value[..2].parse().map_err(|_| invalid())?;
    let minute: u32 = value[3..].parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(hour * 60 + minute)
}

/// Render an unwrapped minute as `HH:MM` on a 24-hour clock.
pub fn format_minute(minute: u32) -> String {
    let wrapped = minute % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}
