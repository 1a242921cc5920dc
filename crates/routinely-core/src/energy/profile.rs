//! Energy levels, points and the step-function profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;
use crate::window::{format_minute, parse_hhmm, DayWindow, MINUTES_PER_DAY};

/// Coarse self-reported productivity level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low energy (e.g., post-lunch dip)
    Low,
    /// Medium energy (default)
    #[default]
    Medium,
    /// High energy (e.g., morning)
    High,
}

impl EnergyLevel {
    fn bar_width(&self) -> usize {
        match self {
            EnergyLevel::Low => 6,
            EnergyLevel::Medium => 14,
            EnergyLevel::High => 24,
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyLevel::Low => write!(f, "low"),
            EnergyLevel::Medium => write!(f, "medium"),
            EnergyLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" => Ok(EnergyLevel::Low),
            "medium" | "med" | "m" => Ok(EnergyLevel::Medium),
            "high" | "h" => Ok(EnergyLevel::High),
            other => Err(format!("unknown energy level: '{other}' (use low/medium/high)")),
        }
    }
}

/// A point where the energy level changes.
///
/// Serialized as `"HH:MM=level"`, e.g. `"09:00=high"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EnergyPoint {
    /// Minute of day (0-1439)
    pub minute_of_day: u32,
    pub level: EnergyLevel,
}

impl EnergyPoint {
    pub fn new(minute_of_day: u32, level: EnergyLevel) -> Self {
        Self {
            minute_of_day: minute_of_day % MINUTES_PER_DAY,
            level,
        }
    }
}

impl fmt::Display for EnergyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", format_minute(self.minute_of_day), self.level)
    }
}

impl FromStr for EnergyPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (time, level) = s
            .split_once('=')
            .ok_or_else(|| format!("invalid energy point '{s}' (expected HH:MM=level)"))?;
        let minute = parse_hhmm(time.trim()).map_err(|e: ScheduleError| e.to_string())?;
        Ok(Self::new(minute, level.parse()?))
    }
}

impl TryFrom<String> for EnergyPoint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EnergyPoint> for String {
    fn from(point: EnergyPoint) -> Self {
        point.to_string()
    }
}

/// Sparse step function from time of day to energy level.
///
/// Points are kept sorted and unique per minute. An empty profile is Medium
/// everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EnergyPoint>", into = "Vec<EnergyPoint>")]
pub struct EnergyProfile {
    points: Vec<EnergyPoint>,
}

impl EnergyProfile {
    /// Build a profile, sorting points; a later point for the same minute
    /// replaces an earlier one.
    pub fn new(points: impl IntoIterator<Item = EnergyPoint>) -> Self {
        let mut sorted: Vec<EnergyPoint> = Vec::new();
        for point in points {
            match sorted.binary_search_by_key(&point.minute_of_day, |p| p.minute_of_day) {
                Ok(pos) => sorted[pos] = point,
                Err(pos) => sorted.insert(pos, point),
            }
        }
        Self { points: sorted }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[EnergyPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Energy level at an unwrapped minute.
    ///
    /// Minutes on the second stacked day fold back onto the time of day.
    pub fn level_at(&self, minute: u32) -> EnergyLevel {
        let minute_of_day = minute % MINUTES_PER_DAY;
        let idx = self
            .points
            .partition_point(|p| p.minute_of_day <= minute_of_day);
        if idx == 0 {
            EnergyLevel::Medium
        } else {
            self.points[idx - 1].level
        }
    }

    /// Render the profile across a window as an ASCII chart, one row per
    /// `step_minutes`.
    pub fn render_ascii_chart(&self, window: &DayWindow, step_minutes: u32) -> String {
        let step = step_minutes.max(1);
        let mut output = format!("\nEnergy profile {}:\n", window.label());
        output.push_str(&"─".repeat(40));
        output.push('\n');

        let mut minute = window.start_minute;
        while minute < window.end_minute {
            let level = self.level_at(minute);
            let bar = "█".repeat(level.bar_width());
            let empty = " ".repeat(24 - level.bar_width());
            output.push_str(&format!("{} {}{} {}\n", format_minute(minute), bar, empty, level));
            minute += step;
        }

        output.push_str(&"─".repeat(40));
        output.push('\n');
        if self.is_empty() {
            output.push_str("No energy points set; medium assumed all day.\n");
        }
        output
    }
}

impl From<Vec<EnergyPoint>> for EnergyProfile {
    fn from(points: Vec<EnergyPoint>) -> Self {
        Self::new(points)
    }
}

impl From<EnergyProfile> for Vec<EnergyPoint> {
    fn from(profile: EnergyProfile) -> Self {
        profile.points
    }
}
