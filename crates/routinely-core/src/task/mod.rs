//! Task requests fed to the scheduler.
//!
//! A `TaskRequest` is one desired activity: what it is for, how long it
//! takes, how important it is and what kind of work it is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// Nominal importance of a task.
///
/// Ordering follows importance: `Critical < High < Medium < Low`, so an
/// ascending sort puts the most important first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Critical => write!(f, "critical"),
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" | "c" => Ok(Priority::Critical),
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            other => Err(format!(
                "unknown priority: '{other}' (use critical/high/medium/low)"
            )),
        }
    }
}

/// Kind of activity, used for energy-aware placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    DeepWork,
    Study,
    SkillPractice,
    Break,
    Personal,
    Other,
}

impl ActivityType {
    /// DeepWork and Study want the user's high-energy hours.
    pub fn is_high_cognitive(&self) -> bool {
        matches!(self, ActivityType::DeepWork | ActivityType::Study)
    }

    /// Guess the activity type from a free-form purpose.
    pub fn infer(purpose: &str) -> Self {
        const RULES: &[(&[&str], ActivityType)] = &[
            (&["break", "rest", "nap", "pause"], ActivityType::Break),
            (&["study", "read", "learn", "review", "course"], ActivityType::Study),
            (
                &["deep work", "focus", "write", "code", "coding", "design", "research"],
                ActivityType::DeepWork,
            ),
            (
                &["practice", "piano", "guitar", "drill", "language"],
                ActivityType::SkillPractice,
            ),
            (
                &["workout", "exercise", "gym", "run", "walk", "lunch", "dinner", "breakfast", "meal", "family"],
                ActivityType::Personal,
            ),
        ];

        let lower = purpose.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(_, kind)| *kind)
            .unwrap_or(ActivityType::Other)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityType::DeepWork => "deep_work",
            ActivityType::Study => "study",
            ActivityType::SkillPractice => "skill_practice",
            ActivityType::Break => "break",
            ActivityType::Personal => "personal",
            ActivityType::Other => "other",
        };
        f.write_str(label)
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "deep_work" | "deepwork" => Ok(ActivityType::DeepWork),
            "study" => Ok(ActivityType::Study),
            "skill_practice" | "skill" => Ok(ActivityType::SkillPractice),
            "break" => Ok(ActivityType::Break),
            "personal" => Ok(ActivityType::Personal),
            "other" => Ok(ActivityType::Other),
            other => Err(format!("unknown activity type: '{other}'")),
        }
    }
}

/// One activity the user wants in their day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub purpose: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub priority: Priority,
    /// Explicit type; inferred from `purpose` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<ActivityType>,
}

impl TaskRequest {
    /// Create a Medium-priority request with an inferred activity type.
    pub fn new(purpose: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            purpose: purpose.into(),
            duration_minutes,
            priority: Priority::default(),
            type_hint: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_type(mut self, activity_type: ActivityType) -> Self {
        self.type_hint = Some(activity_type);
        self
    }

    /// The explicit hint, or the type inferred from the purpose.
    pub fn activity_type(&self) -> ActivityType {
        self.type_hint
            .unwrap_or_else(|| ActivityType::infer(&self.purpose))
    }

    /// Check the request's own constraints. `index` is used for reporting.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTask` for a blank purpose or a zero duration.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.purpose.trim().is_empty() {
            return Err(ScheduleError::InvalidTask {
                index,
                reason: "purpose must not be empty".to_string(),
            });
        }
        if self.duration_minutes == 0 {
            return Err(ScheduleError::InvalidTask {
                index,
                reason: format!("'{}' has a zero duration", self.purpose),
            });
        }
        Ok(())
    }
}

/// Parses the CLI shorthand `purpose:minutes[:priority[:type]]`.
impl FromStr for TaskRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(format!(
                "invalid task '{s}' (expected purpose:minutes[:priority[:type]])"
            ));
        }

        let minutes: u32 = parts[1]
            .parse()
            .map_err(|_| format!("invalid duration '{}' in task '{s}'", parts[1]))?;
        let mut task = TaskRequest::new(parts[0], minutes);
        if let Some(priority) = parts.get(2) {
            task = task.with_priority(priority.parse()?);
        }
        if let Some(kind) = parts.get(3) {
            task = task.with_type(kind.parse()?);
        }
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_most_important_first() {
        let mut priorities = vec![Priority::Low, Priority::Critical, Priority::Medium, Priority::High];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::Critical, Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn infers_activity_types_from_purpose() {
        assert_eq!(ActivityType::infer("Study"), ActivityType::Study);
        assert_eq!(ActivityType::infer("Coffee break"), ActivityType::Break);
        assert_eq!(ActivityType::infer("Workout"), ActivityType::Personal);
        assert_eq!(ActivityType::infer("Write chapter 3"), ActivityType::DeepWork);
        assert_eq!(ActivityType::infer("Piano"), ActivityType::SkillPractice);
        assert_eq!(ActivityType::infer("Groceries"), ActivityType::Other);
    }

    #[test]
    fn explicit_hint_wins_over_inference() {
        let task = TaskRequest::new("Read emails", 20).with_type(ActivityType::Other);
        assert_eq!(task.activity_type(), ActivityType::Other);
        assert_eq!(TaskRequest::new("Read papers", 20).activity_type(), ActivityType::Study);
    }

    #[test]
    fn validate_rejects_blank_purpose_and_zero_duration() {
        assert!(TaskRequest::new("Study", 30).validate(0).is_ok());

        let err = TaskRequest::new("  ", 30).validate(2).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTask { index: 2, .. }));

        let err = TaskRequest::new("Study", 0).validate(0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid task #0: 'Study' has a zero duration");
    }

    #[test]
    fn parses_cli_shorthand() {
        let task: TaskRequest = "Study:60".parse().unwrap();
        assert_eq!(task, TaskRequest::new("Study", 60));

        let task: TaskRequest = "Report:90:critical:deep_work".parse().unwrap();
        assert_eq!(task.priority, Priority::Critical);
        assert_eq!(task.activity_type(), ActivityType::DeepWork);

        assert!("Study".parse::<TaskRequest>().is_err());
        assert!("Study:sixty".parse::<TaskRequest>().is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let task: TaskRequest =
            serde_json::from_str(r#"{"purpose":"Workout","duration_minutes":45}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.type_hint, None);
        assert_eq!(task.activity_type(), ActivityType::Personal);
    }
}
