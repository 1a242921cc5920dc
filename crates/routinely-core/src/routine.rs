//! Generated routines and their segments.
//!
//! A `DailyRoutine` is immutable output of generation. The only mutations are
//! the narrow follow-up operations here: marking a segment completed, and
//! applying an edit to a copy that is re-validated before it is returned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ScheduleError};
use crate::task::{ActivityType, Priority, TaskRequest};
use crate::validator;
use crate::window::{format_minute, DayWindow};

/// One scheduled activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineSegment {
    pub id: String,
    /// Unwrapped start minute (may exceed 1440)
    pub start_minute: u32,
    /// Unwrapped end minute, exclusive
    pub end_minute: u32,
    pub activity_type: ActivityType,
    pub activity: String,
    pub duration_minutes: u32,
    pub priority: Priority,
    pub completed: bool,
}

impl RoutineSegment {
    /// Build a segment for `task` starting at `start_minute`.
    pub fn from_task(id: String, task: &TaskRequest, start_minute: u32) -> Self {
        Self {
            id,
            start_minute,
            end_minute: start_minute + task.duration_minutes,
            activity_type: task.activity_type(),
            activity: task.purpose.clone(),
            duration_minutes: task.duration_minutes,
            priority: task.priority,
            completed: false,
        }
    }

    /// Start as `HH:MM`.
    pub fn start_label(&self) -> String {
        format_minute(self.start_minute)
    }

    /// End as `HH:MM`, wrapped past midnight (`24:30` renders as `00:30`).
    pub fn end_label(&self) -> String {
        format_minute(self.end_minute)
    }

    pub fn overlaps(&self, other: &RoutineSegment) -> bool {
        self.start_minute < other.end_minute && self.end_minute > other.start_minute
    }
}

/// A narrow edit applied to a generated routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RoutineEdit {
    /// Move a segment; its duration follows the new bounds.
    Retime {
        segment_id: String,
        start_minute: u32,
        end_minute: u32,
    },
    Rename { segment_id: String, activity: String },
    Remove { segment_id: String },
}

impl RoutineEdit {
    fn segment_id(&self) -> &str {
        match self {
            RoutineEdit::Retime { segment_id, .. }
            | RoutineEdit::Rename { segment_id, .. }
            | RoutineEdit::Remove { segment_id } => segment_id,
        }
    }
}

/// The schedule for one user and one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoutine {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    /// The awake window the routine was generated for
    pub window: DayWindow,
    pub segments: Vec<RoutineSegment>,
    /// Heuristic decisions taken during generation
    pub adaptations: Vec<String>,
    pub completed: bool,
}

impl DailyRoutine {
    /// Deterministic routine id for a user and date.
    pub fn routine_id(user_id: &str, date: NaiveDate) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("routine:{user_id}:{date}").as_bytes())
            .to_string()
    }

    /// Deterministic segment id for a position within a routine.
    pub fn segment_id(routine_id: &str, index: usize) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{routine_id}:segment:{index}").as_bytes())
            .to_string()
    }

    pub fn total_scheduled_minutes(&self) -> u32 {
        self.segments.iter().map(|s| s.duration_minutes).sum()
    }

    /// Fraction of segments marked completed (0.0 for an empty routine).
    pub fn completion_ratio(&self) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        let done = self.segments.iter().filter(|s| s.completed).count();
        done as f64 / self.segments.len() as f64
    }

    pub fn segment(&self, segment_id: &str) -> Option<&RoutineSegment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }

    /// Mark one segment completed; the routine completes with its last
    /// segment.
    ///
    /// # Errors
    ///
    /// `SegmentNotFound` for an unknown id.
    pub fn mark_segment_completed(&mut self, segment_id: &str) -> Result<()> {
        let segment = self
            .segments
            .iter_mut()
            .find(|s| s.id == segment_id)
            .ok_or_else(|| ScheduleError::SegmentNotFound(segment_id.to_string()))?;
        segment.completed = true;
        self.completed = self.segments.iter().all(|s| s.completed);
        Ok(())
    }

    /// Apply an edit to a copy and re-validate it against the routine window.
    ///
    /// The original routine is never touched; on failure the caller keeps
    /// it as is.
    ///
    /// # Errors
    ///
    /// `SegmentNotFound`, `InvalidTask` for a blank rename or a retime with
    /// no duration, or
    /// `InvariantViolation` when the edited schedule breaks the routine
    /// invariants.
    pub fn apply_edit(&self, edit: &RoutineEdit) -> Result<DailyRoutine> {
        let mut edited = self.clone();
        let index = edited
            .segments
            .iter()
            .position(|s| s.id == edit.segment_id())
            .ok_or_else(|| ScheduleError::SegmentNotFound(edit.segment_id().to_string()))?;

        match edit {
            RoutineEdit::Retime {
                start_minute,
                end_minute,
                ..
            } => {
                if end_minute <= start_minute {
                    return Err(ScheduleError::InvalidTask {
                        index,
                        reason: format!(
                            "retime to [{start_minute}, {end_minute}) leaves no duration"
                        ),
                    });
                }
                let segment = &mut edited.segments[index];
                segment.start_minute = *start_minute;
                segment.end_minute = *end_minute;
                segment.duration_minutes = end_minute - start_minute;
                edited.segments.sort_by_key(|s| s.start_minute);
            }
            RoutineEdit::Rename { activity, .. } => {
                if activity.trim().is_empty() {
                    return Err(ScheduleError::InvalidTask {
                        index,
                        reason: "activity must not be empty".to_string(),
                    });
                }
                edited.segments[index].activity = activity.clone();
            }
            RoutineEdit::Remove { .. } => {
                edited.segments.remove(index);
            }
        }

        validator::validate(&edited.window, &edited.segments)?;
        edited.completed = !edited.segments.is_empty() && edited.segments.iter().all(|s| s.completed);
        Ok(edited)
    }
}
