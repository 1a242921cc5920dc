//! Adaptation notes: human-readable records of heuristic decisions.
//!
//! The rendered text of each variant is what ends up in
//! `DailyRoutine::adaptations`, so wording changes are API changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::energy::EnergyLevel;
use crate::task::Priority;
use crate::window::format_minute;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adaptation {
    /// A task did not fit in the remaining room and was skipped.
    Dropped {
        purpose: String,
        duration_minutes: u32,
        remaining_minutes: u32,
    },
    /// Automatic ordering moved a task (positions are 1-based).
    Reordered {
        purpose: String,
        from: usize,
        to: usize,
        priority: Priority,
        matches_focus: bool,
    },
    /// A high-cognitive task was pulled forward into a high-energy slot.
    EnergyPlacement { purpose: String, at_minute: u32 },
    /// A high-energy slot was open but the waiting high-cognitive task did
    /// not fit in the remaining room.
    EnergyPreferenceOverridden {
        purpose: String,
        at_minute: u32,
        remaining_minutes: u32,
    },
    /// A recovery break was planned after a long focus run.
    RecoveryBreakInserted {
        after: String,
        break_minutes: u32,
        focus_minutes: u32,
    },
    /// Free text produced this many tasks.
    TasksExtracted { count: usize },
    /// No goal-derived tasks were available; the built-in set was used.
    DefaultTaskSet { count: usize },
    /// The energy hint changed the default task set.
    EnergyHintApplied { hint: EnergyLevel },
}

impl fmt::Display for Adaptation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adaptation::Dropped {
                purpose,
                duration_minutes,
                remaining_minutes,
            } => write!(
                f,
                "Dropped \"{purpose}\" ({duration_minutes} min): only {remaining_minutes} min left in the day"
            ),
            Adaptation::Reordered {
                purpose,
                from,
                to,
                priority,
                matches_focus,
            } => {
                let reason = if *matches_focus {
                    format!("matches {priority} focus")
                } else {
                    format!("{priority} priority")
                };
                write!(f, "Moved \"{purpose}\" from position {from} to {to} ({reason})")
            }
            Adaptation::EnergyPlacement { purpose, at_minute } => write!(
                f,
                "Placed \"{purpose}\" at {} to use high energy",
                format_minute(*at_minute)
            ),
            Adaptation::EnergyPreferenceOverridden {
                purpose,
                at_minute,
                remaining_minutes,
            } => write!(
                f,
                "High energy at {} but \"{purpose}\" does not fit in the remaining {remaining_minutes} min",
                format_minute(*at_minute)
            ),
            Adaptation::RecoveryBreakInserted {
                after,
                break_minutes,
                focus_minutes,
            } => write!(
                f,
                "Inserted a {break_minutes} min break after \"{after}\" ({focus_minutes} min of focused work)"
            ),
            Adaptation::TasksExtracted { count } => {
                write!(f, "Extracted {count} task(s) from free text")
            }
            Adaptation::DefaultTaskSet { count } => {
                write!(f, "No goals available; using the default set of {count} task(s)")
            }
            Adaptation::EnergyHintApplied { hint } => {
                write!(f, "Shortened focus blocks for a {hint}-energy day")
            }
        }
    }
}

/// Render notes into the strings stored on a routine.
pub fn render(notes: &[Adaptation]) -> Vec<String> {
    notes.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_message() {
        let note = Adaptation::Dropped {
            purpose: "Deep work".into(),
            duration_minutes: 120,
            remaining_minutes: 90,
        };
        assert_eq!(
            note.to_string(),
            "Dropped \"Deep work\" (120 min): only 90 min left in the day"
        );
    }

    #[test]
    fn reorder_message_names_the_reason() {
        let focus = Adaptation::Reordered {
            purpose: "Report".into(),
            from: 3,
            to: 1,
            priority: Priority::High,
            matches_focus: true,
        };
        assert_eq!(
            focus.to_string(),
            "Moved \"Report\" from position 3 to 1 (matches high focus)"
        );

        let plain = Adaptation::Reordered {
            purpose: "Email".into(),
            from: 1,
            to: 2,
            priority: Priority::Low,
            matches_focus: false,
        };
        assert_eq!(plain.to_string(), "Moved \"Email\" from position 1 to 2 (low priority)");
    }

    #[test]
    fn time_based_messages_wrap_past_midnight() {
        let note = Adaptation::EnergyPlacement {
            purpose: "Study".into(),
            at_minute: 1440 + 30,
        };
        assert_eq!(note.to_string(), "Placed \"Study\" at 00:30 to use high energy");
    }

    #[test]
    fn recovery_break_message_names_the_preceding_task() {
        let note = Adaptation::RecoveryBreakInserted {
            after: "Thesis".into(),
            break_minutes: 15,
            focus_minutes: 120,
        };
        assert_eq!(
            note.to_string(),
            "Inserted a 15 min break after \"Thesis\" (120 min of focused work)"
        );
    }
}
