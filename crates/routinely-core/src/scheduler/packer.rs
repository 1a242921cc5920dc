//! The segment packer: turns ordered task requests into contiguous slots.

use std::collections::HashSet;

use crate::adaptation::Adaptation;
use crate::energy::{EnergyLevel, EnergyProfile};
use crate::error::{Result, ScheduleError};
use crate::routine::{DailyRoutine, RoutineSegment};
use crate::task::{ActivityType, Priority, TaskRequest};
use crate::window::DayWindow;

/// Energy-aware placement settings.
#[derive(Debug, Clone, Copy)]
pub struct EnergyAwarePolicy<'a> {
    pub profile: &'a EnergyProfile,
    pub probe_minutes: u32,
    /// Focus level the tasks were sorted by; part of the priority class
    pub priority_focus: Option<Priority>,
}

impl EnergyAwarePolicy<'_> {
    /// Snap `cursor` down to the probe grid anchored at the window start.
    fn probe_at(&self, window: &DayWindow, cursor: u32) -> u32 {
        let step = self.probe_minutes.max(1);
        window.start_minute + (cursor - window.start_minute) / step * step
    }

    /// Sort class: focus match first, then priority.
    fn class_of(&self, task: &TaskRequest) -> (bool, Priority) {
        (self.priority_focus != Some(task.priority), task.priority)
    }

    /// Number of leading pending tasks energy placement may choose from:
    /// those sharing the head's class, up to the next explicit break.
    fn same_class_len(&self, pending: &[(usize, &TaskRequest)]) -> usize {
        let Some((_, head)) = pending.first() else {
            return 0;
        };
        let class = self.class_of(head);
        pending
            .iter()
            .take_while(|(_, t)| {
                self.class_of(t) == class && t.activity_type() != ActivityType::Break
            })
            .count()
    }
}

/// How the packer chooses the next task to place.
#[derive(Debug, Clone, Copy)]
pub enum PlacementPolicy<'a> {
    /// Caller order, untouched.
    Sequential,
    /// Within the head's priority class, prefer DeepWork/Study whenever the
    /// probe lands on high energy.
    EnergyAware(EnergyAwarePolicy<'a>),
}

/// Result of one packing run.
#[derive(Debug, Clone, Default)]
pub struct PackOutcome {
    pub segments: Vec<RoutineSegment>,
    pub notes: Vec<Adaptation>,
    /// Requests skipped because they no longer fit
    pub dropped: Vec<TaskRequest>,
}

/// Lays out segments for one routine.
pub struct SegmentPacker {
    routine_id: String,
}

impl SegmentPacker {
    /// Create a packer whose segment ids derive from `routine_id`.
    pub fn new(routine_id: impl Into<String>) -> Self {
        Self {
            routine_id: routine_id.into(),
        }
    }

    /// Pack `tasks` strictly in the given order.
    ///
    /// # Errors
    ///
    /// `EmptyWindow`, `NoTasks`, or `InvalidTask` for a malformed request.
    pub fn pack(&self, window: &DayWindow, tasks: &[TaskRequest]) -> Result<PackOutcome> {
        self.pack_with(window, tasks, PlacementPolicy::Sequential)
    }

    /// Pack `tasks` under a placement policy.
    ///
    /// A task that would run past the window end is dropped with a note and
    /// packing continues at the same cursor. No gaps are inserted.
    ///
    /// # Errors
    ///
    /// `EmptyWindow`, `NoTasks`, or `InvalidTask` for a malformed request.
    pub fn pack_with(
        &self,
        window: &DayWindow,
        tasks: &[TaskRequest],
        policy: PlacementPolicy<'_>,
    ) -> Result<PackOutcome> {
        if window.is_empty() {
            return Err(ScheduleError::EmptyWindow {
                start: window.start_minute,
                end: window.end_minute,
            });
        }
        if tasks.is_empty() {
            return Err(ScheduleError::NoTasks);
        }
        for (index, task) in tasks.iter().enumerate() {
            task.validate(index)?;
        }

        let mut pending: Vec<(usize, &TaskRequest)> = tasks.iter().enumerate().collect();
        let mut overridden: HashSet<usize> = HashSet::new();
        let mut outcome = PackOutcome::default();
        let mut cursor = window.start_minute;

        while !pending.is_empty() {
            let remaining = window.end_minute - cursor;
            let mut pick = 0;

            if let PlacementPolicy::EnergyAware(energy) = policy {
                let probe = energy.probe_at(window, cursor);
                if energy.profile.level_at(probe) == EnergyLevel::High {
                    let candidates = &pending[..energy.same_class_len(&pending)];
                    let fitting = candidates.iter().position(|(_, t)| {
                        t.activity_type().is_high_cognitive() && t.duration_minutes <= remaining
                    });
                    match fitting {
                        Some(idx) => {
                            if idx != 0 {
                                tracing::debug!(
                                    purpose = %candidates[idx].1.purpose,
                                    cursor,
                                    "pulling high-cognitive task into high-energy slot"
                                );
                                outcome.notes.push(Adaptation::EnergyPlacement {
                                    purpose: candidates[idx].1.purpose.clone(),
                                    at_minute: cursor,
                                });
                            }
                            pick = idx;
                        }
                        None => {
                            let waiting = candidates
                                .iter()
                                .find(|(_, t)| t.activity_type().is_high_cognitive());
                            if let Some((orig, task)) = waiting {
                                if overridden.insert(*orig) {
                                    outcome.notes.push(Adaptation::EnergyPreferenceOverridden {
                                        purpose: task.purpose.clone(),
                                        at_minute: cursor,
                                        remaining_minutes: remaining,
                                    });
                                }
                            }
                        }
                    }
                }
            }

            let (_, task) = pending.remove(pick);
            if task.duration_minutes > remaining {
                tracing::debug!(
                    purpose = %task.purpose,
                    duration = task.duration_minutes,
                    remaining,
                    "dropping task that does not fit"
                );
                outcome.notes.push(Adaptation::Dropped {
                    purpose: task.purpose.clone(),
                    duration_minutes: task.duration_minutes,
                    remaining_minutes: remaining,
                });
                outcome.dropped.push(task.clone());
                continue;
            }

            let id = DailyRoutine::segment_id(&self.routine_id, outcome.segments.len());
            let segment = RoutineSegment::from_task(id, task, cursor);
            cursor = segment.end_minute;
            outcome.segments.push(segment);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyPoint;

    fn packer() -> SegmentPacker {
        SegmentPacker::new("test-routine")
    }

    fn spans(outcome: &PackOutcome) -> Vec<(String, u32, u32)> {
        outcome
            .segments
            .iter()
            .map(|s| (s.activity.clone(), s.start_minute, s.end_minute))
            .collect()
    }

    #[test]
    fn packs_back_to_back_from_window_start() {
        let window = DayWindow::resolve("07:00", "23:00").unwrap();
        let tasks = vec![
            TaskRequest::new("Study", 60),
            TaskRequest::new("Break", 15),
            TaskRequest::new("Workout", 45),
        ];
        let outcome = packer().pack(&window, &tasks).unwrap();

        assert_eq!(
            spans(&outcome),
            vec![
                ("Study".to_string(), 420, 480),
                ("Break".to_string(), 480, 495),
                ("Workout".to_string(), 495, 540),
            ]
        );
        assert!(outcome.segments.iter().all(|s| !s.completed));
        assert!(outcome.notes.is_empty());
        assert_eq!(outcome.segments[1].activity_type, ActivityType::Break);
    }

    #[test]
    fn oversized_task_is_skipped_and_packing_continues() {
        let window = DayWindow::from_minutes(600, 690);
        let tasks = vec![TaskRequest::new("Marathon", 120), TaskRequest::new("Stretch", 30)];
        let outcome = packer().pack(&window, &tasks).unwrap();

        assert_eq!(spans(&outcome), vec![("Stretch".to_string(), 600, 630)]);
        assert_eq!(outcome.dropped, vec![TaskRequest::new("Marathon", 120)]);
        assert_eq!(
            outcome.notes[0].to_string(),
            "Dropped \"Marathon\" (120 min): only 90 min left in the day"
        );
    }

    #[test]
    fn task_ending_exactly_at_window_end_fits() {
        let window = DayWindow::from_minutes(0, 60);
        let outcome = packer()
            .pack(&window, &[TaskRequest::new("A", 30), TaskRequest::new("B", 30)])
            .unwrap();
        assert_eq!(outcome.segments.len(), 2);
        assert_eq!(outcome.segments[1].end_minute, 60);
    }

    #[test]
    fn copies_type_and_priority_from_request() {
        let window = DayWindow::from_minutes(0, 120);
        let task = TaskRequest::new("Write report", 30)
            .with_priority(Priority::Critical)
            .with_type(ActivityType::DeepWork);
        let outcome = packer().pack(&window, &[task]).unwrap();
        assert_eq!(outcome.segments[0].priority, Priority::Critical);
        assert_eq!(outcome.segments[0].activity_type, ActivityType::DeepWork);
        assert_eq!(outcome.segments[0].duration_minutes, 30);
    }

    #[test]
    fn rejects_empty_window_and_empty_task_list() {
        let tasks = vec![TaskRequest::new("Study", 30)];
        let err = packer().pack(&DayWindow::from_minutes(500, 500), &tasks).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptyWindow { start: 500, end: 500 }));

        let err = packer().pack(&DayWindow::from_minutes(0, 60), &[]).unwrap_err();
        assert!(matches!(err, ScheduleError::NoTasks));
    }

    #[test]
    fn rejects_invalid_requests_before_packing() {
        let tasks = vec![TaskRequest::new("Study", 30), TaskRequest::new("", 10)];
        let err = packer().pack(&DayWindow::from_minutes(0, 60), &tasks).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTask { index: 1, .. }));
    }

    #[test]
    fn segment_ids_are_stable_across_runs() {
        let window = DayWindow::from_minutes(0, 120);
        let tasks = vec![TaskRequest::new("A", 30), TaskRequest::new("B", 30)];
        let first = packer().pack(&window, &tasks).unwrap();
        let second = packer().pack(&window, &tasks).unwrap();
        assert_eq!(first.segments, second.segments);
        assert_ne!(first.segments[0].id, first.segments[1].id);
    }

    #[test]
    fn energy_aware_pulls_study_into_high_energy_slot() {
        let window = DayWindow::resolve("07:00", "13:00").unwrap();
        let profile = EnergyProfile::new([EnergyPoint::new(8 * 60, EnergyLevel::High)]);
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: None,
        });
        let tasks = vec![
            TaskRequest::new("Email", 60).with_type(ActivityType::Other),
            TaskRequest::new("Exercise", 60),
            TaskRequest::new("Admin", 60).with_type(ActivityType::Other),
            TaskRequest::new("Study", 60),
        ];

        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(
            spans(&outcome),
            vec![
                ("Email".to_string(), 420, 480),
                ("Study".to_string(), 480, 540),
                ("Exercise".to_string(), 540, 600),
                ("Admin".to_string(), 600, 660),
            ]
        );
        assert_eq!(
            outcome.notes.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["Placed \"Study\" at 08:00 to use high energy".to_string()]
        );
    }

    #[test]
    fn energy_is_read_on_the_grid_not_the_exact_cursor() {
        // High starts at 07:45; a cursor at 07:50 reads 07:30 (medium).
        let window = DayWindow::resolve("07:00", "10:00").unwrap();
        let profile = EnergyProfile::new([EnergyPoint::new(465, EnergyLevel::High)]);
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: None,
        });
        let tasks = vec![
            TaskRequest::new("Email", 50).with_type(ActivityType::Other),
            TaskRequest::new("Admin", 10).with_type(ActivityType::Other),
            TaskRequest::new("Study", 30),
        ];
        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(outcome.segments[1].activity, "Admin");
        assert_eq!(outcome.segments[2].activity, "Study");
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn energy_preference_overridden_when_focus_task_does_not_fit() {
        let window = DayWindow::from_minutes(420, 540);
        let profile = EnergyProfile::new([EnergyPoint::new(420, EnergyLevel::High)]);
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: None,
        });
        let tasks = vec![
            TaskRequest::new("Email", 30).with_type(ActivityType::Other),
            TaskRequest::new("Deep dive", 150).with_type(ActivityType::DeepWork),
        ];

        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(spans(&outcome), vec![("Email".to_string(), 420, 450)]);
        assert_eq!(
            outcome.notes.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "High energy at 07:00 but \"Deep dive\" does not fit in the remaining 120 min"
                    .to_string(),
                "Dropped \"Deep dive\" (150 min): only 90 min left in the day".to_string(),
            ]
        );
    }

    #[test]
    fn energy_never_lifts_a_task_over_higher_priority() {
        let window = DayWindow::resolve("08:00", "12:00").unwrap();
        let profile = EnergyProfile::new([EnergyPoint::new(8 * 60, EnergyLevel::High)]);
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: None,
        });
        let tasks = vec![
            TaskRequest::new("Launch", 60)
                .with_priority(Priority::Critical)
                .with_type(ActivityType::Other),
            TaskRequest::new("Reading", 60)
                .with_priority(Priority::Low)
                .with_type(ActivityType::Study),
        ];

        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(
            spans(&outcome),
            vec![
                ("Launch".to_string(), 480, 540),
                ("Reading".to_string(), 540, 600),
            ]
        );
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn focus_match_is_its_own_class() {
        let window = DayWindow::resolve("08:00", "12:00").unwrap();
        let profile = EnergyProfile::new([EnergyPoint::new(8 * 60, EnergyLevel::High)]);
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: Some(Priority::Low),
        });
        let tasks = vec![
            TaskRequest::new("Groceries", 30)
                .with_priority(Priority::Low)
                .with_type(ActivityType::Other),
            TaskRequest::new("Study", 60)
                .with_priority(Priority::Critical)
                .with_type(ActivityType::Study),
        ];

        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(outcome.segments[0].activity, "Groceries");
        assert_eq!(outcome.segments[1].activity, "Study");
    }

    #[test]
    fn energy_placement_does_not_cross_an_explicit_break() {
        let window = DayWindow::resolve("08:00", "12:00").unwrap();
        let profile = EnergyProfile::new([EnergyPoint::new(8 * 60, EnergyLevel::High)]);
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: None,
        });
        let tasks = vec![
            TaskRequest::new("Email", 30).with_type(ActivityType::Other),
            TaskRequest::new("Rest", 15).with_type(ActivityType::Break),
            TaskRequest::new("Study", 60).with_type(ActivityType::Study),
        ];

        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(
            spans(&outcome),
            vec![
                ("Email".to_string(), 480, 510),
                ("Rest".to_string(), 510, 525),
                ("Study".to_string(), 525, 585),
            ]
        );
    }

    #[test]
    fn packer_adds_no_segments_of_its_own() {
        let window = DayWindow::resolve("08:00", "10:15").unwrap();
        let profile = EnergyProfile::empty();
        let policy = PlacementPolicy::EnergyAware(EnergyAwarePolicy {
            profile: &profile,
            probe_minutes: 30,
            priority_focus: None,
        });
        let tasks = vec![
            TaskRequest::new("Thesis", 120)
                .with_priority(Priority::Critical)
                .with_type(ActivityType::DeepWork),
            TaskRequest::new("Email", 15)
                .with_priority(Priority::Low)
                .with_type(ActivityType::Other),
        ];

        let outcome = packer().pack_with(&window, &tasks, policy).unwrap();
        assert_eq!(
            spans(&outcome),
            vec![
                ("Thesis".to_string(), 480, 600),
                ("Email".to_string(), 600, 615),
            ]
        );
        assert!(outcome.dropped.is_empty());
    }
}
