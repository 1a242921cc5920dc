//! Automatic mode: select, sort and hand tasks to the energy-aware packer.

use super::{AutomaticRequest, ModeAdapter, ModePlan, Placement};
use crate::adaptation::Adaptation;
use crate::collaborators::PlanningContext;
use crate::energy::EnergyLevel;
use crate::error::Result;
use crate::scheduler::{RecoveryBreak, RECOVERY_BREAK_LABEL};
use crate::task::{ActivityType, Priority, TaskRequest};
use crate::window::DayWindow;

#[derive(Debug)]
pub struct AutomaticAdapter {
    request: AutomaticRequest,
    candidates: Vec<TaskRequest>,
    lead_notes: Vec<Adaptation>,
    recovery: Option<RecoveryBreak>,
}

impl AutomaticAdapter {
    /// Adapter with no candidates; the default task set will be used.
    pub fn new(request: AutomaticRequest) -> Self {
        Self {
            request,
            candidates: Vec::new(),
            lead_notes: Vec::new(),
            recovery: None,
        }
    }

    /// Use goal-derived (or extracted) candidates instead of the defaults.
    pub fn with_candidates(mut self, candidates: Vec<TaskRequest>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Plan explicit breaks after long focus runs, where the day has room.
    pub fn with_recovery(mut self, recovery: Option<RecoveryBreak>) -> Self {
        self.recovery = recovery;
        self
    }

    /// Notes recorded before this adapter ran (e.g. extraction).
    pub fn with_note(mut self, note: Adaptation) -> Self {
        self.lead_notes.push(note);
        self
    }
}

impl ModeAdapter for AutomaticAdapter {
    fn plan(&self, ctx: &PlanningContext) -> Result<ModePlan> {
        let window = DayWindow::resolve(&ctx.profile.wake_time, &ctx.profile.sleep_time)?;
        let mut notes = self.lead_notes.clone();

        let tasks = if self.candidates.is_empty() {
            let defaults = default_task_set(self.request.energy_hint);
            notes.push(Adaptation::DefaultTaskSet {
                count: defaults.len(),
            });
            if self.request.energy_hint == Some(EnergyLevel::Low) {
                notes.push(Adaptation::EnergyHintApplied {
                    hint: EnergyLevel::Low,
                });
            }
            defaults
        } else {
            self.candidates.clone()
        };

        let mut tasks = sort_by_priority(tasks, self.request.priority_focus, &mut notes);
        if let Some(rule) = self.recovery {
            tasks = plan_recovery_breaks(tasks, rule, window.width(), &mut notes);
        }

        Ok(ModePlan {
            tasks,
            notes,
            placement: Placement::EnergyAware,
            priority_focus: self.request.priority_focus,
        })
    }
}

/// Stable sort: focus matches first, then Critical > High > Medium > Low.
///
/// Every task that moves ahead of its input position gets a note.
fn sort_by_priority(
    tasks: Vec<TaskRequest>,
    focus: Option<Priority>,
    notes: &mut Vec<Adaptation>,
) -> Vec<TaskRequest> {
    let mut indexed: Vec<(usize, TaskRequest)> = tasks.into_iter().enumerate().collect();
    indexed.sort_by_key(|(_, t)| (focus != Some(t.priority), t.priority));

    for (to, (from, task)) in indexed.iter().enumerate() {
        if to < *from {
            notes.push(Adaptation::Reordered {
                purpose: task.purpose.clone(),
                from: from + 1,
                to: to + 1,
                priority: task.priority,
                matches_focus: focus == Some(task.priority),
            });
        }
    }

    indexed.into_iter().map(|(_, t)| t).collect()
}

/// Insert `Break` requests after long high-cognitive runs.
///
/// Breaks only use slack: the window minus every requested minute. A break
/// never takes room a requested task needs, and none follows the last task.
fn plan_recovery_breaks(
    tasks: Vec<TaskRequest>,
    rule: RecoveryBreak,
    window_minutes: u32,
    notes: &mut Vec<Adaptation>,
) -> Vec<TaskRequest> {
    let requested: u64 = tasks.iter().map(|t| u64::from(t.duration_minutes)).sum();
    let mut slack = u64::from(window_minutes).saturating_sub(requested);
    let count = tasks.len();
    let mut planned = Vec::with_capacity(count);
    let mut focus_run = 0u32;

    for (index, task) in tasks.into_iter().enumerate() {
        if task.activity_type().is_high_cognitive() {
            focus_run = focus_run.saturating_add(task.duration_minutes);
        } else {
            focus_run = 0;
        }
        let after = task.purpose.clone();
        planned.push(task);

        let break_minutes = u64::from(rule.break_minutes);
        if focus_run > 0
            && focus_run >= rule.focus_before_break_minutes
            && index + 1 < count
            && break_minutes <= slack
        {
            slack -= break_minutes;
            notes.push(Adaptation::RecoveryBreakInserted {
                after,
                break_minutes: rule.break_minutes,
                focus_minutes: focus_run,
            });
            planned.push(
                TaskRequest::new(RECOVERY_BREAK_LABEL, rule.break_minutes)
                    .with_type(ActivityType::Break),
            );
            focus_run = 0;
        }
    }

    planned
}

/// The built-in day used when no goals are available.
///
/// A low-energy hint trims high-cognitive blocks to two thirds.
pub fn default_task_set(energy_hint: Option<EnergyLevel>) -> Vec<TaskRequest> {
    let base = [
        ("Deep work", 90, Priority::High, ActivityType::DeepWork),
        ("Study session", 60, Priority::High, ActivityType::Study),
        ("Skill practice", 45, Priority::Medium, ActivityType::SkillPractice),
        ("Lunch", 45, Priority::Medium, ActivityType::Personal),
        ("Exercise", 30, Priority::Medium, ActivityType::Personal),
        ("Admin and email", 30, Priority::Low, ActivityType::Other),
        ("Reading", 30, Priority::Low, ActivityType::Study),
        ("Plan tomorrow", 15, Priority::Low, ActivityType::Other),
    ];

    let low = energy_hint == Some(EnergyLevel::Low);
    base.iter()
        .map(|&(purpose, minutes, priority, kind)| {
            let minutes = if low && kind.is_high_cognitive() {
                minutes * 2 / 3
            } else {
                minutes
            };
            TaskRequest::new(purpose, minutes)
                .with_priority(priority)
                .with_type(kind)
        })
        .collect()
}
