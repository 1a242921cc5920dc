//! Manual mode: the user lays out their own day.

use super::{ModeAdapter, ModePlan, Placement};
use crate::collaborators::PlanningContext;
use crate::error::Result;
use crate::task::TaskRequest;

pub struct ManualAdapter {
    tasks: Vec<TaskRequest>,
}

impl ManualAdapter {
    pub fn new(tasks: Vec<TaskRequest>) -> Self {
        Self { tasks }
    }
}

impl ModeAdapter for ManualAdapter {
    fn plan(&self, _ctx: &PlanningContext) -> Result<ModePlan> {
        Ok(ModePlan {
            tasks: self.tasks.clone(),
            notes: Vec::new(),
            placement: Placement::Sequential,
            priority_focus: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::UserProfile;
    use chrono::NaiveDate;

    #[test]
    fn keeps_caller_order() {
        let tasks = vec![
            TaskRequest::new("Low thing", 10).with_priority(crate::task::Priority::Low),
            TaskRequest::new("Urgent", 10).with_priority(crate::task::Priority::Critical),
        ];
        let ctx = PlanningContext::new(
            "u",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            UserProfile::default(),
        );
        let plan = ManualAdapter::new(tasks.clone()).plan(&ctx).unwrap();
        assert_eq!(plan.tasks, tasks);
        assert_eq!(plan.placement, Placement::Sequential);
        assert!(plan.notes.is_empty());
    }
}
