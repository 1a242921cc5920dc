//! Mode adapters: build the ordered task list the packer lays out.
//!
//! - **Manual**: the caller's list, untouched
//! - **Automatic**: goal-derived or default tasks, priority-sorted, with
//!   optional explicit recovery breaks, packed with energy-aware placement
//! - **Natural-language**: extracted tasks, then automatic

mod automatic;
mod manual;
mod natural;

pub use automatic::{default_task_set, AutomaticAdapter};
pub use manual::ManualAdapter;
pub use natural::NaturalLanguageAdapter;

use serde::{Deserialize, Serialize};

use crate::adaptation::Adaptation;
use crate::collaborators::PlanningContext;
use crate::energy::EnergyLevel;
use crate::error::Result;
use crate::task::{Priority, TaskRequest};

/// One routine generation request, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GenerationRequest {
    /// Tasks in the exact order the user laid them out.
    Manual { tasks: Vec<TaskRequest> },
    /// Let the engine pick and order tasks.
    Automatic(AutomaticRequest),
    /// Free text handed to the extractor, then treated as automatic.
    NaturalLanguage {
        text: String,
        #[serde(default)]
        priority_focus: Option<Priority>,
    },
}

/// Parameters for automatic mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticRequest {
    /// Tasks of exactly this priority sort first
    #[serde(default)]
    pub priority_focus: Option<Priority>,
    /// How the user feels today; shapes the default task set
    #[serde(default)]
    pub energy_hint: Option<EnergyLevel>,
}

/// How the packer should choose placement order for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Sequential,
    EnergyAware,
}

/// An adapter's output: the ordered tasks plus the decisions taken.
#[derive(Debug, Clone)]
pub struct ModePlan {
    pub tasks: Vec<TaskRequest>,
    pub notes: Vec<Adaptation>,
    pub placement: Placement,
    /// Focus the tasks were sorted by, if any
    pub priority_focus: Option<Priority>,
}

/// A synchronous mode strategy.
pub trait ModeAdapter {
    fn plan(&self, ctx: &PlanningContext) -> Result<ModePlan>;
}
