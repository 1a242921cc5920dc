//! Boundaries to the systems the engine does not own.
//!
//! The engine reads a profile snapshot, may ask a task source for goal
//! derived candidates, may ask a text extractor to turn free text into task
//! requests, and hands finished routines to a store. Every collaborator is
//! `Send + Sync` so independent generations can run in parallel.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::energy::EnergyProfile;
use crate::error::{ExtractionError, Result};
use crate::routine::DailyRoutine;
use crate::task::TaskRequest;

/// Snapshot of the profile fields the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Wake time, `HH:MM`
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    /// Sleep time, `HH:MM` (may be after midnight)
    #[serde(default = "default_sleep_time")]
    pub sleep_time: String,
    #[serde(default)]
    pub energy: EnergyProfile,
}

fn default_wake_time() -> String {
    "07:00".into()
}
fn default_sleep_time() -> String {
    "23:00".into()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            sleep_time: default_sleep_time(),
            energy: EnergyProfile::default(),
        }
    }
}

/// Everything a generation call needs besides the request itself.
///
/// The date is explicit so generation never reads the clock.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    pub user_id: String,
    pub date: NaiveDate,
    pub profile: UserProfile,
}

impl PlanningContext {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, profile: UserProfile) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            profile,
        }
    }
}

/// Supplies goal-derived candidate tasks for automatic mode.
pub trait TaskSource: Send + Sync {
    fn candidate_tasks(&self, ctx: &PlanningContext) -> Result<Vec<TaskRequest>>;
}

/// A task source backed by a fixed list (e.g. goals from config).
#[derive(Debug, Clone, Default)]
pub struct StaticTaskSource {
    tasks: Vec<TaskRequest>,
}

impl StaticTaskSource {
    pub fn new(tasks: Vec<TaskRequest>) -> Self {
        Self { tasks }
    }
}

impl TaskSource for StaticTaskSource {
    fn candidate_tasks(&self, _ctx: &PlanningContext) -> Result<Vec<TaskRequest>> {
        Ok(self.tasks.clone())
    }
}

/// Turns free text into task requests. Implementations make at most one
/// outbound call and never retry.
#[async_trait]
pub trait TaskExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<TaskRequest>, ExtractionError>;
}

/// Persists generated routines.
pub trait RoutineStore: Send + Sync {
    fn save(&self, routine: &DailyRoutine) -> Result<()>;

    fn load(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyRoutine>>;
}
