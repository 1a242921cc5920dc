//! Routine engine: the single entry point for generating a day.
//!
//! A request goes through its mode adapter, the packer lays the tasks out
//! inside the resolved window, the validator checks the result, and a
//! `DailyRoutine` comes back. The engine holds no mutable state, so one
//! instance can serve any number of concurrent generations.

use std::sync::Arc;
use std::time::Duration;

use crate::adaptation;
use crate::collaborators::{PlanningContext, TaskExtractor, TaskSource};
use crate::error::{ExtractionError, Result};
use crate::modes::{
    AutomaticAdapter, AutomaticRequest, GenerationRequest, ManualAdapter, ModeAdapter,
    NaturalLanguageAdapter, Placement,
};
use crate::routine::DailyRoutine;
use crate::scheduler::{EnergyAwarePolicy, PlacementPolicy, SchedulerConfig, SegmentPacker};
use crate::task::{Priority, TaskRequest};
use crate::validator;
use crate::window::DayWindow;

#[derive(Default)]
pub struct RoutineEngine {
    config: SchedulerConfig,
    task_source: Option<Arc<dyn TaskSource>>,
    extractor: Option<Arc<dyn TaskExtractor>>,
}

impl RoutineEngine {
    /// Create an engine with default config and no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Goal/task source consulted by automatic mode.
    pub fn with_task_source(mut self, source: Arc<dyn TaskSource>) -> Self {
        self.task_source = Some(source);
        self
    }

    /// Text extractor used by natural-language mode.
    pub fn with_extractor(mut self, extractor: Arc<dyn TaskExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Generate a routine for any request mode.
    ///
    /// Only natural-language requests suspend (on the extractor).
    pub async fn generate(
        &self,
        ctx: &PlanningContext,
        request: GenerationRequest,
    ) -> Result<DailyRoutine> {
        match request {
            GenerationRequest::Manual { tasks } => self.generate_manual(ctx, tasks),
            GenerationRequest::Automatic(request) => self.generate_automatic(ctx, request),
            GenerationRequest::NaturalLanguage {
                text,
                priority_focus,
            } => self.generate_from_text(ctx, &text, priority_focus).await,
        }
    }

    /// Pack `tasks` in the given order from the wake time.
    pub fn generate_manual(
        &self,
        ctx: &PlanningContext,
        tasks: Vec<TaskRequest>,
    ) -> Result<DailyRoutine> {
        self.run(ctx, &ManualAdapter::new(tasks))
    }

    /// Pick, sort and energy-place tasks from the task source (or defaults).
    pub fn generate_automatic(
        &self,
        ctx: &PlanningContext,
        request: AutomaticRequest,
    ) -> Result<DailyRoutine> {
        let candidates = match &self.task_source {
            Some(source) => source.candidate_tasks(ctx)?,
            None => Vec::new(),
        };
        let adapter = AutomaticAdapter::new(request)
            .with_candidates(candidates)
            .with_recovery(self.config.recovery_break());
        self.run(ctx, &adapter)
    }

    /// Extract tasks from `text`, then behave like automatic mode.
    pub async fn generate_from_text(
        &self,
        ctx: &PlanningContext,
        text: &str,
        priority_focus: Option<Priority>,
    ) -> Result<DailyRoutine> {
        let extractor = self
            .extractor
            .as_deref()
            .ok_or(ExtractionError::NotConfigured)?;
        let timeout = Duration::from_secs(self.config.extraction_timeout_secs);
        let automatic = NaturalLanguageAdapter::new(extractor, timeout)
            .resolve(text, priority_focus)
            .await?
            .with_recovery(self.config.recovery_break());
        self.run(ctx, &automatic)
    }

    fn run(&self, ctx: &PlanningContext, adapter: &dyn ModeAdapter) -> Result<DailyRoutine> {
        let window = DayWindow::resolve(&ctx.profile.wake_time, &ctx.profile.sleep_time)?;
        let plan = adapter.plan(ctx)?;

        let routine_id = DailyRoutine::routine_id(&ctx.user_id, ctx.date);
        let policy = match plan.placement {
            Placement::Sequential => PlacementPolicy::Sequential,
            Placement::EnergyAware => PlacementPolicy::EnergyAware(EnergyAwarePolicy {
                profile: &ctx.profile.energy,
                probe_minutes: self.config.probe_minutes,
                priority_focus: plan.priority_focus,
            }),
        };
        let outcome = SegmentPacker::new(routine_id.clone()).pack_with(&window, &plan.tasks, policy)?;

        if let Err(violation) = validator::validate(&window, &outcome.segments) {
            tracing::error!(
                user_id = %ctx.user_id,
                date = %ctx.date,
                error = %violation,
                "generated routine failed validation"
            );
            return Err(violation.into());
        }

        let mut notes = plan.notes;
        notes.extend(outcome.notes);

        let routine = DailyRoutine {
            id: routine_id,
            user_id: ctx.user_id.clone(),
            date: ctx.date,
            window,
            segments: outcome.segments,
            adaptations: adaptation::render(&notes),
            completed: false,
        };

        tracing::info!(
            user_id = %routine.user_id,
            date = %routine.date,
            segments = routine.segments.len(),
            dropped = outcome.dropped.len(),
            "routine generated"
        );
        Ok(routine)
    }
}
