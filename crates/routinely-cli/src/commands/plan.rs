use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use routinely_core::collaborators::PlanningContext;
use routinely_core::{
    AutomaticRequest, Config, EnergyLevel, FileRoutineStore, HttpTaskExtractor, Priority,
    RoutineEngine, RoutineStore, StaticTaskSource, TaskRequest,
};

use super::routine::{print_routine, today};

#[derive(Args)]
pub struct PlanOptions {
    /// Day to plan (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Print the routine without saving it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Pack tasks in the order given
    Manual {
        /// Tasks as "purpose:minutes[:priority[:type]]"
        #[arg(required = true)]
        tasks: Vec<TaskRequest>,
        #[command(flatten)]
        options: PlanOptions,
    },
    /// Pick and order tasks from configured goals (or the default set)
    Auto {
        /// Put tasks of this priority first
        #[arg(long)]
        focus: Option<Priority>,
        /// Expected energy for the day
        #[arg(long)]
        energy: Option<EnergyLevel>,
        #[command(flatten)]
        options: PlanOptions,
    },
    /// Extract tasks from free text via the configured service
    Text {
        /// Description of the day
        text: String,
        /// Put tasks of this priority first
        #[arg(long)]
        focus: Option<Priority>,
        #[command(flatten)]
        options: PlanOptions,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = RoutineEngine::with_config(config.scheduler.clone())
        .with_task_source(Arc::new(StaticTaskSource::new(config.goals.clone())));

    let (routine, options) = match action {
        PlanAction::Manual { tasks, options } => {
            let ctx = context(&config, options.date);
            (engine.generate_manual(&ctx, tasks)?, options)
        }
        PlanAction::Auto {
            focus,
            energy,
            options,
        } => {
            let ctx = context(&config, options.date);
            let request = AutomaticRequest {
                priority_focus: focus,
                energy_hint: energy,
            };
            (engine.generate_automatic(&ctx, request)?, options)
        }
        PlanAction::Text {
            text,
            focus,
            options,
        } => {
            if let Some(endpoint) = &config.extractor.endpoint {
                tracing::debug!(%endpoint, "using HTTP task extractor");
                let mut extractor = HttpTaskExtractor::new(endpoint)?;
                if let Some(key) = config
                    .extractor
                    .api_key_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
                {
                    extractor = extractor.with_api_key(key);
                }
                engine = engine.with_extractor(Arc::new(extractor));
            }

            let ctx = context(&config, options.date);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let routine = runtime.block_on(engine.generate_from_text(&ctx, &text, focus))?;
            (routine, options)
        }
    };

    if !options.dry_run {
        FileRoutineStore::open()?.save(&routine)?;
    }
    print_routine(&routine, options.json)
}

fn context(config: &Config, date: Option<NaiveDate>) -> PlanningContext {
    PlanningContext::new(
        config.user_id.clone(),
        date.unwrap_or_else(today),
        config.profile.clone(),
    )
}
