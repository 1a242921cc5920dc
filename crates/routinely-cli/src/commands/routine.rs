use chrono::{Local, NaiveDate};
use clap::Subcommand;
use routinely_core::{Config, DailyRoutine, FileRoutineStore, RoutineStore};

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Show the saved routine for a day
    Show {
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a segment completed
    Complete {
        /// Segment number (as listed by `routine show`) or segment id
        segment: String,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: RoutineAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = FileRoutineStore::open()?;

    match action {
        RoutineAction::Show { date, json } => {
            let date = date.unwrap_or_else(today);
            let routine = store
                .load(&config.user_id, date)?
                .ok_or_else(|| format!("no routine saved for {date}"))?;
            print_routine(&routine, json)?;
        }
        RoutineAction::Complete { segment, date } => {
            let date = date.unwrap_or_else(today);
            let mut routine = store
                .load(&config.user_id, date)?
                .ok_or_else(|| format!("no routine saved for {date}"))?;

            let segment_id = match segment.parse::<usize>() {
                Ok(n) if (1..=routine.segments.len()).contains(&n) => {
                    routine.segments[n - 1].id.clone()
                }
                _ => segment,
            };
            routine.mark_segment_completed(&segment_id)?;
            store.save(&routine)?;

            if let Some(done) = routine.segment(&segment_id) {
                println!(
                    "Completed: {} ({}-{})",
                    done.activity,
                    done.start_label(),
                    done.end_label()
                );
            }
            if routine.completed {
                println!("Routine complete for {date}");
            }
        }
    }
    Ok(())
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn print_routine(
    routine: &DailyRoutine,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(routine)?);
        return Ok(());
    }

    println!("Routine for {} ({})", routine.date, routine.window.label());
    println!("{}", "─".repeat(64));
    for (i, segment) in routine.segments.iter().enumerate() {
        let mark = if segment.completed { "x" } else { " " };
        println!(
            "{:>2}. [{mark}] {}-{}  {:<26} {:<14} {}",
            i + 1,
            segment.start_label(),
            segment.end_label(),
            segment.activity,
            segment.activity_type.to_string(),
            segment.priority
        );
    }
    println!("{}", "─".repeat(64));
    println!(
        "Scheduled {} of {} min, {:.0}% done",
        routine.total_scheduled_minutes(),
        routine.window.width(),
        routine.completion_ratio() * 100.0
    );

    if !routine.adaptations.is_empty() {
        println!("\nAdjustments:");
        for note in &routine.adaptations {
            println!("  - {note}");
        }
    }
    Ok(())
}
