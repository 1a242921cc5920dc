//! Energy profile display and editing.

use clap::Subcommand;
use routinely_core::energy::EnergyPoint;
use routinely_core::{Config, DayWindow, EnergyProfile};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Chart the energy profile across the waking window
    Show {
        /// Rows every N minutes
        #[arg(long, default_value_t = 30)]
        step: u32,
    },
    /// Replace the energy profile
    Set {
        /// Points as "HH:MM=level" (low, medium, high)
        points: Vec<EnergyPoint>,
        /// Remove all points
        #[arg(long, conflicts_with = "points")]
        clear: bool,
    },
}

pub fn run(action: EnergyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EnergyAction::Show { step } => {
            let config = Config::load()?;
            let window = DayWindow::resolve(&config.profile.wake_time, &config.profile.sleep_time)?;
            print!("{}", config.profile.energy.render_ascii_chart(&window, step));
        }
        EnergyAction::Set { points, clear } => {
            if points.is_empty() && !clear {
                return Err("give at least one point, or --clear".into());
            }
            let mut config = Config::load()?;
            config.profile.energy = EnergyProfile::new(points);
            config.save()?;
            println!("energy profile updated ({} point(s))", config.profile.energy.points().len());
        }
    }
    Ok(())
}
