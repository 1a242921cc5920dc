//! Energy profile lookup.
//!
//! A user's energy pattern is a sparse step function over the day: each
//! point sets the level from its minute until the next point.

mod profile;

pub use profile::{EnergyLevel, EnergyPoint, EnergyProfile};
