pub mod completions;
pub mod config;
pub mod energy;
pub mod plan;
pub mod routine;
