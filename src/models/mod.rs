pub mod config;
pub mod output_plan;

pub use config::{DehazeConfig, ParamOverrides};
pub use output_plan::OutputPlan;
