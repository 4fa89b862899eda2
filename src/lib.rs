pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::GreenhouseConfig;
pub use crate::core::{greenhouse::Greenhouse, monitor::MonitorEngine, section::Section};
pub use crate::domain::model::{Alert, AlertAction, Bounds, SectionId, Sensor, ThresholdTable};
pub use crate::utils::error::{GreenhouseError, Result};
