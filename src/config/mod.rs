#[cfg(feature = "cli")]
pub mod cli;
pub mod greenhouse_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use greenhouse_config::{GreenhouseConfig, MonitoringConfig, SectionConfig};
