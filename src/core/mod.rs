pub mod evaluator;
pub mod greenhouse;
pub mod monitor;
pub mod section;

pub use crate::domain::model::{Alert, AlertAction, Bounds, SectionId, Sensor, SensorReadings, ThresholdTable};
pub use crate::domain::ports::{AlertSink, SectionSpec, ThresholdProvider};
pub use crate::utils::error::Result;
