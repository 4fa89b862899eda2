use crate::domain::model::ThresholdTable;
use crate::core::monitor::TickReport;

/// A section to create at start-up: display name plus the crop it grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    pub name: String,
    pub crop_type: String,
}

pub trait ThresholdProvider {
    fn thresholds_for(&self, crop_type: &str) -> Option<&ThresholdTable>;
    fn section_layout(&self) -> Vec<SectionSpec>;
}

/// Receives the result of each passive monitoring pass.
pub trait AlertSink {
    fn deliver(&mut self, report: &TickReport);
}

impl AlertSink for Vec<TickReport> {
    fn deliver(&mut self, report: &TickReport) {
        self.push(report.clone());
    }
}
