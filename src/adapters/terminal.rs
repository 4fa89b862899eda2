use crate::core::greenhouse::SectionAlerts;
use crate::core::monitor::TickReport;
use crate::core::section::Section;
use crate::domain::model::Alert;
use crate::domain::ports::AlertSink;
use std::io::Write;

pub fn render_section(section: &Section) -> String {
    let mut out = format!("{} ({})", section.name(), section.crop_type());
    for (sensor, value) in section.snapshot().iter() {
        out.push_str(&format!("\n  {}: {:.1}", sensor.label(), value));
    }
    out
}

pub fn render_alert(section: &str, alert: &Alert) -> String {
    format!(
        "{} - {}: {} [{}]",
        section, alert.title, alert.message, alert.suggested_action
    )
}

/// Prints monitoring passes, but only when the set of active alerts changes;
/// an unchanged alert is not repeated every second.
pub struct TerminalSink<W: Write> {
    out: W,
    last: Option<Vec<SectionAlerts>>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(&mut self, report: &TickReport) -> std::io::Result<()> {
        if report.alert_count() == 0 {
            writeln!(self.out, "[{}] All sections within thresholds", report.clock())?;
        } else {
            writeln!(self.out, "[{}] {} active alerts", report.clock(), report.alert_count())?;
            for entry in &report.sections {
                for alert in &entry.alerts {
                    writeln!(self.out, "  {}", render_alert(&entry.section, alert))?;
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> AlertSink for TerminalSink<W> {
    fn deliver(&mut self, report: &TickReport) {
        if self.last.as_ref() == Some(&report.sections) {
            return;
        }
        // the first all-clear pass is not worth printing
        let quiet_start = self.last.is_none() && report.alert_count() == 0;
        self.last = Some(report.sections.clone());
        if quiet_start {
            return;
        }

        if let Err(e) = self.write_report(report) {
            tracing::warn!("Failed to write monitoring report: {}", e);
        }
    }
}
