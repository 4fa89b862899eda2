use crate::core::greenhouse::{Greenhouse, SectionAlerts};
use crate::domain::ports::AlertSink;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Outcome of one passive monitoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub sequence: u64,
    pub at: DateTime<Local>,
    pub sections: Vec<SectionAlerts>,
}

impl TickReport {
    pub fn clock(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn alert_count(&self) -> usize {
        self.sections.iter().map(|s| s.alerts.len()).sum()
    }
}

/// Re-evaluates every section on a fixed period without touching readings.
pub struct MonitorEngine {
    tick_interval: Duration,
    ticks: u64,
}

impl MonitorEngine {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            ticks: 0,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Timer for an external event loop; late ticks are skipped, not bunched.
    pub fn interval(&self) -> Interval {
        let mut timer = interval(self.tick_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        timer
    }

    pub fn tick<S: AlertSink + ?Sized>(&mut self, greenhouse: &Greenhouse, sink: &mut S) -> TickReport {
        self.ticks += 1;
        let report = TickReport {
            sequence: self.ticks,
            at: Local::now(),
            sections: greenhouse.evaluate_all(),
        };

        let alerts = report.alert_count();
        if alerts > 0 {
            tracing::warn!("Tick {}: {} active alerts", report.sequence, alerts);
        } else {
            tracing::debug!("Tick {}: all sections within thresholds", report.sequence);
        }

        sink.deliver(&report);
        report
    }

    /// Drives `count` ticks on the engine's own timer.
    pub async fn run_ticks<S: AlertSink + ?Sized>(
        &mut self,
        greenhouse: &Greenhouse,
        sink: &mut S,
        count: u64,
    ) {
        let mut timer = self.interval();
        for _ in 0..count {
            timer.tick().await;
            self.tick(greenhouse, sink);
        }
    }
}

impl Default for MonitorEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::Section;
    use crate::domain::model::{Bounds, SectionId};

    fn greenhouse() -> Greenhouse {
        let thresholds = [
            ("temperature", Bounds::new(18.0, 28.0)),
            ("moisture", Bounds::new(60.0, 80.0)),
        ]
        .into_iter()
        .collect();
        Greenhouse::new(vec![Section::new("Section 1", "Cucumber", thresholds).unwrap()])
    }

    #[test]
    fn test_tick_does_not_mutate() {
        let mut gh = greenhouse();
        gh.update_sensor(SectionId(0), "moisture", 20.0).unwrap();
        let before = gh.section(SectionId(0)).unwrap().snapshot();

        let mut engine = MonitorEngine::default();
        let mut sink: Vec<TickReport> = Vec::new();
        let first = engine.tick(&gh, &mut sink);
        let second = engine.tick(&gh, &mut sink);

        assert_eq!(gh.section(SectionId(0)).unwrap().snapshot(), before);
        assert_eq!(first.sections, second.sections);
        assert_eq!(first.alert_count(), 1);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].sequence, 2);
    }

    #[test]
    fn test_clock_format() {
        let mut engine = MonitorEngine::default();
        let report = engine.tick(&greenhouse(), &mut Vec::<TickReport>::new());
        let clock = report.clock();
        assert_eq!(clock.len(), "2024-01-01 00:00:00".len());
        assert_eq!(&clock[4..5], "-");
        assert_eq!(&clock[13..14], ":");
    }

    #[tokio::test]
    async fn test_run_ticks_delivers_each_pass() {
        let gh = greenhouse();
        let mut engine = MonitorEngine::new(Duration::from_millis(5));
        let mut sink: Vec<TickReport> = Vec::new();

        engine.run_ticks(&gh, &mut sink, 3).await;

        assert_eq!(engine.ticks(), 3);
        let sequences: Vec<_> = sink.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }
}
