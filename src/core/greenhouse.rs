use crate::core::section::Section;
use crate::domain::model::{Alert, AlertAction, SectionId, Sensor};
use crate::domain::ports::ThresholdProvider;
use crate::utils::error::{GreenhouseError, Result};
use serde::Serialize;

/// Alerts raised by one section during an evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAlerts {
    pub section: String,
    pub alerts: Vec<Alert>,
}

/// All sections of the panel, addressed by [`SectionId`].
#[derive(Debug, Clone, Default)]
pub struct Greenhouse {
    sections: Vec<Section>,
}

impl Greenhouse {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Builds every configured section, failing on the first crop or sensor
    /// the provider has no thresholds for.
    pub fn from_config<P: ThresholdProvider + ?Sized>(provider: &P) -> Result<Self> {
        let sections = provider
            .section_layout()
            .into_iter()
            .map(|spec| {
                let thresholds = provider.thresholds_for(&spec.crop_type).ok_or_else(|| {
                    GreenhouseError::MissingConfiguration {
                        crop_type: spec.crop_type.clone(),
                        sensor: None,
                    }
                })?;
                Section::new(spec.name, spec.crop_type, thresholds.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Greenhouse ready with {} sections", sections.len());
        Ok(Self { sections })
    }

    pub fn list_sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn ids(&self) -> impl Iterator<Item = SectionId> {
        (0..self.sections.len()).map(SectionId)
    }

    pub fn section(&self, id: SectionId) -> Result<&Section> {
        self.sections.get(id.0).ok_or_else(|| unknown_section(id))
    }

    fn section_mut(&mut self, id: SectionId) -> Result<&mut Section> {
        self.sections.get_mut(id.0).ok_or_else(|| unknown_section(id))
    }

    /// Looks a section up by name (case-insensitive) or by 1-based position.
    pub fn find(&self, key: &str) -> Option<SectionId> {
        let key = key.trim();
        if let Some(index) = self
            .sections
            .iter()
            .position(|s| s.name().eq_ignore_ascii_case(key))
        {
            return Some(SectionId(index));
        }

        match key.parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.sections.len() => Some(SectionId(n - 1)),
            _ => None,
        }
    }

    pub fn update_sensor(&mut self, id: SectionId, sensor: &str, delta: f64) -> Result<f64> {
        self.section_mut(id)?.update(sensor, delta)
    }

    pub fn evaluate_alerts(&self, id: SectionId) -> Result<Vec<Alert>> {
        Ok(self.section(id)?.check_alerts())
    }

    /// Applies the corrective delta for a recognized action string once.
    ///
    /// Returns the new reading, or `None` when the action is not one of the
    /// four the evaluator emits.
    pub fn resolve_alert(&mut self, id: SectionId, action: &str) -> Result<Option<f64>> {
        let section = self.section_mut(id)?;
        let Some(action) = AlertAction::parse(action) else {
            tracing::debug!(section = %section.name(), action, "Ignoring unrecognized alert action");
            return Ok(None);
        };

        let value = section.update_sensor(action.sensor(), action.delta())?;
        tracing::info!(section = %section.name(), "Applied '{}'", action);
        Ok(Some(value))
    }

    /// One passive pass over every section. Never mutates readings.
    pub fn evaluate_all(&self) -> Vec<SectionAlerts> {
        self.sections
            .iter()
            .map(|section| SectionAlerts {
                section: section.name().to_string(),
                alerts: section.check_alerts(),
            })
            .collect()
    }

    pub fn reading(&self, id: SectionId, sensor: Sensor) -> Result<f64> {
        self.section(id)?
            .reading(sensor)
            .ok_or_else(|| GreenhouseError::UnknownSensor {
                sensor: sensor.to_string(),
            })
    }
}

fn unknown_section(id: SectionId) -> GreenhouseError {
    GreenhouseError::UnknownSection {
        section: id.to_string(),
    }
}
