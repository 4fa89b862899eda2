use crate::core::evaluator::evaluate_alerts;
use crate::domain::model::{Alert, Sensor, SensorReadings, ThresholdTable};
use crate::utils::error::{GreenhouseError, Result};
use indexmap::IndexMap;

/// One greenhouse zone: its crop's thresholds and live sensor values.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    crop_type: String,
    thresholds: ThresholdTable,
    readings: SensorReadings,
}

impl Section {
    /// Checked sensors start at the middle of their band, the others at fixed defaults.
    pub fn new(
        name: impl Into<String>,
        crop_type: impl Into<String>,
        thresholds: ThresholdTable,
    ) -> Result<Self> {
        let name = name.into();
        let crop_type = crop_type.into();

        let mut values = IndexMap::with_capacity(Sensor::ALL.len());
        for sensor in Sensor::ALL {
            let initial = match sensor.default_reading() {
                Some(value) => value,
                None => thresholds
                    .bounds(sensor.as_str())
                    .map(|bounds| bounds.midpoint())
                    .ok_or_else(|| GreenhouseError::MissingConfiguration {
                        crop_type: crop_type.clone(),
                        sensor: Some(sensor.as_str().to_string()),
                    })?,
            };
            values.insert(sensor, initial);
        }

        tracing::debug!(section = %name, crop = %crop_type, "Section initialised");

        Ok(Self {
            name,
            crop_type,
            thresholds,
            readings: SensorReadings::new(values),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn crop_type(&self) -> &str {
        &self.crop_type
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Adds `delta` to the named sensor and returns the new value. No clamping.
    pub fn update(&mut self, sensor: &str, delta: f64) -> Result<f64> {
        let sensor = sensor.parse::<Sensor>()?;
        self.update_sensor(sensor, delta)
    }

    pub fn update_sensor(&mut self, sensor: Sensor, delta: f64) -> Result<f64> {
        let value = self
            .readings
            .get_mut(sensor)
            .ok_or_else(|| GreenhouseError::UnknownSensor {
                sensor: sensor.to_string(),
            })?;
        *value += delta;

        tracing::debug!(
            section = %self.name,
            sensor = %sensor,
            delta,
            value = *value,
            "Sensor updated"
        );
        Ok(*value)
    }

    pub fn reading(&self, sensor: Sensor) -> Option<f64> {
        self.readings.get(sensor)
    }

    pub fn snapshot(&self) -> SensorReadings {
        self.readings.clone()
    }

    pub fn check_alerts(&self) -> Vec<Alert> {
        evaluate_alerts(&self.thresholds, &self.readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Bounds;

    fn cucumber_thresholds() -> ThresholdTable {
        [
            ("temperature", Bounds::new(18.0, 28.0)),
            ("moisture", Bounds::new(60.0, 80.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_initial_readings() {
        let section = Section::new("Section 1", "Cucumber", cucumber_thresholds()).unwrap();
        let snapshot = section.snapshot();

        let values: Vec<_> = snapshot.iter().collect();
        assert_eq!(
            values,
            vec![
                (Sensor::Temperature, 23.0),
                (Sensor::Moisture, 70.0),
                (Sensor::Humidity, 50.0),
                (Sensor::LightIntensity, 20000.0),
                (Sensor::CropGrowth, 1.0),
            ]
        );
        assert!(section.check_alerts().is_empty());
    }

    #[test]
    fn test_missing_checked_sensor_fails_construction() {
        let thresholds: ThresholdTable = [("temperature", Bounds::new(18.0, 28.0))]
            .into_iter()
            .collect();
        let err = Section::new("Section 1", "Cucumber", thresholds).unwrap_err();
        assert!(matches!(
            err,
            GreenhouseError::MissingConfiguration { ref crop_type, sensor: Some(ref s) }
                if crop_type == "Cucumber" && s == "moisture"
        ));
    }

    #[test]
    fn test_update_is_not_clamped() {
        let mut section = Section::new("Section 1", "Cucumber", cucumber_thresholds()).unwrap();
        assert_eq!(section.update("temperature", 6.0).unwrap(), 29.0);
        assert_eq!(section.update("temperature", 100.0).unwrap(), 129.0);
        assert_eq!(section.update("moisture", -80.0).unwrap(), -10.0);
    }

    #[test]
    fn test_unknown_sensor_leaves_readings_unchanged() {
        let mut section = Section::new("Section 1", "Cucumber", cucumber_thresholds()).unwrap();
        let before = section.snapshot();

        let err = section.update("co2", 1.0).unwrap_err();
        assert!(matches!(err, GreenhouseError::UnknownSensor { ref sensor } if sensor == "co2"));
        assert_eq!(section.snapshot(), before);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut section = Section::new("Section 1", "Cucumber", cucumber_thresholds()).unwrap();
        let snapshot = section.snapshot();
        section.update("humidity", 5.0).unwrap();
        assert_eq!(snapshot.get(Sensor::Humidity), Some(50.0));
        assert_eq!(section.reading(Sensor::Humidity), Some(55.0));
    }
}
