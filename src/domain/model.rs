use crate::utils::error::GreenhouseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simulated quantities tracked for every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    Temperature,
    Moisture,
    Humidity,
    LightIntensity,
    CropGrowth,
}

impl Sensor {
    pub const ALL: [Sensor; 5] = [
        Sensor::Temperature,
        Sensor::Moisture,
        Sensor::Humidity,
        Sensor::LightIntensity,
        Sensor::CropGrowth,
    ];

    /// Sensors compared against thresholds. The rest are display-only.
    pub const CHECKED: [Sensor; 2] = [Sensor::Temperature, Sensor::Moisture];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sensor::Temperature => "temperature",
            Sensor::Moisture => "moisture",
            Sensor::Humidity => "humidity",
            Sensor::LightIntensity => "light_intensity",
            Sensor::CropGrowth => "crop_growth",
        }
    }

    /// Name with the first letter uppercased, e.g. `Light_intensity`.
    pub fn label(&self) -> &'static str {
        match self {
            Sensor::Temperature => "Temperature",
            Sensor::Moisture => "Moisture",
            Sensor::Humidity => "Humidity",
            Sensor::LightIntensity => "Light_intensity",
            Sensor::CropGrowth => "Crop_growth",
        }
    }

    pub fn is_checked(&self) -> bool {
        Self::CHECKED.contains(self)
    }

    /// Starting value for sensors without configured bounds.
    pub fn default_reading(&self) -> Option<f64> {
        match self {
            Sensor::Humidity => Some(50.0),
            Sensor::LightIntensity => Some(20000.0),
            Sensor::CropGrowth => Some(1.0),
            Sensor::Temperature | Sensor::Moisture => None,
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sensor {
    type Err = GreenhouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sensor::ALL
            .iter()
            .copied()
            .find(|sensor| sensor.as_str() == s)
            .ok_or_else(|| GreenhouseError::UnknownSensor {
                sensor: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-crop bounds keyed by sensor name, in configuration order.
///
/// Entries whose key is not a known sensor are kept but never checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable(IndexMap<String, Bounds>);

impl ThresholdTable {
    pub fn bounds(&self, sensor: &str) -> Option<Bounds> {
        self.0.get(sensor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bounds)> {
        self.0.iter().map(|(name, bounds)| (name.as_str(), bounds))
    }
}

impl<S: Into<String>> FromIterator<(S, Bounds)> for ThresholdTable {
    fn from_iter<I: IntoIterator<Item = (S, Bounds)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Current value of every sensor of a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReadings(IndexMap<Sensor, f64>);

impl SensorReadings {
    pub(crate) fn new(values: IndexMap<Sensor, f64>) -> Self {
        Self(values)
    }

    pub fn get(&self, sensor: Sensor) -> Option<f64> {
        self.0.get(&sensor).copied()
    }

    pub(crate) fn get_mut(&mut self, sensor: Sensor) -> Option<&mut f64> {
        self.0.get_mut(&sensor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sensor, f64)> + '_ {
        self.0.iter().map(|(sensor, value)| (*sensor, *value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub suggested_action: String,
}

/// The corrective actions an alert can suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    IncreaseTemperature,
    DecreaseTemperature,
    IncreaseMoisture,
    DecreaseMoisture,
}

impl AlertAction {
    pub const TEMPERATURE_STEP: f64 = 0.5;
    pub const MOISTURE_STEP: f64 = 2.0;

    /// Recognizes exactly the action strings produced by the evaluator.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "Increase temperature" => Some(Self::IncreaseTemperature),
            "Decrease temperature" => Some(Self::DecreaseTemperature),
            "Increase moisture" => Some(Self::IncreaseMoisture),
            "Decrease moisture" => Some(Self::DecreaseMoisture),
            _ => None,
        }
    }

    pub fn sensor(&self) -> Sensor {
        match self {
            Self::IncreaseTemperature | Self::DecreaseTemperature => Sensor::Temperature,
            Self::IncreaseMoisture | Self::DecreaseMoisture => Sensor::Moisture,
        }
    }

    pub fn delta(&self) -> f64 {
        match self {
            Self::IncreaseTemperature => Self::TEMPERATURE_STEP,
            Self::DecreaseTemperature => -Self::TEMPERATURE_STEP,
            Self::IncreaseMoisture => Self::MOISTURE_STEP,
            Self::DecreaseMoisture => -Self::MOISTURE_STEP,
        }
    }
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.delta() > 0.0 { "Increase" } else { "Decrease" };
        write!(f, "{} {}", verb, self.sensor())
    }
}

/// Index of a section inside a [`crate::core::greenhouse::Greenhouse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub(crate) usize);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_names_round_trip() {
        for sensor in Sensor::ALL {
            assert_eq!(sensor.as_str().parse::<Sensor>().unwrap(), sensor);
        }
        assert!("Temperature".parse::<Sensor>().is_err());
        assert!("co2".parse::<Sensor>().is_err());
    }

    #[test]
    fn test_only_temperature_and_moisture_are_checked() {
        let checked: Vec<_> = Sensor::ALL.iter().filter(|s| s.is_checked()).collect();
        assert_eq!(checked, vec![&Sensor::Temperature, &Sensor::Moisture]);
    }

    #[test]
    fn test_threshold_table_keeps_document_order() {
        let table: ThresholdTable =
            serde_json::from_str(r#"{"temperature": {"min": 18, "max": 28}, "moisture": {"min": 60, "max": 80}, "humidity": {"min": 40, "max": 70}}"#)
                .unwrap();
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["temperature", "moisture", "humidity"]);
        assert_eq!(table.bounds("temperature"), Some(Bounds::new(18.0, 28.0)));
        assert_eq!(table.bounds("light_intensity"), None);
    }

    #[test]
    fn test_alert_action_strings() {
        for action in [
            AlertAction::IncreaseTemperature,
            AlertAction::DecreaseTemperature,
            AlertAction::IncreaseMoisture,
            AlertAction::DecreaseMoisture,
        ] {
            assert_eq!(AlertAction::parse(&action.to_string()), Some(action));
        }
        assert_eq!(AlertAction::parse("decrease temperature"), None);
        assert_eq!(AlertAction::parse("Open the vents"), None);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = Bounds::new(18.0, 28.0);
        assert!(bounds.contains(18.0));
        assert!(bounds.contains(28.0));
        assert!(!bounds.contains(28.1));
        assert_eq!(bounds.midpoint(), 23.0);
    }
}
