use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenhouseError {
    #[error("Unknown sensor: {sensor}")]
    UnknownSensor { sensor: String },

    #[error("Unknown section: {section}")]
    UnknownSection { section: String },

    #[error("{}", missing_configuration_message(.crop_type, .sensor))]
    MissingConfiguration {
        crop_type: String,
        sensor: Option<String>,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{format} parsing error: {message}")]
    ConfigParse { format: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn missing_configuration_message(crop_type: &str, sensor: &Option<String>) -> String {
    match sensor {
        Some(sensor) => format!(
            "Missing configuration: no '{}' thresholds for crop type '{}'",
            sensor, crop_type
        ),
        None => format!(
            "Missing configuration: no thresholds for crop type '{}'",
            crop_type
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Domain,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GreenhouseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingConfiguration { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigParse { .. } => ErrorCategory::Config,
            Self::UnknownSensor { .. } | Self::UnknownSection { .. } => ErrorCategory::Domain,
            Self::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSensor { .. } | Self::UnknownSection { .. } => ErrorSeverity::Medium,
            Self::MissingConfiguration { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigParse { .. } => ErrorSeverity::High,
            Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::UnknownSensor { .. } => format!(
                "Use one of: {}",
                crate::domain::model::Sensor::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::UnknownSection { .. } => {
                "Run 'list' to see section names and indexes".to_string()
            }
            Self::MissingConfiguration { crop_type, sensor } => match sensor {
                Some(sensor) => format!(
                    "Add a '{}' entry with min/max under crop_thresholds.{}",
                    sensor, crop_type
                ),
                None => format!("Add crop_thresholds.{} to the configuration", crop_type),
            },
            Self::InvalidConfigValue { field, .. } => {
                format!("Fix the value of '{}' in the configuration file", field)
            }
            Self::ConfigParse { format, .. } => {
                format!("Check that the configuration file is valid {}", format)
            }
            Self::Io(_) => "Check that the file exists and is readable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Domain => self.to_string(),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GreenhouseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_message() {
        let err = GreenhouseError::MissingConfiguration {
            crop_type: "Tomato".to_string(),
            sensor: Some("moisture".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Missing configuration: no 'moisture' thresholds for crop type 'Tomato'"
        );
        assert_eq!(err.category(), ErrorCategory::Config);

        let err = GreenhouseError::MissingConfiguration {
            crop_type: "Melon".to_string(),
            sensor: None,
        };
        assert!(err.to_string().contains("'Melon'"));
    }

    #[test]
    fn test_unknown_sensor_is_domain_error() {
        let err = GreenhouseError::UnknownSensor {
            sensor: "co2".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Domain);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("light_intensity"));
    }
}
