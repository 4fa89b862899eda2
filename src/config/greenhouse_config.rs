use crate::core::monitor::DEFAULT_TICK_INTERVAL;
use crate::domain::model::{Sensor, ThresholdTable};
use crate::domain::ports::{SectionSpec, ThresholdProvider};
use crate::utils::error::{GreenhouseError, Result};
use crate::utils::validation::{
    validate_bounds, validate_non_empty_string, validate_positive_number, Validate,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Start-up configuration: crop thresholds plus the section layout.
///
/// Keys the panel does not use (window sizes, image files) are ignored, so the
/// same document can also drive a graphical front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenhouseConfig {
    pub crop_thresholds: IndexMap<String, ThresholdTable>,
    pub sections: Option<Vec<SectionConfig>>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub crop_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: Option<bool>,
    pub tick_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is treated as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "JSON",
            ConfigFormat::Toml => "TOML",
        }
    }
}

impl GreenhouseConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let format = ConfigFormat::from_path(&path);
        tracing::info!(
            "Loading {} configuration from {}",
            format.name(),
            path.as_ref().display()
        );
        Self::from_str_with_format(&content, format)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, ConfigFormat::Json)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_str_with_format(content, ConfigFormat::Toml)
    }

    fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        let processed = substitute_env_vars(content);

        let parsed = match format {
            ConfigFormat::Json => {
                serde_json::from_str(&processed).map_err(|e| e.to_string())
            }
            ConfigFormat::Toml => toml::from_str(&processed).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| GreenhouseError::ConfigParse {
            format: format.name().to_string(),
            message,
        })
    }

    /// Configured sections, or one per crop type in document order.
    pub fn sections(&self) -> Vec<SectionConfig> {
        match &self.sections {
            Some(sections) => sections.clone(),
            None => self
                .crop_thresholds
                .keys()
                .enumerate()
                .map(|(i, crop)| SectionConfig {
                    name: format!("Section {}", i + 1),
                    crop_type: crop.clone(),
                })
                .collect(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.monitoring
            .as_ref()
            .and_then(|m| m.tick_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK_INTERVAL)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.enabled)
            .unwrap_or(true)
    }

    pub fn validate_config(&self) -> Result<()> {
        for (crop, table) in &self.crop_thresholds {
            for (sensor, bounds) in table.iter() {
                validate_bounds(&format!("crop_thresholds.{}.{}", crop, sensor), bounds)?;
            }
        }

        let sections = self.sections();
        if sections.is_empty() {
            return Err(GreenhouseError::InvalidConfigValue {
                field: "sections".to_string(),
                value: "[]".to_string(),
                reason: "At least one section is required".to_string(),
            });
        }

        for (i, section) in sections.iter().enumerate() {
            validate_non_empty_string(&format!("sections[{}].name", i), &section.name)?;

            // sections are looked up by name without regard to case
            let name = section.name.trim();
            if sections[..i]
                .iter()
                .any(|earlier| earlier.name.trim().eq_ignore_ascii_case(name))
            {
                return Err(GreenhouseError::InvalidConfigValue {
                    field: format!("sections[{}].name", i),
                    value: section.name.clone(),
                    reason: "Section names must be unique".to_string(),
                });
            }

            let table = self.crop_thresholds.get(&section.crop_type).ok_or_else(|| {
                GreenhouseError::MissingConfiguration {
                    crop_type: section.crop_type.clone(),
                    sensor: None,
                }
            })?;

            for sensor in Sensor::CHECKED {
                if table.bounds(sensor.as_str()).is_none() {
                    return Err(GreenhouseError::MissingConfiguration {
                        crop_type: section.crop_type.clone(),
                        sensor: Some(sensor.as_str().to_string()),
                    });
                }
            }
        }

        if let Some(ms) = self.monitoring.as_ref().and_then(|m| m.tick_interval_ms) {
            validate_positive_number("monitoring.tick_interval_ms", ms, 1)?;
        }

        Ok(())
    }
}

/// Replaces `${VAR}` with the variable's value; unset variables stay verbatim.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl ThresholdProvider for GreenhouseConfig {
    fn thresholds_for(&self, crop_type: &str) -> Option<&ThresholdTable> {
        self.crop_thresholds.get(crop_type)
    }

    fn section_layout(&self) -> Vec<SectionSpec> {
        self.sections()
            .into_iter()
            .map(|s| SectionSpec {
                name: s.name,
                crop_type: s.crop_type,
            })
            .collect()
    }
}

impl Validate for GreenhouseConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
