use crate::domain::model::Bounds;
use crate::utils::error::{GreenhouseError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GreenhouseError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GreenhouseError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_bounds(field_name: &str, bounds: &Bounds) -> Result<()> {
    if !bounds.min.is_finite() || !bounds.max.is_finite() {
        return Err(GreenhouseError::InvalidConfigValue {
            field: field_name.to_string(),
            value: format!("[{}, {}]", bounds.min, bounds.max),
            reason: "Bounds must be finite numbers".to_string(),
        });
    }

    if bounds.min > bounds.max {
        return Err(GreenhouseError::InvalidConfigValue {
            field: field_name.to_string(),
            value: format!("[{}, {}]", bounds.min, bounds.max),
            reason: "min must not exceed max".to_string(),
        });
    }

    Ok(())
}
