use crate::domain::model::{Alert, Bounds, Sensor, SensorReadings, ThresholdTable};

/// Compares readings against thresholds, in threshold-table order.
///
/// Only temperature and moisture are checked; bounds are inclusive. At most one
/// alert per sensor. Pure: the readings are not touched.
pub fn evaluate_alerts(thresholds: &ThresholdTable, readings: &SensorReadings) -> Vec<Alert> {
    thresholds
        .iter()
        .filter_map(|(name, bounds)| {
            let sensor = name.parse::<Sensor>().ok().filter(Sensor::is_checked)?;
            let value = readings.get(sensor)?;
            check_sensor(sensor, value, bounds)
        })
        .collect()
}

fn check_sensor(sensor: Sensor, value: f64, bounds: &Bounds) -> Option<Alert> {
    if bounds.contains(value) {
        None
    } else if value > bounds.max {
        Some(Alert {
            title: format!("{} too high", sensor.label()),
            message: format!(
                "{} is {:.1}, maximum is {}",
                sensor.label(),
                value,
                bounds.max
            ),
            suggested_action: format!("Decrease {}", sensor),
        })
    } else if value < bounds.min {
        Some(Alert {
            title: format!("{} too low", sensor.label()),
            message: format!(
                "{} is {:.1}, minimum is {}",
                sensor.label(),
                value,
                bounds.min
            ),
            suggested_action: format!("Increase {}", sensor),
        })
    } else {
        // NaN sits outside every band but is neither high nor low
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn readings(temperature: f64, moisture: f64) -> SensorReadings {
        let mut values = IndexMap::new();
        values.insert(Sensor::Temperature, temperature);
        values.insert(Sensor::Moisture, moisture);
        values.insert(Sensor::Humidity, 500.0);
        SensorReadings::new(values)
    }

    fn cucumber() -> ThresholdTable {
        [
            ("temperature", Bounds::new(18.0, 28.0)),
            ("moisture", Bounds::new(60.0, 80.0)),
            ("humidity", Bounds::new(40.0, 70.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_in_band_produces_nothing() {
        assert!(evaluate_alerts(&cucumber(), &readings(23.0, 70.0)).is_empty());
        assert!(evaluate_alerts(&cucumber(), &readings(28.0, 80.0)).is_empty());
        assert!(evaluate_alerts(&cucumber(), &readings(18.0, 60.0)).is_empty());
    }

    #[test]
    fn test_too_high_alert_text() {
        let alerts = evaluate_alerts(&cucumber(), &readings(29.0, 70.0));
        assert_eq!(
            alerts,
            vec![Alert {
                title: "Temperature too high".to_string(),
                message: "Temperature is 29.0, maximum is 28".to_string(),
                suggested_action: "Decrease temperature".to_string(),
            }]
        );
    }

    #[test]
    fn test_too_low_alert_text() {
        let alerts = evaluate_alerts(&cucumber(), &readings(23.0, 55.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Moisture too low");
        assert_eq!(alerts[0].message, "Moisture is 55.0, minimum is 60");
        assert_eq!(alerts[0].suggested_action, "Increase moisture");
    }

    #[test]
    fn test_alerts_follow_table_order() {
        let table: ThresholdTable = [
            ("moisture", Bounds::new(60.0, 80.0)),
            ("temperature", Bounds::new(18.0, 28.0)),
        ]
        .into_iter()
        .collect();

        let alerts = evaluate_alerts(&table, &readings(10.0, 90.0));
        let titles: Vec<_> = alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Moisture too high", "Temperature too low"]);
    }

    #[test]
    fn test_display_only_sensors_are_ignored() {
        // humidity is 500 against a 40..70 band, still no alert
        let alerts = evaluate_alerts(&cucumber(), &readings(23.0, 70.0));
        assert!(alerts.iter().all(|a| !a.title.starts_with("Humidity")));
    }

    #[test]
    fn test_fractional_bound_is_printed_as_is() {
        let table: ThresholdTable = [("temperature", Bounds::new(18.5, 27.5))]
            .into_iter()
            .collect();
        let alerts = evaluate_alerts(&table, &readings(27.8, 70.0));
        assert_eq!(alerts[0].message, "Temperature is 27.8, maximum is 27.5");
    }
}
