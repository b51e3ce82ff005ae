//! Kiosk configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `cargo run` brings up a working lot next to the
//! binary.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use parkwise_core::fare::FareSchedule;

/// Kiosk configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Hourly rate for car spots
    pub car_rate_per_hour: f64,

    /// Hourly rate for bike spots
    pub bike_rate_per_hour: f64,
}

impl KioskConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable             | Default         |
    /// |----------------------|-----------------|
    /// | `PARKWISE_DB`        | `./parkwise.db` |
    /// | `PARKWISE_CAR_RATE`  | `1.5`           |
    /// | `PARKWISE_BIKE_RATE` | `1.0`           |
    pub fn load() -> Result<Self, ConfigError> {
        let config = KioskConfig {
            database_path: env::var("PARKWISE_DB")
                .unwrap_or_else(|_| "./parkwise.db".to_string())
                .into(),

            car_rate_per_hour: env::var("PARKWISE_CAR_RATE")
                .unwrap_or_else(|_| "1.5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PARKWISE_CAR_RATE".to_string()))?,

            bike_rate_per_hour: env::var("PARKWISE_BIKE_RATE")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PARKWISE_BIKE_RATE".to_string()))?,
        };

        // A zero or negative rate would make every visit free or a refund.
        if config.car_rate_per_hour <= 0.0 {
            return Err(ConfigError::InvalidValue("PARKWISE_CAR_RATE".to_string()));
        }
        if config.bike_rate_per_hour <= 0.0 {
            return Err(ConfigError::InvalidValue("PARKWISE_BIKE_RATE".to_string()));
        }

        Ok(config)
    }

    /// The fare schedule carried by this configuration.
    pub fn fare_schedule(&self) -> FareSchedule {
        FareSchedule {
            car_rate_per_hour: self.car_rate_per_hour,
            bike_rate_per_hour: self.bike_rate_per_hour,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fare_schedule_carries_configured_rates() {
        let config = KioskConfig {
            database_path: "./test.db".into(),
            car_rate_per_hour: 2.5,
            bike_rate_per_hour: 0.75,
        };

        let schedule = config.fare_schedule();
        assert_eq!(schedule.car_rate_per_hour, 2.5);
        assert_eq!(schedule.bike_rate_per_hour, 0.75);
    }
}
