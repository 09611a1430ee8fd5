use chrono::NaiveDate;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// How many days ahead journeys can be booked.
    #[serde(default = "default_advance_days")]
    pub advance_days: i64,
}

fn default_advance_days() -> i64 {
    raahi_core::dates::DEFAULT_BOOKING_WINDOW_DAYS
}

/// The scripted journey the demo binary walks through. Without a date it
/// falls back to the default travel date (the coming Friday).
#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    pub from_city: String,
    pub to_city: String,
    pub date: Option<NaiveDate>,
    pub seats: Vec<u32>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // E.g. `RAAHI__SEARCH__ADVANCE_DAYS=30`
            .add_source(config::Environment::with_prefix("RAAHI").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
