use chrono::NaiveTime;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::parser::CommandError;
use crate::timezone::detect_system_timezone;
use datebook_core::error::CoreError;

pub const CONFIG_FILE: &str = "datebook.toml";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Zone used for the calendar created from `default_calendar` (IANA format)
    pub default_timezone: String,
    /// Start of the window used by `create event <subject> on <date>`
    pub all_day_start: String,
    /// End of that window
    pub all_day_end: String,
    /// Filter directive applied when `RUST_LOG` is unset
    pub log_level: String,
    /// Calendar created and selected at startup
    pub default_calendar: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timezone: detect_system_timezone(),
            all_day_start: "08:00".to_string(),
            all_day_end: "17:00".to_string(),
            log_level: "warn".to_string(),
            default_calendar: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("DATEBOOK_"))
            .extract()
    }

    /// The all-day window as times of day.
    pub fn all_day_window(&self) -> Result<(NaiveTime, NaiveTime), CommandError> {
        let start = parse_time(&self.all_day_start)?;
        let end = parse_time(&self.all_day_end)?;
        if end < start {
            return Err(CommandError::Core(CoreError::InvalidInput(format!(
                "All-day window ends ({}) before it starts ({})",
                self.all_day_end, self.all_day_start
            ))));
        }
        Ok((start, end))
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, CommandError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        CommandError::Core(CoreError::InvalidInput(format!(
            "Invalid time of day: {}",
            value
        )))
    })
}
