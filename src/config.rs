/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{LiftError, LiftResult};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub lift: LiftConfig,
    pub timing: TimingConfig,
    pub shell: ShellConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LiftConfig {
    pub min_floor: i32,
    pub max_floor: i32,
    pub start_floor: i32,
}

impl Default for LiftConfig {
    fn default() -> Self {
        LiftConfig {
            min_floor: 0,
            max_floor: 10,
            start_floor: 0,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub door_time_ms: u64,
    pub floor_travel_time_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            door_time_ms: 1000,
            floor_travel_time_ms: 3000,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFormat {
    Text,
    Json,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    pub status_format: StatusFormat,
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            status_format: StatusFormat::Text,
            log_level: "info".to_string(),
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn from_toml(config_str: &str) -> LiftResult<Config> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /**
     * Loads the configuration file.
     *
     * An explicitly requested file must exist. When no path is given the
     * default `config.toml` is tried and built-in defaults are used if it is missing.
     */
    pub fn load(path: Option<&Path>) -> LiftResult<Config> {
        let config_str = match path {
            Some(path) => fs::read_to_string(path)?,
            None => match fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(config_str) => config_str,
                Err(e) => {
                    warn!(
                        "Could not read {} ({}), using default configuration",
                        DEFAULT_CONFIG_PATH, e
                    );
                    return Ok(Config::default());
                }
            },
        };
        Config::from_toml(&config_str)
    }

    pub fn validate(&self) -> LiftResult<()> {
        self.lift.validate()?;
        self.timing.validate()
    }
}

impl LiftConfig {
    pub fn validate(&self) -> LiftResult<()> {
        if self.min_floor > self.max_floor {
            return Err(LiftError::InvalidConfig(format!(
                "min_floor ({}) is above max_floor ({})",
                self.min_floor, self.max_floor
            )));
        }
        if self.start_floor < self.min_floor || self.start_floor > self.max_floor {
            return Err(LiftError::InvalidConfig(format!(
                "start_floor ({}) is outside {}-{}",
                self.start_floor, self.min_floor, self.max_floor
            )));
        }
        Ok(())
    }
}

impl TimingConfig {
    pub fn door_time(&self) -> Duration {
        Duration::from_millis(self.door_time_ms)
    }

    pub fn floor_travel_time(&self) -> Duration {
        Duration::from_millis(self.floor_travel_time_ms)
    }

    // Travelling one floor always takes longer than moving the doors.
    pub fn validate(&self) -> LiftResult<()> {
        if self.floor_travel_time_ms <= self.door_time_ms {
            return Err(LiftError::InvalidConfig(format!(
                "floor_travel_time_ms ({}) must be longer than door_time_ms ({})",
                self.floor_travel_time_ms, self.door_time_ms
            )));
        }
        Ok(())
    }
}
