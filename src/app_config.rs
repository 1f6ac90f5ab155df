use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::pipeline::{
    ProcessingSettings, DEFAULT_MAX_WORDS_PER_LINE, DEFAULT_MIN_DURATION_SECS,
    DEFAULT_WORDS_PER_SECOND,
};
use crate::subtitle_processor::FPS;

/// Application configuration module
/// This module handles loading, validating and saving the converter settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Splitting and timing parameters
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Frames added to every cue after conversion (may be negative)
    #[serde(default)]
    pub offset_frames: f64,

    /// Speaker names to rename, old name to new name
    #[serde(default)]
    pub speaker_replacements: BTreeMap<String, String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Splitting and timing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    // @field: Word cap per subtitle line
    #[serde(default = "default_max_words_per_line")]
    pub max_words_per_line: usize,

    // @field: Speaking rate used for timing
    #[serde(default = "default_words_per_second")]
    pub words_per_second: f64,

    // @field: Floor for split subtitle duration, in seconds
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: f64,

    // @field: Frame rate of the Movie XML timeline
    #[serde(default = "default_fps")]
    pub fps: f64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_words_per_line: default_max_words_per_line(),
            words_per_second: default_words_per_second(),
            min_duration_secs: default_min_duration_secs(),
            fps: default_fps(),
        }
    }
}

impl From<&ProcessingConfig> for ProcessingSettings {
    fn from(config: &ProcessingConfig) -> Self {
        ProcessingSettings {
            max_words_per_line: config.max_words_per_line,
            words_per_second: config.words_per_second,
            min_duration_secs: config.min_duration_secs,
            fps: config.fps,
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_words_per_line() -> usize {
    DEFAULT_MAX_WORDS_PER_LINE
}

fn default_words_per_second() -> f64 {
    DEFAULT_WORDS_PER_SECOND
}

fn default_min_duration_secs() -> f64 {
    DEFAULT_MIN_DURATION_SECS
}

fn default_fps() -> f64 {
    FPS
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.processing_settings().validate()?;

        for (old_name, new_name) in &self.speaker_replacements {
            if old_name.trim().is_empty() || new_name.trim().is_empty() {
                return Err(ConfigError::InvalidReplacement(format!("{}:{}", old_name, new_name)));
            }
        }

        Ok(())
    }

    /// Pipeline settings derived from this configuration
    pub fn processing_settings(&self) -> ProcessingSettings {
        ProcessingSettings::from(&self.processing)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            processing: ProcessingConfig::default(),
            offset_frames: 0.0,
            speaker_replacements: BTreeMap::new(),
            log_level: LogLevel::default(),
        }
    }
}
