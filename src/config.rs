use crate::actions::Step;
use crate::keycodes::{DEFAULT_CONFIRM_KEY, parse_key};
use crate::sequencer::{DEFAULT_DELAY, DEFAULT_TRACK_NAME_FIELD, SequencerConfig};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Config file looked up in the current directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "flseq.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub automation: AutomationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomationConfig {
    /// Seconds between primitive actions
    pub delay_secs: f64,
    pub confirm_key: String,
    /// Only used in log output; the window is never checked for focus
    pub window_title: String,
    pub track_name_field: Point,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        let (x, y) = DEFAULT_TRACK_NAME_FIELD;
        Self {
            delay_secs: DEFAULT_DELAY.as_secs_f64(),
            confirm_key: DEFAULT_CONFIRM_KEY.to_string(),
            window_title: "FL Studio".to_string(),
            track_name_field: Point { x, y },
        }
    }
}

impl AutomationConfig {
    /// Build the sequencer's timing knobs, validating the raw values
    pub fn sequencer_config(&self) -> Result<SequencerConfig> {
        let delay = delay_from_secs(self.delay_secs)?;
        let confirm_key = parse_key(&self.confirm_key).context("Invalid confirm_key")?;

        Ok(SequencerConfig {
            delay,
            confirm_key,
            track_name_field: (self.track_name_field.x, self.track_name_field.y),
        })
    }
}

/// Convert a delay in seconds, rejecting negative, non-finite and oversized values
pub fn delay_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        bail!("delay_secs must be a non-negative number, got {}", secs);
    }
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("delay_secs is too large, got {}", secs))
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "flseq.log".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse()
            .with_context(|| format!("Invalid log level: {}", self.level))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Config {
    /// Look up a task by name (case-insensitive)
    pub fn find_task(&self, name: &str) -> Option<&TaskConfig> {
        self.task
            .iter()
            .find(|t| t.name.trim().to_lowercase() == name.trim().to_lowercase())
    }

    /// Check everything that can be checked before any input is sent
    pub fn validate(&self) -> Result<()> {
        self.automation.sequencer_config()?;
        self.logging.level_filter()?;

        let mut names = HashSet::new();
        for task in &self.task {
            if task.name.trim().is_empty() {
                bail!("Task name cannot be empty");
            }
            if !names.insert(task.name.trim().to_lowercase()) {
                bail!("Duplicate task name: {}", task.name);
            }
            for (index, step) in task.steps.iter().enumerate() {
                step.validate().with_context(|| {
                    format!("Task '{}' step {} is invalid", task.name, index + 1)
                })?;
            }
        }
        Ok(())
    }
}

/// Parse config text
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("Failed to parse TOML config")?;
    config.validate()?;
    Ok(config)
}

/// Load and parse the config file
pub fn load_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Load `path` if given, otherwise the default file, otherwise built-in defaults
///
/// An explicitly named file that does not exist is an error.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
