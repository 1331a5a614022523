//! Global taskpad configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{TaskpadError, TaskpadResult};
use crate::folder::ALL_FOLDER_ID;
use crate::store::FileStore;
use crate::view::WeekStart;

static DEFAULT_DATA_DIR: &str = "~/.taskpad";
static DEFAULT_REMINDER_INTERVAL: &str = "1m";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_folder() -> String {
    ALL_FOLDER_ID.to_string()
}

fn default_reminder_interval() -> String {
    DEFAULT_REMINDER_INTERVAL.to_string()
}

/// Configuration at ~/.config/taskpad/config.toml
///
/// Every key can be overridden from the environment with a `TASKPAD_`
/// prefix, e.g. `TASKPAD_DATA_DIR=/tmp/tasks`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskpadConfig {
    /// Where `tasks.json` and `folders.json` live.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Folder for new tasks when none is given.
    #[serde(default = "default_folder")]
    pub default_folder: String,

    #[serde(default)]
    pub week_start: WeekStart,

    /// How often the reminder daemon checks for due tasks, e.g. "1m" or "30s".
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval: String,
}

impl Default for TaskpadConfig {
    fn default() -> Self {
        TaskpadConfig {
            data_dir: default_data_dir(),
            default_folder: default_folder(),
            week_start: WeekStart::default(),
            reminder_interval: default_reminder_interval(),
        }
    }
}

impl TaskpadConfig {
    pub fn config_path() -> TaskpadResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TaskpadError::Config("Could not determine config directory".into()))?
            .join("taskpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> TaskpadResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TaskpadResult<Self> {
        let config: TaskpadConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TASKPAD"))
            .build()
            .map_err(|e| TaskpadError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TaskpadError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    pub fn reminder_interval(&self) -> TaskpadResult<Duration> {
        parse_interval(&self.reminder_interval)
            .map_err(|e| TaskpadError::Config(format!("Invalid reminder_interval: {e}")))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TaskpadResult<()> {
        let contents = format!(
            "\
# taskpad configuration

# Where your tasks are stored:
# data_dir = \"{}\"

# Folder for new tasks:
# default_folder = \"{}\"

# First day of the week in the calendar view (\"sunday\" or \"monday\"):
# week_start = \"sunday\"

# How often the reminder daemon checks for due tasks:
# reminder_interval = \"{}\"
",
            DEFAULT_DATA_DIR, ALL_FOLDER_ID, DEFAULT_REMINDER_INTERVAL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TaskpadError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TaskpadError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

/// Parse a reminder check interval such as "30s" or "2m". Zero is rejected.
pub fn parse_interval(input: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(input.trim()).map_err(|e| format!("'{}': {}", input, e))?;
    if interval.is_zero() {
        return Err(format!("'{}': interval must be greater than zero", input));
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskpad/config.toml");

        TaskpadConfig::create_default_config(&path).unwrap();
        let config = TaskpadConfig::load_from(&path).unwrap();

        assert_eq!(config, TaskpadConfig::default());
        assert_eq!(config.reminder_interval().unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn reads_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/tasks\"\nweek_start = \"monday\"\nreminder_interval = \"30s\"\n",
        )
        .unwrap();

        let config = TaskpadConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/tasks"));
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.reminder_interval().unwrap(), Duration::from_secs(30));
        assert_eq!(config.default_folder, "all");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaskpadConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("~/.taskpad"));
    }

    #[test]
    fn bad_interval_is_a_config_error() {
        let config = TaskpadConfig {
            reminder_interval: "every now and then".into(),
            ..TaskpadConfig::default()
        };
        assert!(matches!(
            config.reminder_interval(),
            Err(TaskpadError::Config(_))
        ));
    }

    #[test]
    fn tilde_is_expanded() {
        let config = TaskpadConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }

    #[test]
    fn zero_interval_is_a_config_error() {
        for raw in ["0s", "0m", "0"] {
            let config = TaskpadConfig {
                reminder_interval: raw.into(),
                ..TaskpadConfig::default()
            };
            assert!(matches!(
                config.reminder_interval(),
                Err(TaskpadError::Config(_))
            ));
        }
        assert_eq!(parse_interval(" 30s ").unwrap(), Duration::from_secs(30));
    }
}
