/// Engine configuration.
/// Reads config.json from ~/.config/taskboard/config.json (or platform equivalent).
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Store key for the full registry blob.
    #[serde(default = "default_state_key")]
    pub state_key: String,
    /// Store key for the standalone calendar link.
    #[serde(default = "default_calendar_key")]
    pub calendar_key: String,
    #[serde(default = "default_dashboard_name")]
    pub default_dashboard_name: String,
    /// Column titles every new board starts with.
    #[serde(default = "default_seed_columns")]
    pub seed_columns: Vec<String>,
    /// Dark mode when no persisted state exists.
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_state_key() -> String {
    "kanban-storage".to_string()
}

fn default_calendar_key() -> String {
    "googleCalendarUrl".to_string()
}

fn default_dashboard_name() -> String {
    "Main".to_string()
}

fn default_seed_columns() -> Vec<String> {
    vec!["To do".to_string(), "In progress".to_string(), "Done".to_string()]
}

fn default_dark_mode() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_key: default_state_key(),
            calendar_key: default_calendar_key(),
            default_dashboard_name: default_dashboard_name(),
            seed_columns: default_seed_columns(),
            dark_mode: default_dark_mode(),
        }
    }
}

/// Default config path: ~/.config/taskboard/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
        .join("config.json")
}

/// Load config from path. Returns default if file doesn't exist.
pub fn load_config(path: &Path) -> EngineConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Failed to parse config {}: {}", path.display(), e);
            EngineConfig::default()
        }),
        Err(_) => {
            log::info!("No config at {}, using defaults", path.display());
            EngineConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/taskboard/config.json"));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.seed_columns.len(), 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"defaultDashboardName":"Principal","darkMode":false}}"#).unwrap();
        let config = load_config(tmp.path());
        assert_eq!(config.default_dashboard_name, "Principal");
        assert!(!config.dark_mode);
        assert_eq!(config.state_key, "kanban-storage");
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "not json").unwrap();
        assert_eq!(load_config(tmp.path()), EngineConfig::default());
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("taskboard/config.json"));
    }
}
