use crate::settings::{Mode, SimSettings};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration for export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// All simulation settings
    pub settings: SimSettings,
    /// Active engine
    pub mode: Mode,
    /// Color theme
    pub theme: Theme,
    /// Simulation steps per display frame
    pub steps_per_frame: usize,
}

impl AppConfig {
    /// Default on-disk location for the saved config
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ripple-simulation").join("config.json"))
    }

    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            settings: SimSettings::default(),
            mode: Mode::default(),
            theme: Theme::default(),
            steps_per_frame: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig {
            version: 1,
            settings: SimSettings {
                damping: 0.995,
                click_strength: 220.0,
                drag_strength: 120.0,
                drag_spawn_chance: 0.5,
                ripple_speed: 3.0,
            },
            mode: Mode::Physics,
            theme: Theme::Mercury,
            steps_per_frame: 3,
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.version, config.version);
        assert_eq!(parsed.settings, config.settings);
        assert_eq!(parsed.mode, Mode::Physics);
        assert_eq!(parsed.theme, Theme::Mercury);
        assert_eq!(parsed.steps_per_frame, 3);
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = AppConfig::default();

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.version, config.version);
        assert_eq!(loaded.settings, config.settings);
        assert_eq!(loaded.mode, config.mode);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(result.is_err());
    }
}
