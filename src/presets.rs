use crate::settings::{Mode, SimSettings};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A named bundle of simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: SimSettings,
    pub mode: Mode,
    pub theme: Theme,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        settings: SimSettings,
        mode: Mode,
        theme: Theme,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings,
            mode,
            theme,
        }
    }
}

/// Manager for loading and saving presets
pub struct PresetManager {
    /// Built-in presets that ship with the app
    pub builtin: Vec<Preset>,
    /// User-created presets loaded from disk
    pub user: Vec<Preset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    pub fn new() -> Self {
        let mut manager = Self {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        manager.load_user_presets();
        manager
    }

    /// Load the built-in presets
    fn load_builtin_presets(&mut self) {
        self.builtin = vec![
            Preset::new(
                "Pond",
                "Default physics water with gentle decay",
                SimSettings::default(),
                Mode::Physics,
                Theme::Ocean,
            ),
            Preset::new(
                "Still Water",
                "Heavily damped waves that die out quickly",
                SimSettings {
                    damping: 0.93,
                    click_strength: 150.0,
                    drag_strength: 80.0,
                    ..Default::default()
                },
                Mode::Physics,
                Theme::Ocean,
            ),
            Preset::new(
                "Storm",
                "Long-lived waves, every drag stroke disturbs the surface",
                SimSettings {
                    damping: 0.995,
                    click_strength: 255.0,
                    drag_strength: 220.0,
                    drag_spawn_chance: 1.0,
                    ..Default::default()
                },
                Mode::Physics,
                Theme::Ocean,
            ),
            Preset::new(
                "Quicksilver",
                "Metallic interference patterns",
                SimSettings {
                    damping: 0.992,
                    click_strength: 230.0,
                    ..Default::default()
                },
                Mode::Physics,
                Theme::Mercury,
            ),
            Preset::new(
                "Rain Rings",
                "Simple-mode rings spawning freely under drag",
                SimSettings {
                    drag_spawn_chance: 0.6,
                    ripple_speed: 2.5,
                    ..Default::default()
                },
                Mode::Simple,
                Theme::Ocean,
            ),
            Preset::new(
                "Slow Lagoon",
                "Wide lazy rings on a tropical surface",
                SimSettings {
                    ripple_speed: 1.0,
                    drag_spawn_chance: 0.2,
                    ..Default::default()
                },
                Mode::Simple,
                Theme::Lagoon,
            ),
        ];
    }

    /// Get the presets directory path
    fn presets_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ripple-simulation").join("presets"))
    }

    /// Load user presets from disk
    fn load_user_presets(&mut self) {
        if let Some(dir) = Self::presets_dir() {
            if dir.exists() {
                if let Ok(entries) = fs::read_dir(&dir) {
                    for entry in entries.flatten() {
                        if entry.path().extension().is_some_and(|e| e == "json") {
                            if let Ok(content) = fs::read_to_string(entry.path()) {
                                if let Ok(preset) = serde_json::from_str::<Preset>(&content) {
                                    self.user.push(preset);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Save a preset to disk
    pub fn save_preset(&mut self, preset: Preset) -> Result<(), String> {
        let dir = Self::presets_dir().ok_or("Could not determine config directory")?;

        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create presets directory: {}", e))?;

        // Sanitize filename
        let filename = preset
            .name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect::<String>();

        let path = dir.join(format!("{}.json", filename));

        let json = serde_json::to_string_pretty(&preset)
            .map_err(|e| format!("Failed to serialize preset: {}", e))?;

        fs::write(&path, json).map_err(|e| format!("Failed to write preset file: {}", e))?;

        if !self.user.iter().any(|p| p.name == preset.name) {
            self.user.push(preset);
        }

        Ok(())
    }

    /// Total number of presets (builtin + user)
    pub fn len(&self) -> usize {
        self.builtin.len() + self.user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a preset by combined index (builtin first, then user)
    pub fn get(&self, index: usize) -> Option<&Preset> {
        if index < self.builtin.len() {
            self.builtin.get(index)
        } else {
            self.user.get(index - self.builtin.len())
        }
    }

    /// Get all presets (builtin + user)
    pub fn all_presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.user.iter())
    }

    /// Find a preset by name
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.all_presets().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_present() {
        let mut manager = PresetManager {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        assert!(!manager.is_empty());
        assert!(manager.find("storm").is_some());
        assert!(manager.find("no such preset").is_none());
    }

    #[test]
    fn test_indexing_spans_builtin_then_user() {
        let mut manager = PresetManager {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        let builtin_count = manager.builtin.len();
        manager.user.push(Preset::new(
            "Custom",
            "user preset",
            SimSettings::default(),
            Mode::Simple,
            Theme::Ember,
        ));
        assert_eq!(manager.len(), builtin_count + 1);
        assert_eq!(manager.get(builtin_count).unwrap().name, "Custom");
        assert!(manager.get(manager.len()).is_none());
    }

    #[test]
    fn test_preset_roundtrip() {
        let preset = Preset::new(
            "Test",
            "roundtrip",
            SimSettings {
                damping: 0.97,
                ..Default::default()
            },
            Mode::Physics,
            Theme::Lagoon,
        );
        let json = serde_json::to_string(&preset).unwrap();
        let parsed: Preset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "Test");
        assert_eq!(parsed.settings.damping, 0.97);
        assert_eq!(parsed.theme, Theme::Lagoon);
    }
}
