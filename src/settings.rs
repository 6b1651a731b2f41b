//! Game settings and preferences
//!
//! Persisted as JSON, separately from the game save.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{read_json, write_json};
use crate::sim::{BallShape, Difficulty};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// AI reaction speed in versus-AI mode
    pub difficulty: Difficulty,
    /// Ball variant for new games
    pub ball_shape: BallShape,

    // === Players ===
    pub left_name: String,
    pub right_name: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            ball_shape: BallShape::Classic,
            left_name: "Player 1".into(),
            right_name: "Player 2".into(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Bring out-of-range values from a hand-edited file back into range
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        match read_json::<Self>(path) {
            Ok(mut settings) => {
                settings.sanitize();
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> bool {
        match write_json(path, self) {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("neo-pong-settings-{}", std::process::id()))
            .join("settings.json");
        let settings = Settings {
            difficulty: Difficulty::Hard,
            ball_shape: BallShape::Triangle,
            master_volume: 0.3,
            ..Settings::default()
        };
        assert!(settings.save(&path));
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_is_sanitized() {
        let path = std::env::temp_dir().join(format!("neo-pong-partial-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "master_volume": 4.0, "music_volume": -1.0, "difficulty": "Easy" }"#,
        )
        .unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.ball_shape, BallShape::Classic);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/neo-pong/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
