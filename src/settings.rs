use crate::maze::ShuffleStrategy;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub mazer: MazerSettings,
    #[serde(default)]
    pub ramp: RampSettings,
    #[serde(default)]
    pub bouncer: BouncerSettings,
    #[serde(default)]
    pub falling: FallingSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MazerSettings {
    pub generation_speed_ms: u64,    // Pause after each knocked-down wall
    pub new_maze_delay_ms: u64,      // How long a finished maze stays up
    pub shuffle: ShuffleStrategy,
    pub highlight_uncovered: bool,
    pub highlight_color: u8,         // ANSI 256-color index
}

impl Default for MazerSettings {
    fn default() -> Self {
        Self {
            generation_speed_ms: 20,
            new_maze_delay_ms: 10_000,
            shuffle: ShuffleStrategy::default(),
            highlight_uncovered: false,
            highlight_color: 9,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RampSettings {
    pub step_delay_ms: u64,
    pub hold_delay_ms: u64,
}

impl Default for RampSettings {
    fn default() -> Self {
        Self {
            step_delay_ms: 20,
            hold_delay_ms: 2_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BouncerSettings {
    pub text: String,
    pub frame_delay_ms: u64,
}

impl Default for BouncerSettings {
    fn default() -> Self {
        Self {
            text: "vtsaver".to_string(),
            frame_delay_ms: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FallingSettings {
    pub frame_delay_ms: u64,
    pub spawn_chance: f64,   // Per frame
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for FallingSettings {
    fn default() -> Self {
        Self {
            frame_delay_ms: 40,
            spawn_chance: 0.6,
            min_length: 4,
            max_length: 16,
        }
    }
}

const MAX_STEP_MS: u64 = 1_000;
const MAX_HOLD_MS: u64 = 600_000;

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Read and normalize settings. A missing file at the default location is
    /// not an error; a missing explicit path is.
    pub fn try_load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let settings =
            Self::parse(&content).map_err(|source| SettingsError::Parse { path, source })?;
        tracing::info!("loaded settings");
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.normalize();
        Ok(settings)
    }

    /// Clamp values into ranges the screensavers can work with
    pub fn normalize(&mut self) {
        let mazer = &mut self.mazer;
        mazer.generation_speed_ms = mazer.generation_speed_ms.min(MAX_STEP_MS);
        mazer.new_maze_delay_ms = mazer.new_maze_delay_ms.min(MAX_HOLD_MS);

        let ramp = &mut self.ramp;
        ramp.step_delay_ms = ramp.step_delay_ms.clamp(1, MAX_STEP_MS);
        ramp.hold_delay_ms = ramp.hold_delay_ms.min(MAX_HOLD_MS);

        let bouncer = &mut self.bouncer;
        bouncer.frame_delay_ms = bouncer.frame_delay_ms.clamp(1, MAX_STEP_MS);
        if bouncer.text.trim().is_empty() {
            bouncer.text = BouncerSettings::default().text;
        }

        let falling = &mut self.falling;
        falling.frame_delay_ms = falling.frame_delay_ms.clamp(1, MAX_STEP_MS);
        falling.spawn_chance = if falling.spawn_chance.is_finite() {
            falling.spawn_chance.clamp(0.0, 1.0)
        } else {
            FallingSettings::default().spawn_chance
        };
        falling.min_length = falling.min_length.max(1);
        falling.max_length = falling.max_length.max(falling.min_length);
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vtsaver")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.mazer.generation_speed_ms, 20);
        assert_eq!(settings.mazer.new_maze_delay_ms, 10_000);
        assert_eq!(settings.mazer.shuffle, ShuffleStrategy::KeyedSort);
        assert!(!settings.mazer.highlight_uncovered);
        assert_eq!(settings.bouncer.text, "vtsaver");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::parse(
            r#"
            [mazer]
            shuffle = "swap"
            highlight_uncovered = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.mazer.shuffle, ShuffleStrategy::Swap);
        assert!(settings.mazer.highlight_uncovered);
        assert_eq!(settings.mazer.generation_speed_ms, 20);
        assert_eq!(settings.ramp.step_delay_ms, 20);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let settings = Settings::parse(
            r#"
            [mazer]
            generation_speed_ms = 999999
            [ramp]
            step_delay_ms = 0
            [bouncer]
            text = "   "
            [falling]
            spawn_chance = 4.5
            min_length = 0
            max_length = 0
            "#,
        )
        .unwrap();
        assert_eq!(settings.mazer.generation_speed_ms, MAX_STEP_MS);
        assert_eq!(settings.ramp.step_delay_ms, 1);
        assert_eq!(settings.bouncer.text, "vtsaver");
        assert!((settings.falling.spawn_chance - 1.0).abs() < f64::EPSILON);
        assert_eq!(settings.falling.min_length, 1);
        assert_eq!(settings.falling.max_length, 1);
    }

    #[test]
    fn unknown_shuffle_is_a_parse_error() {
        assert!(Settings::parse("[mazer]\nshuffle = \"bogus\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let err = Settings::try_load(Some(Path::new("/nonexistent/vtsaver.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
