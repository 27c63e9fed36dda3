//! Player settings and tunables
//!
//! Persisted as a JSON file. Loading validates every tunable against its
//! documented minimum so the motor never has to.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::KeyBindings;
use crate::motor::MotorConfig;

/// Errors from loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} = {value} is below the minimum of {min}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
    },

    #[error("shell_offset = {0} must be less than 1")]
    ShellOffsetTooLarge(f32),
}

/// Movement feel presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionPreset {
    #[default]
    Standard,
    Arcade,
    Heavy,
}

impl MotionPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionPreset::Standard => "Standard",
            MotionPreset::Arcade => "Arcade",
            MotionPreset::Heavy => "Heavy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Some(MotionPreset::Standard),
            "arcade" => Some(MotionPreset::Arcade),
            "heavy" => Some(MotionPreset::Heavy),
            _ => None,
        }
    }

    /// Motor tunables for this preset
    pub fn motor_config(&self) -> MotorConfig {
        match self {
            MotionPreset::Standard => MotorConfig::default(),
            MotionPreset::Arcade => MotorConfig::arcade(),
            MotionPreset::Heavy => MotorConfig::heavy(),
        }
    }
}

/// Input tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub bindings: KeyBindings,
    /// Degrees of view rotation per unit of pointer movement
    pub aim_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            aim_sensitivity: 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the motor tunables were derived from
    pub preset: MotionPreset,
    pub motor: MotorConfig,
    pub input: InputConfig,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show key legend on start
    pub show_key_legend: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: MotionPreset::Standard,
            motor: MotorConfig::default(),
            input: InputConfig::default(),
            show_fps: true,
            show_key_legend: true,
        }
    }
}

impl Settings {
    /// Create settings from a motion preset
    pub fn from_preset(preset: MotionPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a motion preset (replaces motor tunables)
    pub fn apply_preset(&mut self, preset: MotionPreset) {
        self.preset = preset;
        self.motor = preset.motor_config();
    }

    /// Check tunables against their documented minimums
    pub fn validate(&self) -> Result<(), SettingsError> {
        let m = &self.motor;
        let minimums = [
            ("max_speed", m.max_speed, 1.0),
            ("jump_force", m.jump_force, 10.0),
            ("ground_check_distance", m.ground_check_distance, 0.0),
            ("ground_stick_distance", m.ground_stick_distance, 0.0),
            ("deceleration_rate", m.deceleration_rate, 1.0),
            ("shell_offset", m.shell_offset, 0.0),
            ("max_stick_angle", m.max_stick_angle, 0.0),
            ("aim_sensitivity", self.input.aim_sensitivity, f32::EPSILON),
        ];

        for (field, value, min) in minimums {
            // NaN fails this too
            if !(value >= min) {
                return Err(SettingsError::OutOfRange { field, value, min });
            }
        }

        if m.shell_offset >= 1.0 {
            return Err(SettingsError::ShellOffsetTooLarge(m.shell_offset));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
        for preset in [MotionPreset::Standard, MotionPreset::Arcade, MotionPreset::Heavy] {
            assert!(Settings::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut settings = Settings::default();
        settings.motor.max_speed = 0.5;
        match settings.validate() {
            Err(SettingsError::OutOfRange { field, .. }) => assert_eq!(field, "max_speed"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }

        let mut settings = Settings::default();
        settings.motor.jump_force = f32::NAN;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.motor.shell_offset = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::ShellOffsetTooLarge(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::from_preset(MotionPreset::Heavy);
        settings.input.bindings.jump = Key::Up;
        settings.show_fps = false;

        let json = settings.to_json().unwrap();
        let loaded = Settings::from_json(&json).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_json_and_bad_values() {
        let loaded = Settings::from_json(r#"{ "input": { "aim_sensitivity": 2.5 } }"#).unwrap();
        assert_eq!(loaded.input.aim_sensitivity, 2.5);
        assert_eq!(loaded.input.bindings, KeyBindings::default());
        assert_eq!(loaded.motor, MotorConfig::default());

        assert!(matches!(
            Settings::from_json(r#"{ "motor": { "deceleration_rate": 0.0 } }"#),
            Err(SettingsError::OutOfRange { .. })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(MotionPreset::from_str("ARCADE"), Some(MotionPreset::Arcade));
        assert_eq!(MotionPreset::from_str("default"), Some(MotionPreset::Standard));
        assert_eq!(MotionPreset::from_str("floaty"), None);
        assert_eq!(MotionPreset::Heavy.as_str(), "Heavy");
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("smooth_moves_settings_{}.json", std::process::id()));
        let settings = Settings::from_preset(MotionPreset::Arcade);
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }
}
