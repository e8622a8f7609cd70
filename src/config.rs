//! Startup settings: JSON file with per-field defaults.
//!
//! Nothing is written back; the file is read once, command-line flags
//! override individual fields, and `normalized` forces every value into its
//! legal range before the settings reach the rest of the program.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::input::FAST_PAN_MULTIPLIER;

/// Static settings read once at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Open the view window in desktop fullscreen
    pub start_fullscreen: bool,
    /// Recenter zooms on the pointer instead of the window center
    pub center_on_mouse: bool,
    /// Magnification applied at startup
    pub default_scale: f64,
    /// Upper bound for zooming in
    pub max_scale: f64,
    /// Scale change per zoom step
    pub scale_increment: f64,
    /// Pixels moved per pan step (before the fast-pan multiplier)
    pub pan_increment: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_fullscreen: true,
            center_on_mouse: false,
            default_scale: 2.0,
            max_scale: 5.0,
            scale_increment: 1.0,
            pan_increment: 100,
        }
    }
}

impl Config {
    /// Load settings from a JSON file; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }

    /// Force every field into its legal range: scales at least 1.0, the
    /// maximum at least the default, increments strictly positive, the pan
    /// step small enough that the fast multiplier keeps it in range.
    pub fn normalized(mut self) -> Self {
        if !self.default_scale.is_finite() || self.default_scale < 1.0 {
            self.default_scale = 1.0;
        }
        if !self.max_scale.is_finite() || self.max_scale < self.default_scale {
            self.max_scale = self.default_scale;
        }
        if !self.scale_increment.is_finite() || self.scale_increment <= 0.0 {
            self.scale_increment = 1.0;
        }
        if self.pan_increment <= 0 {
            self.pan_increment = 100;
        }
        // The fast pan step is pan_increment * FAST_PAN_MULTIPLIER and must
        // stay representable in i32
        self.pan_increment = self.pan_increment.min(i32::MAX / FAST_PAN_MULTIPLIER);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.start_fullscreen);
        assert!(!config.center_on_mouse);
        assert_eq!(config.default_scale, 2.0);
        assert_eq!(config.max_scale, 5.0);
        assert_eq!(config.scale_increment, 1.0);
        assert_eq!(config.pan_increment, 100);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"defaultScale": 3.0, "startFullscreen": false}"#)
                .expect("valid json");
        assert_eq!(config.default_scale, 3.0);
        assert!(!config.start_fullscreen);
        assert_eq!(config.max_scale, 5.0);
        assert_eq!(config.pan_increment, 100);
    }

    #[test]
    fn test_normalized_keeps_valid_settings() {
        let config = Config::default().normalized();
        assert_eq!(config.default_scale, 2.0);
        assert_eq!(config.max_scale, 5.0);
        assert_eq!(config.scale_increment, 1.0);
        assert_eq!(config.pan_increment, 100);
    }

    #[test]
    fn test_normalized_corrects_out_of_range() {
        let config = Config {
            default_scale: 0.25,
            max_scale: 0.1,
            scale_increment: -2.0,
            pan_increment: -5,
            ..Config::default()
        }
        .normalized();
        assert_eq!(config.default_scale, 1.0);
        assert_eq!(config.max_scale, 1.0);
        assert_eq!(config.scale_increment, 1.0);
        assert_eq!(config.pan_increment, 100);
    }

    #[test]
    fn test_normalized_raises_max_to_default() {
        let config = Config {
            default_scale: 4.0,
            max_scale: 3.0,
            ..Config::default()
        }
        .normalized();
        assert_eq!(config.max_scale, 4.0);
    }

    #[test]
    fn test_normalized_rejects_non_finite() {
        let config = Config {
            default_scale: f64::NAN,
            max_scale: f64::INFINITY,
            scale_increment: f64::NAN,
            ..Config::default()
        }
        .normalized();
        assert_eq!(config.default_scale, 1.0);
        assert_eq!(config.max_scale, 1.0);
        assert_eq!(config.scale_increment, 1.0);
    }

    #[test]
    fn test_normalized_caps_fast_pan_step() {
        let config = Config {
            pan_increment: i32::MAX,
            ..Config::default()
        }
        .normalized();
        assert_eq!(config.pan_increment, i32::MAX / FAST_PAN_MULTIPLIER);
        // The capped step survives the fast multiplier without overflow
        assert!(config
            .pan_increment
            .checked_mul(FAST_PAN_MULTIPLIER)
            .is_some());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = Config::load("/nonexistent/screenloupe.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let path = std::env::temp_dir().join("screenloupe_config_test.json");
        fs::write(&path, r#"{"panIncrement": 40, "centerOnMouse": true}"#)
            .expect("write temp config");
        let config = Config::load(&path).expect("load temp config");
        let _ = fs::remove_file(&path);

        assert_eq!(config.pan_increment, 40);
        assert!(config.center_on_mouse);
        assert_eq!(config.default_scale, 2.0);
    }
}
