//! Orchestrator settings
//!
//! Fixed at construction: surface size, background, pixel scaling and debug mode.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::ConfigurationError;
use crate::renderer::{Fill, SurfaceConfig};
use crate::sim::Rect;

/// Settings recognized when the orchestrator is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical surface width in pixels
    pub width: f32,
    /// Logical surface height in pixels
    pub height: f32,
    /// Clear color, 0xRRGGBB
    pub background_color: u32,
    /// Disable smoothing when scaling sprites
    pub pixelated: bool,

    // === Debug ===
    /// Create a debug overlay alongside each active scene
    pub debug: bool,
    /// Initial overlay fill color
    pub debug_overlay_color: u32,
    /// Initial overlay fill alpha (0.0 - 1.0)
    pub debug_overlay_alpha: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background_color: 0x000000,
            pixelated: true,

            debug: false,
            debug_overlay_color: 0xffffff,
            debug_overlay_alpha: 0.5,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let valid_dim = |v: f32| v.is_finite() && v > 0.0;
        if !valid_dim(self.width) || !valid_dim(self.height) {
            return Err(ConfigurationError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.debug_overlay_alpha) {
            return Err(ConfigurationError::InvalidSetting(format!(
                "debug_overlay_alpha must be within 0..=1, got {}",
                self.debug_overlay_alpha
            )));
        }
        if self.background_color > 0xffffff || self.debug_overlay_color > 0xffffff {
            return Err(ConfigurationError::InvalidSetting(
                "colors must be 0xRRGGBB".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Field bounds in screen space
    pub fn screen(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            width: self.width,
            height: self.height,
            background_color: self.background_color,
            pixelated: self.pixelated,
        }
    }

    pub fn overlay_fill(&self) -> Fill {
        Fill {
            color: self.debug_overlay_color,
            alpha: self.debug_overlay_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "width": 320, "debug": true }"#).unwrap();
        assert_eq!(settings.width, 320.0);
        assert_eq!(settings.height, DEFAULT_HEIGHT);
        assert!(settings.debug);
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = Settings::default().with_size(0.0, 100.0).validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSize { .. }));
        assert!(matches!(
            Settings::from_json(r#"{ "height": -5 }"#),
            Err(ConfigurationError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_bad_json_and_alpha() {
        assert!(matches!(
            Settings::from_json("{ width: }"),
            Err(ConfigurationError::Json(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "debug_overlay_alpha": 1.5 }"#),
            Err(ConfigurationError::InvalidSetting(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::default().with_debug(true);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
